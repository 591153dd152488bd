use leptos::{RwSignal, SignalSet};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::{
    application::{RenderTarget, Selector, Trend},
    domain::{
        logging::{LogComponent, get_logger},
        market_data::TimeWindow,
    },
};

const WINDOW_BUTTONS: &str = ".chart-controls button";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Live page as a [`RenderTarget`]
#[derive(Clone, Default)]
pub struct DomTarget {
    active_window: Option<RwSignal<TimeWindow>>,
}

impl DomTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive button highlighting through a signal instead of toggling classes directly.
    pub fn with_active_signal(signal: RwSignal<TimeWindow>) -> Self {
        Self { active_window: Some(signal) }
    }

    fn find(&self, selector: &Selector) -> Option<Element> {
        let css = selector.css();
        match document()?.query_selector(&css) {
            Ok(found) => found,
            Err(e) => {
                get_logger().warn(
                    LogComponent::Infrastructure("DOM"),
                    &format!("invalid selector {css}: {e:?}"),
                );
                None
            }
        }
    }

    fn toggle_window_buttons(window: TimeWindow) {
        let Some(buttons) = document().and_then(|d| d.query_selector_all(WINDOW_BUTTONS).ok()) else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let is_active = button.get_attribute("data-period").as_deref() == Some(window.token());
            let classes = button.class_list();
            let _ = if is_active { classes.add_1("active") } else { classes.remove_1("active") };
        }
    }
}

impl RenderTarget for DomTarget {
    fn contains(&self, selector: &Selector) -> bool {
        self.find(selector).is_some()
    }

    fn set_text(&self, selector: &Selector, text: &str) -> bool {
        match self.find(selector) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_trend(&self, selector: &Selector, trend: Trend) -> bool {
        let Some(element) = self.find(selector) else {
            return false;
        };
        let classes = element.class_list();
        let _ = classes.remove_2(Trend::Positive.class_name(), Trend::Negative.class_name());
        let _ = classes.add_1(trend.class_name());
        true
    }

    fn mark_active_window(&self, window: TimeWindow) {
        match self.active_window {
            Some(signal) => signal.set(window),
            None => Self::toggle_window_buttons(window),
        }
    }
}
