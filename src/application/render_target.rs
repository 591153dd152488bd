use super::view_config::Selector;
use crate::domain::market_data::TimeWindow;

/// Sign class applied to a metric element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    /// Zero counts as positive.
    pub fn of(value: f64) -> Self {
        if value >= 0.0 { Trend::Positive } else { Trend::Negative }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }
}

/// Page capability injected into controllers.
///
/// Every method reports `false` when the addressed element is absent; callers
/// treat that as a skipped field, never as a failed update.
pub trait RenderTarget {
    fn contains(&self, selector: &Selector) -> bool;
    fn set_text(&self, selector: &Selector, text: &str) -> bool;
    fn set_trend(&self, selector: &Selector, trend: Trend) -> bool;
    /// Highlight the window button for `window`.
    fn mark_active_window(&self, window: TimeWindow);
}

impl<T: RenderTarget> RenderTarget for std::rc::Rc<T> {
    fn contains(&self, selector: &Selector) -> bool {
        (**self).contains(selector)
    }

    fn set_text(&self, selector: &Selector, text: &str) -> bool {
        (**self).set_text(selector, text)
    }

    fn set_trend(&self, selector: &Selector, trend: Trend) -> bool {
        (**self).set_trend(selector, trend)
    }

    fn mark_active_window(&self, window: TimeWindow) {
        (**self).mark_active_window(window)
    }
}
