use std::rc::Rc;

use js_sys::Promise;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    app::DashboardPage,
    application::{MarketPanel, MarketSelectors, PageController, RefreshOutcome, ViewConfig},
    config::{DashboardConfig, init_config},
    domain::{
        logging::{ConsoleLogger, LogComponent, init_logger},
        market_data::{Asset, TimeWindow, ViewKind},
    },
    infrastructure::{ApiClient, CanvasBarChartBackend, DomTarget},
    log_info,
};

pub type BrowserController = PageController<ApiClient, DomTarget, CanvasBarChartBackend>;
pub type BrowserMarketPanel = MarketPanel<ApiClient, DomTarget>;

fn outcome_to_js(outcome: RefreshOutcome) -> Result<JsValue, JsValue> {
    match outcome {
        RefreshOutcome::Rendered => Ok(JsValue::from_str("rendered")),
        RefreshOutcome::Superseded => Ok(JsValue::from_str("superseded")),
        RefreshOutcome::Failed(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Handle returned to the hosting page
#[wasm_bindgen]
pub struct DashboardApi {
    controller: Rc<BrowserController>,
    market: Option<Rc<BrowserMarketPanel>>,
}

#[wasm_bindgen]
impl DashboardApi {
    /// Switch to `days` (7, 30, 90 or 365; anything else uses the view default).
    #[wasm_bindgen(js_name = selectWindow)]
    pub fn select_window(&self, days: u32) -> Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { outcome_to_js(controller.select_days(days).await) })
    }

    /// Switch by period token (`7d`, `30d`, `90d`, `1y`).
    #[wasm_bindgen(js_name = selectPeriod)]
    pub fn select_period(&self, token: String) -> Promise {
        let controller = self.controller.clone();
        future_to_promise(async move { outcome_to_js(controller.select_token(&token).await) })
    }

    #[wasm_bindgen(js_name = refreshMarket)]
    pub fn refresh_market(&self) -> Promise {
        let market = self.market.clone();
        future_to_promise(async move {
            let Some(market) = market else {
                return Ok(JsValue::NULL);
            };
            market
                .refresh()
                .await
                .map(|s| JsValue::from_f64(s.price))
                .map_err(|e| JsValue::from_str(&e.to_string()))
        })
    }

    #[wasm_bindgen(getter, js_name = activeDays)]
    pub fn active_days(&self) -> u32 {
        self.controller.active_window().days()
    }

    pub fn teardown(&self) {
        self.controller.teardown();
    }
}

/// Mount the `view` page (`combined`, `bitcoin` or `ethereum`) and start its first load.
#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard(view: &str) -> Result<DashboardApi, JsValue> {
    console_error_panic_hook::set_once();

    let settings = init_config(DashboardConfig::from_window());
    init_logger(Box::new(ConsoleLogger::new(settings.log_level)));

    let config = ViewConfig::by_name(view)
        .ok_or_else(|| JsValue::from_str(&format!("unknown dashboard view '{view}'")))?;
    let with_market = config.kind == ViewKind::Asset(Asset::Ethereum);

    let active = create_rw_signal::<TimeWindow>(config.default_window);
    let controller: Rc<BrowserController> = Rc::new(PageController::new(
        config.clone(),
        ApiClient::new(settings.api_base_url.clone()),
        DomTarget::with_active_signal(active),
        CanvasBarChartBackend::new(),
    ));
    let market = with_market.then(|| {
        Rc::new(MarketPanel::new(
            ApiClient::new(settings.api_base_url.clone()),
            DomTarget::new(),
        ))
    });

    let on_select = {
        let controller = controller.clone();
        Callback::new(move |window: TimeWindow| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.select(window).await;
            });
        })
    };

    let page_config = config.clone();
    let market_selectors = with_market.then(MarketSelectors::default);
    mount_to_body(move || {
        view! {
            <DashboardPage
                config=page_config.clone()
                active=active
                on_select=on_select
                market=market_selectors.clone()
            />
        }
    });

    controller.verify_bindings();
    log_info!(
        LogComponent::Presentation("Dashboard"),
        "🚀 {} view mounted (api base '{}')",
        config.name,
        settings.api_base_url
    );

    {
        let controller = controller.clone();
        let market = market.clone();
        spawn_local(async move {
            let refresh_market = async {
                if let Some(market) = &market {
                    let _ = market.refresh().await;
                }
            };
            futures::join!(controller.load_default(), refresh_market);
        });
    }

    Ok(DashboardApi { controller, market })
}
