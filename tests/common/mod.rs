#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use etf_flow_dashboard::{
    application::{ChartBackend, RenderTarget, Selector, Trend},
    domain::{
        chart::BarChartConfig,
        errors::{FetchError, FetchResult, RenderError},
        market_data::{Endpoint, FlowSource, QueryParams, TimeWindow},
    },
};
use futures::channel::oneshot;
use serde_json::{Value, json};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedSource {
    responses: RefCell<VecDeque<FetchResult<Value>>>,
    pub requests: RefCell<Vec<(Endpoint, QueryParams)>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = FetchResult<Value>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            requests: RefCell::default(),
        }
    }

    pub fn push(&self, response: FetchResult<Value>) {
        self.responses.borrow_mut().push_back(response);
    }
}

impl FlowSource for ScriptedSource {
    async fn fetch(&self, endpoint: Endpoint, params: QueryParams) -> FetchResult<Value> {
        self.requests.borrow_mut().push((endpoint, params));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".into())))
    }
}

/// Each fetch parks until the test answers it through `pending`.
#[derive(Default)]
pub struct GatedSource {
    pub pending: RefCell<Vec<(QueryParams, oneshot::Sender<FetchResult<Value>>)>>,
}

impl GatedSource {
    /// Answer the request issued for `days`.
    pub fn answer(&self, days: u32, response: FetchResult<Value>) {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .position(|(p, _)| p.days == Some(days))
            .expect("no pending request for window");
        let (_, sender) = pending.remove(index);
        sender.send(response).expect("receiver dropped");
    }
}

impl FlowSource for GatedSource {
    async fn fetch(&self, _endpoint: Endpoint, params: QueryParams) -> FetchResult<Value> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((params, tx));
        rx.await
            .unwrap_or_else(|_| Err(FetchError::Network("request cancelled".into())))
    }
}

/// In-memory page keyed by CSS selector.
#[derive(Default)]
pub struct FakePage {
    pub texts: RefCell<HashMap<String, String>>,
    pub trends: RefCell<HashMap<String, Trend>>,
    pub absent: RefCell<HashSet<String>>,
    pub active: Cell<Option<TimeWindow>>,
}

impl FakePage {
    pub fn without(selectors: &[Selector]) -> Self {
        let page = Self::default();
        page.absent.borrow_mut().extend(selectors.iter().map(Selector::css));
        page
    }

    pub fn text(&self, selector: Selector) -> Option<String> {
        self.texts.borrow().get(&selector.css()).cloned()
    }

    pub fn trend(&self, selector: Selector) -> Option<Trend> {
        self.trends.borrow().get(&selector.css()).copied()
    }
}

impl RenderTarget for FakePage {
    fn contains(&self, selector: &Selector) -> bool {
        !self.absent.borrow().contains(&selector.css())
    }

    fn set_text(&self, selector: &Selector, text: &str) -> bool {
        if !self.contains(selector) {
            return false;
        }
        self.texts.borrow_mut().insert(selector.css(), text.to_string());
        true
    }

    fn set_trend(&self, selector: &Selector, trend: Trend) -> bool {
        if !self.contains(selector) {
            return false;
        }
        self.trends.borrow_mut().insert(selector.css(), trend);
        true
    }

    fn mark_active_window(&self, window: TimeWindow) {
        self.active.set(Some(window));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    Construct { id: u32, canvas: String, series_lengths: Vec<usize> },
    Dispose(u32),
}

/// Chart backend that records lifecycle calls instead of drawing.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub events: Rc<RefCell<Vec<ChartEvent>>>,
    pub missing_canvases: Rc<RefCell<HashSet<String>>>,
    pub configs: Rc<RefCell<Vec<BarChartConfig>>>,
    next_id: Rc<Cell<u32>>,
}

impl RecordingBackend {
    pub fn without_canvas(canvas_id: &str) -> Self {
        let backend = Self::default();
        backend.missing_canvases.borrow_mut().insert(canvas_id.to_string());
        backend
    }

    pub fn events(&self) -> Vec<ChartEvent> {
        self.events.borrow().clone()
    }

    /// Instances constructed and not yet disposed.
    pub fn live(&self) -> Vec<u32> {
        let mut live = Vec::new();
        for event in self.events.borrow().iter() {
            match event {
                ChartEvent::Construct { id, .. } => live.push(*id),
                ChartEvent::Dispose(id) => live.retain(|l| l != id),
            }
        }
        live
    }

    pub fn last_config(&self) -> Option<BarChartConfig> {
        self.configs.borrow().last().cloned()
    }
}

impl ChartBackend for RecordingBackend {
    type Instance = u32;

    fn canvas_exists(&self, canvas_id: &str) -> bool {
        !self.missing_canvases.borrow().contains(canvas_id)
    }

    fn construct(&self, canvas_id: &str, config: &BarChartConfig) -> Result<u32, RenderError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.configs.borrow_mut().push(config.clone());
        self.events.borrow_mut().push(ChartEvent::Construct {
            id,
            canvas: canvas_id.to_string(),
            series_lengths: config.series.iter().map(|s| s.values.len()).collect(),
        });
        Ok(id)
    }

    fn dispose(&self, instance: u32) {
        self.events.borrow_mut().push(ChartEvent::Dispose(instance));
    }
}

pub fn bitcoin_payload(total_flow: f64) -> Value {
    json!({
        "success": true,
        "total_flow": total_flow,
        "last_week": 5e8,
        "last_month": 1e9,
        "last_3_months": 2e9,
        "date_range": "Jan 1 - Jan 30",
        "chart_data": [{ "date": "2024-01-01", "flow": 1e8 }]
    })
}

pub fn combined_payload() -> Value {
    json!({
        "success": true,
        "total_combined_flow": -1.25e8,
        "total_btc_flow": 2.5e8,
        "total_eth_flow": -3.75e8,
        "date_range": "",
        "chart_data": [
            { "date": "2024-03-02", "btc_flow": 2e8, "eth_flow": -1e8 },
            { "date": "2024-03-01", "btc_flow": 5e7, "eth_flow": -2.75e8 }
        ]
    })
}

pub fn rejected(message: &str) -> Value {
    json!({ "success": false, "error": message })
}
