use std::cell::{Cell, RefCell};

use chrono::NaiveTime;
use serde_json::Value;

use super::{
    chart_service::{ChartBackend, ChartRenderer, ChartSlot},
    render_target::{RenderTarget, Trend},
    view_config::ViewConfig,
};
use crate::{
    domain::{
        errors::{AppError, BindingError, FetchResult},
        logging::{LogComponent, get_logger},
        market_data::{FlowSource, QueryParams, Summary, TimeWindow},
    },
    format_utils::{date_range_text, format_currency, last_updated_text, period_text},
    log_warn,
};

const STATUS_FAILED: &str = "Failed to load data";

/// Refresh cycle state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading(TimeWindow),
    Rendered(TimeWindow),
    Failed { window: TimeWindow, error: AppError },
}

/// What happened to one `select` call
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Rendered,
    Failed(AppError),
    /// A newer selection was issued while this fetch was in flight; its result was dropped.
    Superseded,
}

/// Ticket for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub id: u64,
    pub window: TimeWindow,
}

/// Drives one dashboard view: window selection, fetch, formatted update, chart redraw.
///
/// Single-threaded and re-entrant. State lives in `Cell`/`RefCell` and no borrow
/// is held across the fetch, so overlapping `select` calls on one controller are fine;
/// only the most recently issued one may touch the page.
pub struct PageController<S, T, B: ChartBackend> {
    config: ViewConfig,
    source: S,
    target: T,
    charts: ChartRenderer<B>,
    generation: Cell<u64>,
    active_window: Cell<TimeWindow>,
    state: RefCell<ViewState>,
    summary: RefCell<Option<Summary>>,
    chart: RefCell<ChartSlot<B::Instance>>,
    clock: fn() -> NaiveTime,
}

fn local_time() -> NaiveTime {
    chrono::Local::now().time()
}

impl<S, T, B> PageController<S, T, B>
where
    S: FlowSource,
    T: RenderTarget,
    B: ChartBackend,
{
    pub fn new(config: ViewConfig, source: S, target: T, backend: B) -> Self {
        let default_window = config.default_window;
        Self {
            config,
            source,
            target,
            charts: ChartRenderer::new(backend),
            generation: Cell::new(0),
            active_window: Cell::new(default_window),
            state: RefCell::new(ViewState::Idle),
            summary: RefCell::new(None),
            chart: RefCell::new(None),
            clock: local_time,
        }
    }

    /// Replace the wall clock used for the "last updated" stamp.
    pub fn with_clock(mut self, clock: fn() -> NaiveTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn chart_backend(&self) -> &B {
        self.charts.backend()
    }

    pub fn active_window(&self) -> TimeWindow {
        self.active_window.get()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.summary.borrow().clone()
    }

    pub fn has_chart(&self) -> bool {
        self.chart.borrow().is_some()
    }

    /// Initial load on page readiness.
    pub async fn load_default(&self) -> RefreshOutcome {
        self.select(self.config.default_window).await
    }

    /// Select a window given as raw days; unknown values use the view default.
    pub async fn select_days(&self, days: u32) -> RefreshOutcome {
        self.select(self.config.window_for_days(days)).await
    }

    /// Select a window by its `data-period` token (`7d`, `30d`, `90d`, `1y`).
    pub async fn select_token(&self, token: &str) -> RefreshOutcome {
        self.select(self.config.window_for_token(token)).await
    }

    /// Run one full refresh cycle for `window`.
    pub async fn select(&self, window: TimeWindow) -> RefreshOutcome {
        let ticket = self.begin(window);
        let result = self
            .source
            .fetch(self.config.endpoint, QueryParams::window(window))
            .await;
        self.complete(ticket, result)
    }

    /// Record `window` as active and open a new generation. Earlier tickets become stale.
    pub fn begin(&self, window: TimeWindow) -> Generation {
        let id = self.generation.get().wrapping_add(1);
        self.generation.set(id);
        self.active_window.set(window);
        self.target.mark_active_window(window);
        *self.state.borrow_mut() = ViewState::Loading(window);

        get_logger().debug(
            LogComponent::Application(self.config.name),
            &format!("loading {} (generation {id})", window.label()),
        );
        Generation { id, window }
    }

    /// Apply a fetch result, unless a newer generation has been issued since.
    pub fn complete(&self, ticket: Generation, result: FetchResult<Value>) -> RefreshOutcome {
        if ticket.id != self.generation.get() {
            get_logger().debug(
                LogComponent::Application(self.config.name),
                &format!(
                    "discarding stale result for {} (generation {} < {})",
                    ticket.window.label(),
                    ticket.id,
                    self.generation.get()
                ),
            );
            return RefreshOutcome::Superseded;
        }

        let summary = result
            .map_err(AppError::from)
            .and_then(|payload| Summary::from_payload(self.config.kind, payload).map_err(AppError::from));

        match summary {
            Ok(summary) => {
                self.apply(ticket.window, &summary);
                *self.summary.borrow_mut() = Some(summary);
                *self.state.borrow_mut() = ViewState::Rendered(ticket.window);
                RefreshOutcome::Rendered
            }
            Err(error) => {
                get_logger().error(
                    LogComponent::Application(self.config.name),
                    &format!("refresh for {} failed: {error}", ticket.window.label()),
                );
                if let Some(status) = &self.config.selectors.status {
                    self.target.set_text(status, STATUS_FAILED);
                }
                *self.state.borrow_mut() = ViewState::Failed {
                    window: ticket.window,
                    error: error.clone(),
                };
                RefreshOutcome::Failed(error)
            }
        }
    }

    fn apply(&self, window: TimeWindow, summary: &Summary) {
        let selectors = &self.config.selectors;
        let mut skipped = 0usize;

        for binding in &selectors.metrics {
            let Some(value) = summary.metric(binding.field) else {
                continue;
            };
            if !self.target.set_text(&binding.selector, &format_currency(Some(value))) {
                skipped += 1;
                continue;
            }
            if binding.trend {
                self.target.set_trend(&binding.selector, Trend::of(value));
            }
        }

        let label = period_text(i64::from(window.days()));
        for selector in &selectors.period_labels {
            if !self.target.set_text(selector, label) {
                skipped += 1;
            }
        }

        let points = summary.chart_points();
        if let Some(selector) = &selectors.date_range {
            let text = if summary.date_range().trim().is_empty() {
                date_range_text(&points.dates())
            } else {
                Some(summary.date_range().to_string())
            };
            if let Some(text) = text {
                if !self.target.set_text(selector, &text) {
                    skipped += 1;
                }
            }
        }

        if let Some(selector) = &selectors.last_updated {
            if !self.target.set_text(selector, &last_updated_text((self.clock)())) {
                skipped += 1;
            }
        }

        if let Some(selector) = &selectors.status {
            self.target.set_text(selector, "");
        }

        if skipped > 0 {
            get_logger().debug(
                LogComponent::Application(self.config.name),
                &format!("{skipped} bound element(s) absent, skipped"),
            );
        }

        if points.is_empty() {
            get_logger().debug(
                LogComponent::Application(self.config.name),
                "no chart data in payload, keeping current chart",
            );
            return;
        }
        self.charts.render(
            &mut self.chart.borrow_mut(),
            selectors.canvas_id,
            points,
            self.config.series_spec(),
        );
    }

    /// Report bound elements missing from the page. Logged once per call.
    pub fn verify_bindings(&self) -> Vec<BindingError> {
        let missing: Vec<BindingError> = self
            .config
            .selectors
            .all()
            .into_iter()
            .filter(|s| !self.target.contains(s))
            .map(|s| BindingError { selector: s.css() })
            .collect();

        for error in &missing {
            log_warn!(LogComponent::Application(self.config.name), "{error}");
        }
        missing
    }

    /// Dispose the live chart. The controller can still render again afterwards.
    pub fn teardown(&self) {
        self.charts.dispose(&mut self.chart.borrow_mut());
        get_logger().debug(LogComponent::Application(self.config.name), "view torn down");
    }
}
