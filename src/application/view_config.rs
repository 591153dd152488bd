use derive_more::Display;

use crate::domain::{
    chart::SeriesSpec,
    market_data::{Asset, Endpoint, MetricField, TimeWindow, ViewKind},
};

/// Page element address, rendered as a CSS selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Selector {
    #[display(fmt = "#{}", _0)]
    Id(&'static str),
    #[display(fmt = "[data-{}=\"{}\"]", attr, value)]
    Data { attr: &'static str, value: &'static str },
}

impl Selector {
    pub const fn id(id: &'static str) -> Self {
        Selector::Id(id)
    }

    pub const fn data(attr: &'static str, value: &'static str) -> Self {
        Selector::Data { attr, value }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }

    /// Attribute name and value that make an element match this selector.
    pub fn attribute(&self) -> (String, &'static str) {
        match self {
            Selector::Id(id) => ("id".to_string(), *id),
            Selector::Data { attr, value } => (format!("data-{attr}"), *value),
        }
    }
}

/// Metric written into one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricBinding {
    pub field: MetricField,
    pub selector: Selector,
    /// Caption shown on the card when the page skeleton is generated.
    pub caption: &'static str,
    /// Toggle `positive`/`negative` classes by sign.
    pub trend: bool,
}

impl MetricBinding {
    pub const fn new(field: MetricField, selector: Selector, caption: &'static str, trend: bool) -> Self {
        Self { field, selector, caption, trend }
    }
}

/// The rendering contract between a controller and the page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelectors {
    pub metrics: Vec<MetricBinding>,
    pub period_labels: Vec<Selector>,
    pub date_range: Option<Selector>,
    pub last_updated: Option<Selector>,
    pub status: Option<Selector>,
    pub canvas_id: &'static str,
}

impl ViewSelectors {
    /// Every selector the view writes to, canvas excluded.
    pub fn all(&self) -> Vec<Selector> {
        self.metrics
            .iter()
            .map(|m| m.selector)
            .chain(self.period_labels.iter().copied())
            .chain(self.date_range)
            .chain(self.last_updated)
            .chain(self.status)
            .collect()
    }
}

/// One dashboard view: what to fetch, where to write, which window to start with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: ViewKind,
    pub endpoint: Endpoint,
    pub default_window: TimeWindow,
    pub selectors: ViewSelectors,
}

impl ViewConfig {
    pub fn combined() -> Self {
        Self {
            name: "combined",
            title: "Crypto ETF Flows",
            kind: ViewKind::Combined,
            endpoint: Endpoint::flows_for(ViewKind::Combined),
            default_window: TimeWindow::SevenDays,
            selectors: ViewSelectors {
                metrics: vec![
                    MetricBinding::new(
                        MetricField::CombinedFlow,
                        Selector::data("metric", "total-flow"),
                        "Total Net Flow",
                        true,
                    ),
                    MetricBinding::new(
                        MetricField::BtcFlow,
                        Selector::data("metric", "btc-flow"),
                        "Bitcoin ETF Flow",
                        true,
                    ),
                    MetricBinding::new(
                        MetricField::EthFlow,
                        Selector::data("metric", "eth-flow"),
                        "Ethereum ETF Flow",
                        true,
                    ),
                ],
                period_labels: vec![
                    Selector::id("current-period"),
                    Selector::id("btc-period"),
                    Selector::id("eth-period"),
                ],
                date_range: Some(Selector::id("chart-date-range")),
                last_updated: Some(Selector::id("last-update-time")),
                status: None,
                canvas_id: "combined-flow-chart",
            },
        }
    }

    pub fn bitcoin() -> Self {
        Self::asset(Asset::Bitcoin)
    }

    pub fn ethereum() -> Self {
        Self::asset(Asset::Ethereum)
    }

    fn asset(asset: Asset) -> Self {
        let (name, title, net_flow, current_period, date_range, canvas_id) = match asset {
            Asset::Bitcoin => (
                "bitcoin",
                "Bitcoin ETF Flows",
                "btc-net-flow",
                "btc-current-period",
                "btc-date-range",
                "bitcoin-flow-chart",
            ),
            Asset::Ethereum => (
                "ethereum",
                "Ethereum ETF Flows",
                "eth-net-flow",
                "eth-current-period",
                "eth-date-range",
                "ethereum-flow-chart",
            ),
        };

        Self {
            name,
            title,
            kind: ViewKind::Asset(asset),
            endpoint: Endpoint::flows_for(ViewKind::Asset(asset)),
            default_window: TimeWindow::ThirtyDays,
            selectors: ViewSelectors {
                metrics: vec![
                    MetricBinding::new(MetricField::NetFlow, Selector::data("metric", net_flow), "Net Flow", true),
                    MetricBinding::new(MetricField::LastWeek, Selector::data("period", "last-week"), "Last Week", false),
                    MetricBinding::new(
                        MetricField::LastMonth,
                        Selector::data("period", "last-month"),
                        "Last Month",
                        false,
                    ),
                    MetricBinding::new(
                        MetricField::LastThreeMonths,
                        Selector::data("period", "last-3-months"),
                        "Last 3 Months",
                        false,
                    ),
                ],
                period_labels: vec![Selector::id(current_period)],
                date_range: Some(Selector::id(date_range)),
                last_updated: Some(Selector::id("last-update-time")),
                status: Some(Selector::id("loading")),
                canvas_id,
            },
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "combined" | "" => Some(Self::combined()),
            "bitcoin" | "btc" => Some(Self::bitcoin()),
            "ethereum" | "eth" => Some(Self::ethereum()),
            _ => None,
        }
    }

    pub fn series_spec(&self) -> SeriesSpec {
        SeriesSpec::from(self.kind)
    }

    /// Window for a raw `days` value; unknown values fall back to this view's default.
    pub fn window_for_days(&self, days: u32) -> TimeWindow {
        TimeWindow::from_days_or(days, self.default_window)
    }

    /// Window for a button `data-period` token.
    pub fn window_for_token(&self, token: &str) -> TimeWindow {
        TimeWindow::from_token_or(token, self.default_window)
    }
}
