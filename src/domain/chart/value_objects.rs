use serde::Serialize;

use crate::domain::market_data::{Asset, ViewKind};

/// Value Object - which bars a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSpec {
    /// One bar per date in the asset's color.
    Single(Asset),
    /// Bitcoin and Ethereum side by side.
    Combined,
}

impl From<ViewKind> for SeriesSpec {
    fn from(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Combined => SeriesSpec::Combined,
            ViewKind::Asset(asset) => SeriesSpec::Single(asset),
        }
    }
}

/// Value Object - one bar series, values in millions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub label: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Value Object - chart palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartTheme {
    pub background: &'static str,
    pub grid: &'static str,
    pub tick: &'static str,
    pub legend: &'static str,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#1a1f2e",
            grid: "#2d3748",
            tick: "#718096",
            legend: "#a0aec0",
        }
    }
}

/// Value Object - everything a backend needs to draw one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartConfig {
    /// X-axis categories, one per point.
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
    pub show_legend: bool,
    /// Tooltip prefix used for single-series charts; combined charts use the series label.
    pub tooltip_label: Option<String>,
    pub theme: ChartTheme,
}

impl BarChartConfig {
    pub fn point_count(&self) -> usize {
        self.labels.len()
    }

    /// Tooltip lines for the bar group at `index`.
    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        self.series
            .iter()
            .filter_map(|s| {
                let value = *s.values.get(index)?;
                let label = self.tooltip_label.as_deref().unwrap_or(&s.label);
                Some(super::services::tooltip_text(label, value))
            })
            .collect()
    }
}
