use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value_objects::ViewKind;
use crate::domain::errors::ApplicationError;

/// One bar on a single-asset chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPoint {
    pub date: NaiveDate,
    pub flow: f64,
}

/// One bar pair on the combined chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedFlowPoint {
    pub date: NaiveDate,
    pub btc_flow: f64,
    pub eth_flow: f64,
}

/// Per-asset flow statistics for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total_flow: f64,
    pub last_week: f64,
    pub last_month: f64,
    pub last_3_months: f64,
    pub date_range: String,
    pub chart_data: Vec<FlowPoint>,
}

/// Bitcoin + Ethereum totals for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSummary {
    pub total_combined_flow: f64,
    pub total_btc_flow: f64,
    pub total_eth_flow: f64,
    pub date_range: String,
    pub chart_data: Vec<CombinedFlowPoint>,
}

/// Headline numbers a view can bind to a page element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    NetFlow,
    LastWeek,
    LastMonth,
    LastThreeMonths,
    CombinedFlow,
    BtcFlow,
    EthFlow,
}

/// Borrowed chart series, ascending by date
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartPoints<'a> {
    Single(&'a [FlowPoint]),
    Combined(&'a [CombinedFlowPoint]),
}

impl<'a> ChartPoints<'a> {
    pub fn len(&self) -> usize {
        match self {
            ChartPoints::Single(points) => points.len(),
            ChartPoints::Combined(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            ChartPoints::Single(points) => points.iter().map(|p| p.date).collect(),
            ChartPoints::Combined(points) => points.iter().map(|p| p.date).collect(),
        }
    }
}

/// Latest successful payload of a view, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Asset(FlowSummary),
    Combined(CombinedSummary),
}

impl Summary {
    /// Validate a raw payload against the canonical contract for `kind`.
    ///
    /// The `success` flag is checked first; any missing or mistyped field after
    /// that is a contract violation rather than something to guess around.
    pub fn from_payload(kind: ViewKind, payload: Value) -> Result<Self, ApplicationError> {
        ensure_success(&payload)?;
        let contract = |e: serde_json::Error| ApplicationError::Contract(e.to_string());
        let mut summary = match kind {
            ViewKind::Combined => Summary::Combined(serde_json::from_value(payload).map_err(contract)?),
            ViewKind::Asset(_) => Summary::Asset(serde_json::from_value(payload).map_err(contract)?),
        };
        summary.sort_chart_data();
        Ok(summary)
    }

    fn sort_chart_data(&mut self) {
        match self {
            Summary::Asset(s) => s.chart_data.sort_by_key(|p| p.date),
            Summary::Combined(s) => s.chart_data.sort_by_key(|p| p.date),
        }
    }

    pub fn metric(&self, field: MetricField) -> Option<f64> {
        match (self, field) {
            (Summary::Asset(s), MetricField::NetFlow) => Some(s.total_flow),
            (Summary::Asset(s), MetricField::LastWeek) => Some(s.last_week),
            (Summary::Asset(s), MetricField::LastMonth) => Some(s.last_month),
            (Summary::Asset(s), MetricField::LastThreeMonths) => Some(s.last_3_months),
            (Summary::Combined(s), MetricField::CombinedFlow) => Some(s.total_combined_flow),
            (Summary::Combined(s), MetricField::BtcFlow) => Some(s.total_btc_flow),
            (Summary::Combined(s), MetricField::EthFlow) => Some(s.total_eth_flow),
            _ => None,
        }
    }

    pub fn date_range(&self) -> &str {
        match self {
            Summary::Asset(s) => &s.date_range,
            Summary::Combined(s) => &s.date_range,
        }
    }

    pub fn chart_points(&self) -> ChartPoints<'_> {
        match self {
            Summary::Asset(s) => ChartPoints::Single(&s.chart_data),
            Summary::Combined(s) => ChartPoints::Combined(&s.chart_data),
        }
    }
}

/// Spot market figures shown on the Ethereum page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketSnapshot {
    pub price: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
}

impl MarketSnapshot {
    /// The market endpoint has no `success` flag; a missing or zero price is the failure signal.
    pub fn from_payload(payload: Value) -> Result<Self, ApplicationError> {
        let snapshot: MarketSnapshot = serde_json::from_value(payload)
            .map_err(|e| ApplicationError::Contract(e.to_string()))?;
        if !snapshot.price.is_finite() || snapshot.price == 0.0 {
            return Err(ApplicationError::Contract("invalid price".to_string()));
        }
        Ok(snapshot)
    }
}

/// Check the application-level `success` flag of a flow payload.
pub fn ensure_success(payload: &Value) -> Result<(), ApplicationError> {
    match payload.get("success") {
        Some(Value::Bool(true)) => Ok(()),
        Some(Value::Bool(false)) => Err(ApplicationError::Rejected(
            payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )),
        _ => Err(ApplicationError::MissingSuccessFlag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::Asset;
    use serde_json::json;

    #[test]
    fn rejected_payload_carries_server_message() {
        let err = Summary::from_payload(
            ViewKind::Asset(Asset::Bitcoin),
            json!({"success": false, "error": "upstream timeout"}),
        )
        .unwrap_err();
        assert_eq!(err, ApplicationError::Rejected("upstream timeout".into()));
    }

    #[test]
    fn missing_success_flag_is_an_error() {
        let err = Summary::from_payload(ViewKind::Combined, json!({"total_combined_flow": 1.0}))
            .unwrap_err();
        assert_eq!(err, ApplicationError::MissingSuccessFlag);
    }

    #[test]
    fn missing_field_is_a_contract_violation() {
        let err = Summary::from_payload(
            ViewKind::Asset(Asset::Ethereum),
            json!({"success": true, "total_flow": 1.0, "date_range": "", "chart_data": []}),
        )
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Contract(msg) if msg.contains("last_week")));
    }

    #[test]
    fn chart_data_is_sorted_ascending() {
        let summary = Summary::from_payload(
            ViewKind::Combined,
            json!({
                "success": true,
                "total_combined_flow": 3.0,
                "total_btc_flow": 2.0,
                "total_eth_flow": 1.0,
                "date_range": "Jan 1 - Jan 2",
                "chart_data": [
                    {"date": "2024-01-02", "btc_flow": 1.0, "eth_flow": 0.5},
                    {"date": "2024-01-01", "btc_flow": 1.0, "eth_flow": 0.5}
                ]
            }),
        )
        .unwrap();
        let dates = summary.chart_points().dates();
        assert!(dates[0] < dates[1]);
        assert_eq!(summary.metric(MetricField::BtcFlow), Some(2.0));
        assert_eq!(summary.metric(MetricField::NetFlow), None);
    }

    #[test]
    fn market_snapshot_requires_price() {
        assert!(MarketSnapshot::from_payload(json!({"market_cap": 1.0})).is_err());
        assert!(MarketSnapshot::from_payload(json!({"price": 0.0})).is_err());
        let snap = MarketSnapshot::from_payload(json!({"price": 3245.5, "market_cap": 1e11})).unwrap();
        assert_eq!(snap.circulating_supply, None);
    }
}
