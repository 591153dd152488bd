use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::format_utils::period_text;

/// Value Object - lookback window driving a query and its label
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
pub enum TimeWindow {
    #[strum(serialize = "7d")]
    SevenDays,
    #[strum(serialize = "30d")]
    ThirtyDays,
    #[strum(serialize = "90d")]
    NinetyDays,
    #[strum(serialize = "1y")]
    OneYear,
}

impl TimeWindow {
    pub const fn days(self) -> u32 {
        match self {
            TimeWindow::SevenDays => 7,
            TimeWindow::ThirtyDays => 30,
            TimeWindow::NinetyDays => 90,
            TimeWindow::OneYear => 365,
        }
    }

    pub fn label(self) -> &'static str {
        period_text(i64::from(self.days()))
    }

    /// Button token, e.g. `30d`.
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Exact match only; `None` for anything outside the four canonical windows.
    pub fn from_days(days: u32) -> Option<Self> {
        Self::iter().find(|w| w.days() == days)
    }

    pub fn from_days_or(days: u32, fallback: TimeWindow) -> Self {
        Self::from_days(days).unwrap_or(fallback)
    }

    /// Parse a `data-period` token (`7d`, `30d`, `90d`, `1y`).
    pub fn from_token_or(token: &str, fallback: TimeWindow) -> Self {
        token.trim().parse().unwrap_or(fallback)
    }

    pub fn all() -> impl Iterator<Item = TimeWindow> {
        Self::iter()
    }
}

/// Tracked ETF underlying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Asset {
    Bitcoin,
    Ethereum,
}

impl Asset {
    /// Path segment used by the API (`bitcoin`, `ethereum`).
    pub fn slug(self) -> &'static str {
        self.into()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Asset::Bitcoin => "Bitcoin",
            Asset::Ethereum => "Ethereum",
        }
    }

    /// Brand color used for bars and legends.
    pub fn color(self) -> &'static str {
        match self {
            Asset::Bitcoin => "#f7941a",
            Asset::Ethereum => "#627eea",
        }
    }
}

/// Which payload shape a view consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Combined,
    Asset(Asset),
}

/// Logical API queries, relative to `<base>/api`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CombinedFlows,
    AssetFlows(Asset),
    EtfList(Asset),
    Aum(Asset),
    MarketPrices,
    EthereumMarket,
}

impl Endpoint {
    pub fn path(self) -> String {
        match self {
            Endpoint::CombinedFlows => "/etf/combined".to_string(),
            Endpoint::AssetFlows(asset) => format!("/etf/{}/flows", asset.slug()),
            Endpoint::EtfList(asset) => format!("/etf/{}/list", asset.slug()),
            Endpoint::Aum(asset) => format!("/etf/{}/aum", asset.slug()),
            Endpoint::MarketPrices => "/market/prices".to_string(),
            Endpoint::EthereumMarket => "/ethereum".to_string(),
        }
    }

    /// Flow endpoints for a view kind.
    pub fn flows_for(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Combined => Endpoint::CombinedFlows,
            ViewKind::Asset(asset) => Endpoint::AssetFlows(asset),
        }
    }
}

/// Query string parameters. Only `days` exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub days: Option<u32>,
}

impl QueryParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn window(window: TimeWindow) -> Self {
        Self { days: Some(window.days()) }
    }

    /// `?days=N`, or empty when no parameter is set.
    pub fn to_query_string(&self) -> String {
        match self.days {
            Some(days) => format!("?days={days}"),
            None => String::new(),
        }
    }
}
