use crate::{
    application::{render_target::RenderTarget, view_config::Selector},
    domain::{
        errors::AppError,
        logging::LogComponent,
        market_data::{Endpoint, FlowSource, MarketSnapshot, QueryParams},
    },
    format_utils::format_grouped,
    log_error,
};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSelectors {
    pub price: Selector,
    pub market_cap: Selector,
    pub supply: Selector,
    pub status: Option<Selector>,
}

impl Default for MarketSelectors {
    fn default() -> Self {
        Self {
            price: Selector::id("eth-price"),
            market_cap: Selector::id("eth-market-cap"),
            supply: Selector::id("eth-supply"),
            status: Some(Selector::id("eth-market-status")),
        }
    }
}

/// Spot price, market cap and circulating supply for Ethereum
pub struct MarketPanel<S, T> {
    source: S,
    target: T,
    selectors: MarketSelectors,
}

impl<S: FlowSource, T: RenderTarget> MarketPanel<S, T> {
    pub fn new(source: S, target: T) -> Self {
        Self::with_selectors(source, target, MarketSelectors::default())
    }

    pub fn with_selectors(source: S, target: T, selectors: MarketSelectors) -> Self {
        Self { source, target, selectors }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub async fn refresh(&self) -> Result<MarketSnapshot, AppError> {
        let snapshot = match self.load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log_error!(
                    LogComponent::Application("MarketPanel"),
                    "Ethereum market refresh failed: {e}"
                );
                if let Some(status) = &self.selectors.status {
                    self.target.set_text(status, "Failed to load Ethereum data");
                }
                return Err(e);
            }
        };

        self.target
            .set_text(&self.selectors.price, &format!("${}", format_grouped(snapshot.price, 2)));
        self.target.set_text(
            &self.selectors.market_cap,
            &snapshot
                .market_cap
                .map(|v| format!("${}", format_grouped(v, 0)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        );
        self.target.set_text(
            &self.selectors.supply,
            &snapshot
                .circulating_supply
                .map(|v| format_grouped(v, 0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        );
        if let Some(status) = &self.selectors.status {
            self.target.set_text(status, "");
        }
        Ok(snapshot)
    }

    async fn load(&self) -> Result<MarketSnapshot, AppError> {
        let payload = self
            .source
            .fetch(Endpoint::EthereumMarket, QueryParams::none())
            .await?;
        Ok(MarketSnapshot::from_payload(payload)?)
    }
}
