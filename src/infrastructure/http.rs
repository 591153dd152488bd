use gloo_net::http::Request;
use serde_json::Value;

use crate::domain::{
    errors::{FetchError, FetchResult},
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{Asset, Endpoint, FlowSource, QueryParams},
};

const API_PREFIX: &str = "/api";

/// `<base>/api<endpoint><query>`. An empty base means same origin.
pub fn compose_url(base_url: &str, endpoint: Endpoint, params: QueryParams) -> String {
    format!(
        "{}{}{}{}",
        base_url.trim_end_matches('/'),
        API_PREFIX,
        endpoint.path(),
        params.to_query_string()
    )
}

/// gloo-net client for the dashboard backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new("")
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: Endpoint, params: QueryParams) -> String {
        compose_url(&self.base_url, endpoint, params)
    }

    /// Single GET; the body is parsed as JSON but not interpreted.
    pub async fn get_json(&self, endpoint: Endpoint, params: QueryParams) -> FetchResult<Value> {
        let url = self.url_for(endpoint, params);
        get_logger().debug(LogComponent::Infrastructure("HTTP"), &format!("🌐 GET: {url}"));

        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                let error = FetchError::Network(e.to_string());
                get_logger().error(LogComponent::Infrastructure("HTTP"), &format!("{url}: {error}"));
                error
            })?;

        if !response.ok() {
            let error = FetchError::HttpStatus(response.status());
            get_logger().log_with_metadata(
                LogLevel::Error,
                LogComponent::Infrastructure("HTTP"),
                &format!("{url}: {error}"),
                &response.status_text(),
            );
            return Err(error);
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))?;
        let payload = parse_body(&body)?;

        get_logger().debug(
            LogComponent::Infrastructure("HTTP"),
            &format!("✅ {url}: {} bytes", body.len()),
        );
        Ok(payload)
    }

    pub async fn etf_list(&self, asset: Asset) -> FetchResult<Value> {
        self.get_json(Endpoint::EtfList(asset), QueryParams::none()).await
    }

    pub async fn aum(&self, asset: Asset) -> FetchResult<Value> {
        self.get_json(Endpoint::Aum(asset), QueryParams::none()).await
    }

    pub async fn market_prices(&self) -> FetchResult<Value> {
        self.get_json(Endpoint::MarketPrices, QueryParams::none()).await
    }
}

impl FlowSource for ApiClient {
    async fn fetch(&self, endpoint: Endpoint, params: QueryParams) -> FetchResult<Value> {
        self.get_json(endpoint, params).await
    }
}

/// Body to JSON, mapping syntax errors to `MalformedJson`.
pub fn parse_body(body: &str) -> FetchResult<Value> {
    serde_json::from_str(body).map_err(|e| FetchError::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::TimeWindow;

    #[test]
    fn same_origin_url() {
        let url = compose_url("", Endpoint::CombinedFlows, QueryParams::window(TimeWindow::SevenDays));
        assert_eq!(url, "/api/etf/combined?days=7");
    }

    #[test]
    fn configured_base_url_drops_trailing_slash() {
        let client = ApiClient::new("https://flows.example.com/");
        assert_eq!(
            client.url_for(Endpoint::AssetFlows(Asset::Bitcoin), QueryParams::window(TimeWindow::OneYear)),
            "https://flows.example.com/api/etf/bitcoin/flows?days=365"
        );
        assert_eq!(
            client.url_for(Endpoint::EthereumMarket, QueryParams::none()),
            "https://flows.example.com/api/ethereum"
        );
    }

    #[test]
    fn passthrough_endpoints() {
        let client = ApiClient::default();
        assert_eq!(client.url_for(Endpoint::EtfList(Asset::Bitcoin), QueryParams::none()), "/api/etf/bitcoin/list");
        assert_eq!(client.url_for(Endpoint::Aum(Asset::Ethereum), QueryParams::none()), "/api/etf/ethereum/aum");
        assert_eq!(client.url_for(Endpoint::MarketPrices, QueryParams::none()), "/api/market/prices");
    }

    #[test]
    fn malformed_body() {
        assert!(matches!(parse_body("<html>"), Err(FetchError::MalformedJson(_))));
        assert_eq!(parse_body(r#"{"success":false}"#).unwrap()["success"], false);
    }
}
