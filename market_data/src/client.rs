// src/client.rs

use crate::models::{
    DailyHistoryResponse, GlobalQuoteResponse, MarketDataError, PriceHistory,
};
use log::debug;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the market-data provider. The service depends only on
/// the two calls below: daily history and a best-effort current price.
pub struct MarketDataClient {
    pub base_url: String,
    pub api_key: String,
    pub http: reqwest::Client,
}

impl MarketDataClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the daily price/dividend history for a symbol. The provider
    /// signals an unknown symbol with an "Error Message" body on a 200.
    pub async fn fetch_daily_history(
        &self,
        symbol: &str,
    ) -> Result<PriceHistory, MarketDataError> {
        debug!("fetching daily history for {}", symbol);

        let body: Value = self
            .http
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", "full"),
                ("apikey", self.api_key.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .json()
            .await?;

        if body.get("Error Message").is_some() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let response: DailyHistoryResponse = serde_json::from_value(body)
            .map_err(|e| MarketDataError::MalformedResponse(e.to_string()))?;

        PriceHistory::from_response(symbol, response)
    }

    /// Fetch the provider's current price for a symbol. Returns Ok(None) when
    /// the provider has no quote; the caller decides how to fall back.
    pub async fn fetch_current_price(
        &self,
        symbol: &str,
    ) -> Result<Option<f64>, MarketDataError> {
        debug!("fetching current price for {}", symbol);

        let body: Value = self
            .http
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .json()
            .await?;

        if body.get("Error Message").is_some() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        let response: GlobalQuoteResponse = serde_json::from_value(body)
            .map_err(|e| MarketDataError::MalformedResponse(e.to_string()))?;

        Ok(response.quote.price)
    }
}
