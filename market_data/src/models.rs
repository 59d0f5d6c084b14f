// src/models.rs

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("symbol not resolvable by provider: {0}")]
    SymbolNotFound(String),
    #[error("Invalid date format encountered: {0}")]
    InvalidDateFormat(String),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

// Custom function to convert a JSON string to f64
fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

// Custom function to convert a JSON string to i64
fn string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<i64>().map_err(serde::de::Error::custom)
}

// Custom function to convert a JSON string to a NaiveDate
fn string_to_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

// Same as string_to_f64 but tolerates a missing field
fn opt_string_to_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => s.parse::<f64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn opt_string_to_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

// Struct for the Meta Data of the daily series
#[derive(Debug, Deserialize)]
pub struct DailyMetaData {
    #[serde(rename = "1. Information")]
    pub information: String,

    #[serde(rename = "2. Symbol")]
    pub symbol: String,

    #[serde(rename = "3. Last Refreshed", deserialize_with = "string_to_date")]
    pub last_refreshed: NaiveDate,

    #[serde(rename = "4. Output Size")]
    pub output_size: String,

    #[serde(rename = "5. Time Zone")]
    pub time_zone: String,
}

// Struct for one day of price and dividend data
#[derive(Debug, Clone, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open", deserialize_with = "string_to_f64")]
    pub open: f64,

    #[serde(rename = "2. high", deserialize_with = "string_to_f64")]
    pub high: f64,

    #[serde(rename = "3. low", deserialize_with = "string_to_f64")]
    pub low: f64,

    #[serde(rename = "4. close", deserialize_with = "string_to_f64")]
    pub close: f64,

    #[serde(rename = "5. adjusted close", deserialize_with = "string_to_f64")]
    pub adjusted_close: f64,

    #[serde(rename = "6. volume", deserialize_with = "string_to_i64")]
    pub volume: i64,

    #[serde(rename = "7. dividend amount", deserialize_with = "string_to_f64")]
    pub dividend_amount: f64,
}

// Struct for the overall daily history response
#[derive(Debug, Deserialize)]
pub struct DailyHistoryResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: DailyMetaData,

    #[serde(rename = "Time Series (Daily)")]
    pub series: HashMap<String, DailyBar>, // Date -> DailyBar
}

// The provider returns "Global Quote": {} for symbols it cannot quote, so
// every field is optional and absence is not an error.
#[derive(Debug, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: Option<String>,

    #[serde(rename = "05. price", default, deserialize_with = "opt_string_to_f64")]
    pub price: Option<f64>,

    #[serde(
        rename = "07. latest trading day",
        default,
        deserialize_with = "opt_string_to_date"
    )]
    pub latest_trading_day: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    pub quote: GlobalQuote,
}

/// Daily price history for one symbol with bars sorted ascending by date.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub symbol: String,
    pub bars: Vec<(NaiveDate, DailyBar)>,
}

impl PriceHistory {
    pub fn from_response(
        symbol: &str,
        response: DailyHistoryResponse,
    ) -> Result<Self, MarketDataError> {
        let mut bars = Vec::with_capacity(response.series.len());
        for (date_str, bar) in response.series {
            match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                Ok(date) => bars.push((date, bar)),
                Err(_) => return Err(MarketDataError::InvalidDateFormat(date_str)),
            }
        }
        bars.sort_by_key(|(date, _)| *date);

        Ok(PriceHistory {
            symbol: symbol.to_string(),
            bars,
        })
    }

    /// Bars falling inside [start, end], both bounds inclusive.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceHistory {
        PriceHistory {
            symbol: self.symbol.clone(),
            bars: self
                .bars
                .iter()
                .filter(|(date, _)| *date >= start && *date <= end)
                .cloned()
                .collect(),
        }
    }

    /// Close of the most recent bar, if any bars exist.
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|(_, bar)| bar.close)
    }

    /// Per-day dividend payments; zero amounts on non-payment days included.
    pub fn dividends(&self) -> Vec<(NaiveDate, f64)> {
        self.bars
            .iter()
            .map(|(date, bar)| (*date, bar.dividend_amount))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}
