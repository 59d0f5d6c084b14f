// src/returns.rs

use chrono::{Datelike, Duration, NaiveDate, Utc};
use market_data::client::MarketDataClient;
use market_data::models::{MarketDataError, PriceHistory};
use thiserror::Error;

/// Fixed hypothetical investment sized at the reference price.
pub const NOTIONAL_INVESTMENT: f64 = 1000.0;

// Window arithmetic uses a fixed 30-day month, not calendar months.
const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Error)]
pub enum ReturnsError {
    #[error("no price data available for {0} in the requested window")]
    NoPriceData(String),
    #[error(transparent)]
    Market(#[from] MarketDataError),
}

/// Cumulative simulated dividend income for one symbol, one point per month
/// in chronological order. Non-decreasing while dividends are non-negative.
#[derive(Debug, Clone)]
pub struct CumulativeReturn {
    pub symbol: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl CumulativeReturn {
    pub fn final_value(&self) -> Option<f64> {
        self.points.last().map(|(_, value)| *value)
    }
}

pub fn request_window(months: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(months as i64 * DAYS_PER_MONTH);
    (start, today)
}

/// Last calendar day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(date)
}

/// Sum daily dividend payments into calendar-month buckets labelled by month
/// end. Every month touching [start, end] gets a bucket, so a symbol that
/// paid nothing still yields a full-length series of zeros.
pub fn resample_monthly(
    dividends: &[(NaiveDate, f64)],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(NaiveDate, f64)> {
    let mut buckets: Vec<(NaiveDate, f64)> = Vec::new();
    let mut cursor = month_end(start);
    let last = month_end(end);
    while cursor <= last {
        buckets.push((cursor, 0.0));
        cursor = month_end(cursor + Duration::days(1));
    }

    for (date, amount) in dividends {
        if *date < start || *date > end {
            continue;
        }
        let label = month_end(*date);
        if let Some(bucket) = buckets.iter_mut().find(|(bucket_end, _)| *bucket_end == label) {
            bucket.1 += amount;
        }
    }

    buckets
}

/// Running sum across months, in chronological order.
pub fn cumulative(points: Vec<(NaiveDate, f64)>) -> Vec<(NaiveDate, f64)> {
    let mut total = 0.0;
    points
        .into_iter()
        .map(|(date, value)| {
            total += value;
            (date, total)
        })
        .collect()
}

/// Two-step reference-price resolution: the provider's current price when it
/// has one, otherwise the most recent close in the fetched window.
pub fn resolve_reference_price(current: Option<f64>, history: &PriceHistory) -> Option<f64> {
    current
        .filter(|price| *price > 0.0)
        .or_else(|| history.latest_close().filter(|price| *price > 0.0))
}

/// Simulate investing the fixed notional in `symbol` at the reference price
/// and accumulate the dividend income over the trailing window.
///
/// `today` is injectable so tests can pin the window; `None` means now.
pub async fn compute_dividend_return(
    client: &MarketDataClient,
    symbol: &str,
    months: u32,
    today: Option<NaiveDate>,
) -> Result<CumulativeReturn, ReturnsError> {
    let today = today.unwrap_or_else(|| Utc::now().naive_utc().date());
    let (start, end) = request_window(months, today);

    let history = client.fetch_daily_history(symbol).await?.between(start, end);
    let current_price = client.fetch_current_price(symbol).await?;

    let reference_price = resolve_reference_price(current_price, &history)
        .ok_or_else(|| ReturnsError::NoPriceData(symbol.to_string()))?;
    let shares = NOTIONAL_INVESTMENT / reference_price;

    let monthly_income: Vec<(NaiveDate, f64)> = resample_monthly(&history.dividends(), start, end)
        .into_iter()
        .map(|(month, total)| (month, total * shares))
        .collect();

    Ok(CumulativeReturn {
        symbol: symbol.to_string(),
        points: cumulative(monthly_income),
    })
}
