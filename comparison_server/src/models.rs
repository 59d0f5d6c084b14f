// src/models.rs

use crate::returns::CumulativeReturn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use validator::Validate;

pub const MAX_SYMBOLS: usize = 6;

/// Upper bound on the window length. Keeps the 30-day window arithmetic far
/// inside chrono's representable date range.
pub const MAX_MONTHS: u32 = 120;

/// Raw query-string shape of a comparison request.
#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub symbols: String,
}

/// Parsed comparison request. The symbol-count guard runs before any
/// provider call is made.
#[derive(Debug, Validate)]
pub struct ComparisonRequest {
    #[validate(length(max = 6, message = "Maximum 6 companies allowed"))]
    pub symbols: Vec<String>,
}

impl ComparisonRequest {
    pub fn from_query(query: &ComparisonQuery) -> Self {
        let symbols = query
            .symbols
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        ComparisonRequest { symbols }
    }
}

/// Per-symbol series aligned on a common monthly axis. Outer key is the
/// ISO month-end date; a symbol missing that month serializes as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub data: BTreeMap<String, HashMap<String, Option<f64>>>,
    pub company_names: HashMap<String, String>,
}

impl ComparisonResponse {
    /// Left-join the series on the union of their dates. A series shorter
    /// than the axis contributes nulls, never disappears.
    pub fn from_series(
        series: &[CumulativeReturn],
        company_names: HashMap<String, String>,
    ) -> Self {
        let mut data: BTreeMap<String, HashMap<String, Option<f64>>> = BTreeMap::new();
        for returns in series {
            for (date, _) in &returns.points {
                data.entry(date.format("%Y-%m-%d").to_string()).or_default();
            }
        }

        for returns in series {
            let by_date: HashMap<String, f64> = returns
                .points
                .iter()
                .map(|(date, value)| (date.format("%Y-%m-%d").to_string(), *value))
                .collect();
            for (date, row) in data.iter_mut() {
                row.insert(returns.symbol.clone(), by_date.get(date).copied());
            }
        }

        ComparisonResponse {
            data,
            company_names,
        }
    }
}

/// Error body shape shared by every 4xx/5xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
