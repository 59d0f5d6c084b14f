// src/render.rs

use comparison_server::models::ComparisonResponse;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub symbol: String,
    pub name: String,
    pub final_value: f64,
}

fn symbols_of(response: &ComparisonResponse) -> BTreeSet<String> {
    response
        .data
        .values()
        .flat_map(|row| row.keys().cloned())
        .collect()
}

/// Rank symbols by their last non-null cumulative value, descending.
pub fn final_ranking(response: &ComparisonResponse) -> Vec<RankedEntry> {
    let mut ranking: Vec<RankedEntry> = symbols_of(response)
        .into_iter()
        .map(|symbol| {
            let final_value = response
                .data
                .values()
                .rev()
                .find_map(|row| row.get(&symbol).copied().flatten())
                .unwrap_or(0.0);
            RankedEntry {
                name: response
                    .company_names
                    .get(&symbol)
                    .cloned()
                    .unwrap_or_else(|| symbol.clone()),
                symbol,
                final_value,
            }
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.final_value
            .partial_cmp(&a.final_value)
            .unwrap_or(Ordering::Equal)
    });
    ranking
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(width.min(BAR_WIDTH))
}

/// One block per symbol, one scaled bar per month. Months where a symbol
/// has no data render as a dash.
pub fn render_chart(response: &ComparisonResponse) -> String {
    let symbols = symbols_of(response);
    let max = response
        .data
        .values()
        .flat_map(|row| row.values().copied().flatten())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for symbol in &symbols {
        let name = response
            .company_names
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| symbol.clone());
        let _ = writeln!(out, "{}  {}", symbol, name);
        for (date, row) in &response.data {
            match row.get(symbol).copied().flatten() {
                Some(value) => {
                    let _ = writeln!(
                        out,
                        "  {} |{:<width$}| {:>10.2}",
                        date,
                        bar(value, max),
                        value,
                        width = BAR_WIDTH
                    );
                }
                None => {
                    let _ = writeln!(out, "  {} |{:<width$}| {:>10}", date, "", "-", width = BAR_WIDTH);
                }
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_ranking(ranking: &[RankedEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:<48} {:>12}", "Symbol", "Company", "Return ($)");
    for entry in ranking {
        let _ = writeln!(
            out,
            "{:<8} {:<48} {:>12.2}",
            entry.symbol, entry.name, entry.final_value
        );
    }
    out
}
