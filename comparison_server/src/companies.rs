// src/companies.rs

use std::collections::HashMap;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Reference data for the symbols the tool knows about. Loaded once, never
/// mutated; symbols outside this table still compute a return series.
pub const COMPANY_INFO: &[(&str, &str)] = &[
    ("T", "AT&T Inc."),
    ("O", "Realty Income Corporation"),
    ("PG", "Procter & Gamble Company"),
    ("JNJ", "Johnson & Johnson"),
    ("XOM", "Exxon Mobil Corporation"),
    ("KO", "The Coca-Cola Company"),
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("INTC", "Intel Corporation"),
    ("IBM", "International Business Machines Corporation"),
    ("CSCO", "Cisco Systems, Inc."),
    ("TXN", "Texas Instruments Incorporated"),
];

pub fn company_directory() -> HashMap<String, String> {
    COMPANY_INFO
        .iter()
        .map(|(symbol, name)| (symbol.to_string(), name.to_string()))
        .collect()
}

pub fn display_name(symbol: &str) -> String {
    COMPANY_INFO
        .iter()
        .find(|(known, _)| *known == symbol)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}
