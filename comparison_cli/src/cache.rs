// src/cache.rs

use chrono::{DateTime, Duration, Utc};
use comparison_server::models::ComparisonResponse;
use std::collections::HashMap;

/// Cache key: normalized symbol set plus the month count. Symbol order and
/// case do not affect the result, so they do not affect the key either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    symbols: Vec<String>,
    months: u32,
}

impl CacheKey {
    pub fn new(symbols: &[String], months: u32) -> Self {
        let mut symbols: Vec<String> = symbols.iter().map(|s| s.to_uppercase()).collect();
        symbols.sort();
        CacheKey { symbols, months }
    }
}

struct CacheEntry {
    response: ComparisonResponse,
    fetched_at: DateTime<Utc>,
}

/// Session-scoped memoization of comparison responses with a fixed TTL.
/// The clock is passed in by the caller so expiry is testable.
pub struct ResponseCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<&ComparisonResponse> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .map(|entry| &entry.response)
    }

    pub fn insert(&mut self, key: CacheKey, response: ComparisonResponse, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                response,
                fetched_at: now,
            },
        );
    }

    pub fn purge_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now - entry.fetched_at < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
