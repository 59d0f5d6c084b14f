// src/client.rs

use anyhow::bail;
use comparison_server::models::{ComparisonResponse, ErrorDetail};
use std::collections::HashMap;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ComparisonClient {
    pub path: String,
    pub client: reqwest::blocking::Client,
}

impl ComparisonClient {
    pub fn new(path: String) -> Self {
        Self {
            path,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn company_list(&self) -> anyhow::Result<HashMap<String, String>> {
        let response = self
            .client
            .get(self.path.clone() + "/company_list")
            .timeout(REQUEST_TIMEOUT)
            .send()?;
        Ok(response.error_for_status()?.json()?)
    }

    pub fn dividend_comparison(
        &self,
        symbols: &[String],
        months: u32,
    ) -> anyhow::Result<ComparisonResponse> {
        let url = format!("{}/dividend_comparison/{}", self.path, months);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols.join(","))])
            .timeout(REQUEST_TIMEOUT)
            .send()?;

        if !response.status().is_success() {
            let detail = response
                .json::<ErrorDetail>()
                .map(|e| e.detail)
                .unwrap_or_else(|_| "unexpected server error".to_string());
            bail!(detail);
        }

        Ok(response.json()?)
    }
}
