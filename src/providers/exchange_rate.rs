use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::RateProvider;

/// Rate provider backed by the exchangerate.host `latest` endpoint.
pub struct ExchangeRateHostProvider {
    base_url: String,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateHostProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    #[instrument(name = "RateFetch", skip(self), fields(reference = %reference))]
    async fn fetch(&self, reference: &str, symbols: &[&str]) -> Result<HashMap<String, f64>> {
        let url = format!(
            "{}/latest?base={}&symbols={}",
            self.base_url,
            reference,
            symbols.join(",")
        );
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("finctl/0.3").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Rate API returned {} for URL: {}", status, url));
        }

        let data = response.json::<LatestRatesResponse>().await?;
        if data.rates.is_empty() {
            return Err(anyhow!("Rate API returned no rates for base {reference}"));
        }
        debug!(count = data.rates.len(), "Received exchange rates");
        Ok(data.rates)
    }
}
