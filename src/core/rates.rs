//! Exchange-rate table and conversion, plus the shared refreshable snapshot.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Currency all rates are expressed relative to.
pub const REFERENCE_CURRENCY: &str = "USD";

/// How old a fetched table may get before a foreground refresh is forced.
pub const STALE_AFTER: Duration = Duration::hours(12);

/// Interval for the background refresh task.
pub const REFRESH_INTERVAL: Duration = Duration::hours(6);

/// Fetches exchange rates for a set of currencies relative to `reference`.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch(&self, reference: &str, symbols: &[&str]) -> Result<HashMap<String, f64>>;
}

/// Value of one reference unit in each quoted currency.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RateTable {
    pub reference: String,
    rates: HashMap<String, f64>,
}

impl Default for RateTable {
    /// Fixed fallback table used when no fetched rates are available.
    fn default() -> Self {
        let rates = HashMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.92),
            ("UYU".to_string(), 40.0),
            ("ARS".to_string(), 900.0),
            ("BRL".to_string(), 5.5),
        ]);
        RateTable {
            reference: REFERENCE_CURRENCY.to_string(),
            rates,
        }
    }
}

impl RateTable {
    /// Builds a table from fetched rates. The reference currency's own rate
    /// is pinned to exactly 1 regardless of what the source returned.
    pub fn from_rates(reference: &str, mut rates: HashMap<String, f64>) -> Self {
        rates.insert(reference.to_string(), 1.0);
        RateTable {
            reference: reference.to_string(),
            rates,
        }
    }

    /// Rate for a currency. Unknown currencies fall back to the default
    /// table, then to 1.0, so conversion never errors (the report layer
    /// must always render something).
    pub fn rate(&self, currency: &str) -> f64 {
        if let Some(rate) = self.rates.get(currency) {
            return *rate;
        }
        debug!(currency, "Rate missing, falling back to default table");
        *RateTable::default().rates.get(currency).unwrap_or(&1.0)
    }

    /// Converts `amount` between currencies through the reference currency.
    /// Same-currency conversion is an exact no-op.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        if from == to {
            return amount;
        }
        amount / self.rate(from) * self.rate(to)
    }

    pub fn currencies(&self) -> Vec<(&str, f64)> {
        let mut list: Vec<(&str, f64)> = self
            .rates
            .iter()
            .map(|(c, r)| (c.as_str(), *r))
            .collect();
        list.sort_by(|a, b| a.0.cmp(b.0));
        list
    }
}

/// The last successfully fetched table together with its fetch time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateSnapshot {
    pub table: RateTable,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for RateSnapshot {
    fn default() -> Self {
        RateSnapshot {
            table: RateTable::default(),
            fetched_at: None,
        }
    }
}

impl RateSnapshot {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.fetched_at {
            Some(at) => now - at > STALE_AFTER,
            None => true,
        }
    }
}

/// Reads a previously persisted snapshot; `None` when the file does not
/// exist yet or cannot be parsed (the default table takes over).
pub fn load_snapshot<P: AsRef<std::path::Path>>(path: P) -> Option<RateSnapshot> {
    let raw = std::fs::read_to_string(path.as_ref()).ok()?;
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable rate snapshot");
            None
        }
    }
}

/// Persists the snapshot so later runs can reuse it within the staleness
/// window.
pub fn save_snapshot<P: AsRef<std::path::Path>>(path: P, snapshot: &RateSnapshot) -> Result<()> {
    use anyhow::Context;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let raw = serde_json::to_string_pretty(snapshot).context("Failed to serialize rate snapshot")?;
    std::fs::write(path.as_ref(), raw)
        .with_context(|| format!("Failed to write rate snapshot: {}", path.as_ref().display()))?;
    Ok(())
}

/// Process-wide owner of the rate snapshot. Readers always see the last
/// successfully fetched table; a failed refresh leaves it in place.
#[derive(Clone)]
pub struct RateService {
    snapshot: Arc<RwLock<RateSnapshot>>,
    provider: Arc<dyn RateProvider>,
    symbols: Vec<String>,
}

impl RateService {
    pub fn new(initial: RateSnapshot, provider: Arc<dyn RateProvider>, symbols: &[&str]) -> Self {
        RateService {
            snapshot: Arc::new(RwLock::new(initial)),
            provider,
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub async fn snapshot(&self) -> RateSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetches a fresh table and swaps it in. On failure the previous
    /// snapshot stays untouched (stale-but-available over unavailable).
    pub async fn refresh(&self) -> Result<()> {
        let symbols: Vec<&str> = self.symbols.iter().map(|s| s.as_str()).collect();
        match self.provider.fetch(REFERENCE_CURRENCY, &symbols).await {
            Ok(rates) => {
                let table = RateTable::from_rates(REFERENCE_CURRENCY, rates);
                let mut snapshot = self.snapshot.write().await;
                *snapshot = RateSnapshot {
                    table,
                    fetched_at: Some(Utc::now()),
                };
                debug!("Rate snapshot refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Rate refresh failed, keeping previous table");
                Err(e)
            }
        }
    }

    /// Refreshes only when the current snapshot is older than [`STALE_AFTER`].
    pub async fn refresh_if_stale(&self) -> Result<bool> {
        let stale = self.snapshot.read().await.is_stale(Utc::now());
        if !stale {
            return Ok(false);
        }
        self.refresh().await.map(|_| true)
    }

    /// Spawns the periodic background refresh. The returned task must be
    /// stopped by its owner on shutdown; dropping it aborts the loop.
    pub fn spawn_refresh(&self, interval: std::time::Duration) -> RefreshTask {
        let service = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick fires immediately; skip it, the caller already has
            // a snapshot.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = service.refresh().await;
            }
        });
        RefreshTask { handle }
    }
}

/// Owner handle for the background refresh loop.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
