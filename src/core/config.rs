use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: "https://api.exchangerate.host".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Display currency for all converted figures.
    pub currency: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Currencies to request from the rate provider.
    #[serde(default = "default_symbols")]
    pub rate_symbols: Vec<String>,
    pub data_path: Option<String>,
}

fn default_symbols() -> Vec<String> {
    ["EUR", "UYU", "ARS", "BRL"].map(str::to_string).to_vec()
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "finctl", "finctl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "finctl", "finctl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Self::default_data_path()
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        Ok(self.data_path()?.join("ledger.yaml"))
    }

    pub fn rate_snapshot_path(&self) -> Result<PathBuf> {
        Ok(self.data_path()?.join("rates.json"))
    }

    pub fn provider_base_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map(|p| p.base_url.as_str())
            .unwrap_or("https://api.exchangerate.host")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
