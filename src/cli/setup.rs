use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Creates the default configuration and a starter ledger at the default
/// locations.
pub fn setup() -> Result<()> {
    let config_path = AppConfig::default_config_path()?;
    let data_dir = AppConfig::default_data_path()?;
    setup_at(&config_path, &data_dir)
}

/// Creates the configuration at `config_path` and a starter ledger under
/// `data_dir`. An existing configuration is never overwritten; an existing
/// ledger is left alone.
pub fn setup_at<P: AsRef<Path>, Q: AsRef<Path>>(config_path: P, data_dir: Q) -> Result<()> {
    let config_path = config_path.as_ref();
    if config_path.exists() {
        anyhow::bail!("Configuration file already exists at {}", config_path.display());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Include the example config as a string literal in the binary
    let default_config = include_str!("../../docs/example_config.yaml");
    std::fs::write(config_path, default_config)
        .with_context(|| format!("Failed to write config file to {}", config_path.display()))?;
    tracing::info!("Created default configuration at {}", config_path.display());

    let ledger_path = data_dir.as_ref().join("ledger.yaml");
    if !ledger_path.exists() {
        std::fs::create_dir_all(data_dir.as_ref()).with_context(|| {
            format!("Failed to create directory: {}", data_dir.as_ref().display())
        })?;
        let starter_ledger = include_str!("../../docs/example_ledger.yaml");
        std::fs::write(&ledger_path, starter_ledger)
            .with_context(|| format!("Failed to write ledger file to {}", ledger_path.display()))?;
        tracing::info!("Created starter ledger at {}", ledger_path.display());
    }

    Ok(())
}
