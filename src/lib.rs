pub mod cli;
pub mod core;
pub mod providers;

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cli::ui;
use crate::core::Ledger;
use crate::core::config::AppConfig;
use crate::core::rates::{self, REFRESH_INTERVAL, RateService, RateTable};
use crate::providers::ExchangeRateHostProvider;

pub enum DepositsAction {
    List,
    Complete { id: String },
    Cancel { id: String },
}

pub enum GoalsAction {
    List,
    Contribute { id: String, amount: f64 },
}

pub enum RatesAction {
    Show,
    Refresh,
}

pub enum TxAction {
    AddIncome {
        account: String,
        amount: f64,
        currency: Option<String>,
        category: Option<String>,
        date: Option<String>,
        note: Option<String>,
    },
    AddExpense {
        account: String,
        amount: f64,
        currency: Option<String>,
        category: Option<String>,
        date: Option<String>,
        note: Option<String>,
    },
    AddTransfer {
        from: String,
        to: String,
        amount: f64,
        currency: Option<String>,
        date: Option<String>,
        note: Option<String>,
    },
    Remove {
        id: String,
    },
}

pub enum AppCommand {
    Balances,
    Budgets { month: Option<String> },
    Cashflow { months: u32 },
    Calendar { month: Option<String> },
    Flows { month: Option<String>, json: bool },
    Debts,
    Deposits(DepositsAction),
    Goals(GoalsAction),
    Rates(RatesAction),
    Tx(TxAction),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("finctl starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let ledger_path = config.ledger_path()?;
    let mut ledger = Ledger::load_from_path(&ledger_path)
        .context("No readable ledger found. Run `finctl setup` to create one")?;

    match command {
        AppCommand::Tx(action) => {
            cli::tx::run(&mut ledger, action, cli::today())?;
            ledger.save_to_path(&ledger_path)
        }
        AppCommand::Deposits(action) => {
            if cli::deposits::run(&mut ledger, action, cli::today())? {
                ledger.save_to_path(&ledger_path)?;
            }
            Ok(())
        }
        AppCommand::Goals(action) => {
            if cli::goals::run(&mut ledger, action)? {
                ledger.save_to_path(&ledger_path)?;
            }
            Ok(())
        }
        AppCommand::Rates(action) => {
            let service = rate_service(&config)?;
            if let RatesAction::Refresh = action {
                let pb = ui::new_spinner("Refreshing exchange rates...");
                let refreshed = service.refresh().await;
                pb.finish_and_clear();
                refreshed?;
                persist_snapshot(&config, &service).await?;
            }
            cli::rates::run(&service.snapshot().await, &config.currency);
            Ok(())
        }
        command => {
            let service = rate_service(&config)?;
            let refresh_task = service.spawn_refresh(REFRESH_INTERVAL.to_std()?);
            let table = refreshed_table(&config, &service).await?;
            let display_currency = config.currency.as_str();

            let result = match command {
                AppCommand::Balances => cli::balances::run(&ledger, &table, display_currency),
                AppCommand::Budgets { month } => {
                    let month = month.unwrap_or_else(cli::current_month);
                    cli::budgets::run(&ledger, &table, &month, display_currency)
                }
                AppCommand::Cashflow { months } => {
                    cli::cashflow::run(&ledger, &table, display_currency, cli::today(), months)
                }
                AppCommand::Calendar { month } => {
                    let month = month.unwrap_or_else(cli::current_month);
                    let (year, month) = cli::parse_month(&month)?;
                    cli::calendar::run(&ledger, &table, display_currency, year, month)
                }
                AppCommand::Flows { month, json } => {
                    cli::flows::run(&ledger, &table, display_currency, month.as_deref(), json)
                }
                AppCommand::Debts => {
                    cli::debts::run(&ledger, &table, display_currency, cli::today())
                }
                _ => unreachable!("Ledger-mutating commands are handled above"),
            };

            refresh_task.stop();
            result
        }
    }
}

fn rate_service(config: &AppConfig) -> Result<RateService> {
    let snapshot_path = config.rate_snapshot_path()?;
    let snapshot = rates::load_snapshot(&snapshot_path).unwrap_or_default();
    let provider = Arc::new(ExchangeRateHostProvider::new(config.provider_base_url()));
    let symbols: Vec<&str> = config.rate_symbols.iter().map(String::as_str).collect();
    Ok(RateService::new(snapshot, provider, &symbols))
}

/// Returns the table to report with, refreshing first when the snapshot is
/// older than the staleness window. A failed refresh degrades to the last
/// known table instead of aborting the report.
async fn refreshed_table(config: &AppConfig, service: &RateService) -> Result<RateTable> {
    if service.snapshot().await.is_stale(Utc::now()) {
        let pb = ui::new_spinner("Refreshing exchange rates...");
        match service.refresh().await {
            Ok(()) => persist_snapshot(config, service).await?,
            Err(e) => warn!(error = %e, "Reporting with previously known rates"),
        }
        pb.finish_and_clear();
    }
    Ok(service.snapshot().await.table)
}

async fn persist_snapshot(config: &AppConfig, service: &RateService) -> Result<()> {
    let path = config.rate_snapshot_path()?;
    rates::save_snapshot(&path, &service.snapshot().await)
}
