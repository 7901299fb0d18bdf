use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finctl::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration and a starter ledger
    Setup,
    /// Display account balances in the display currency
    Balances,
    /// Display budget utilization for a month
    Budgets {
        /// Target month as YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Display monthly income and expenses
    Cashflow {
        /// Number of trailing months to include
        #[arg(short = 'n', long, default_value_t = 6)]
        months: u32,
    },
    /// Display a daily income/expense calendar for a month
    Calendar {
        /// Target month as YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Display the money flow graph
    Flows {
        /// Restrict to one month as YYYY-MM
        #[arg(short, long)]
        month: Option<String>,
        /// Emit the graph as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Display debts with converted totals and upcoming installments
    Debts,
    /// Manage term deposits
    Deposits {
        #[command(subcommand)]
        action: Option<DepositsCommand>,
    },
    /// Manage saving goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsCommand>,
    },
    /// Show or refresh exchange rates
    Rates {
        #[command(subcommand)]
        action: Option<RatesCommand>,
    },
    /// Record or remove movements
    Tx {
        #[command(subcommand)]
        action: TxCommand,
    },
}

#[derive(Subcommand)]
enum DepositsCommand {
    /// List deposits with their projected final amounts
    List,
    /// Mark a matured deposit as completed
    Complete { id: String },
    /// Cancel an active deposit
    Cancel { id: String },
}

#[derive(Subcommand)]
enum GoalsCommand {
    /// List saving goals with their progress
    List,
    /// Add a contribution to a goal
    Contribute { id: String, amount: f64 },
}

#[derive(Subcommand)]
enum RatesCommand {
    /// Show the current exchange-rate table
    Show,
    /// Force a refresh from the rate provider
    Refresh,
}

#[derive(Subcommand)]
enum TxCommand {
    /// Record an income movement
    Income {
        /// Account id the income lands in
        account: String,
        amount: f64,
        /// Movement currency, defaults to the account currency
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Movement date as YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Record an expense movement
    Expense {
        /// Account id the expense is paid from
        account: String,
        amount: f64,
        /// Movement currency, defaults to the account currency
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Movement date as YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Record a transfer between two accounts
    Transfer {
        from: String,
        to: String,
        amount: f64,
        /// Movement currency, defaults to the source account currency
        #[arg(long)]
        currency: Option<String>,
        /// Movement date as YYYY-MM-DD, defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove a movement by id
    Rm { id: String },
}

impl From<Commands> for finctl::AppCommand {
    fn from(cmd: Commands) -> finctl::AppCommand {
        match cmd {
            Commands::Balances => finctl::AppCommand::Balances,
            Commands::Budgets { month } => finctl::AppCommand::Budgets { month },
            Commands::Cashflow { months } => finctl::AppCommand::Cashflow { months },
            Commands::Calendar { month } => finctl::AppCommand::Calendar { month },
            Commands::Flows { month, json } => finctl::AppCommand::Flows { month, json },
            Commands::Debts => finctl::AppCommand::Debts,
            Commands::Deposits { action } => {
                finctl::AppCommand::Deposits(match action.unwrap_or(DepositsCommand::List) {
                    DepositsCommand::List => finctl::DepositsAction::List,
                    DepositsCommand::Complete { id } => finctl::DepositsAction::Complete { id },
                    DepositsCommand::Cancel { id } => finctl::DepositsAction::Cancel { id },
                })
            }
            Commands::Goals { action } => {
                finctl::AppCommand::Goals(match action.unwrap_or(GoalsCommand::List) {
                    GoalsCommand::List => finctl::GoalsAction::List,
                    GoalsCommand::Contribute { id, amount } => {
                        finctl::GoalsAction::Contribute { id, amount }
                    }
                })
            }
            Commands::Rates { action } => {
                finctl::AppCommand::Rates(match action.unwrap_or(RatesCommand::Show) {
                    RatesCommand::Show => finctl::RatesAction::Show,
                    RatesCommand::Refresh => finctl::RatesAction::Refresh,
                })
            }
            Commands::Tx { action } => finctl::AppCommand::Tx(match action {
                TxCommand::Income {
                    account,
                    amount,
                    currency,
                    category,
                    date,
                    note,
                } => finctl::TxAction::AddIncome {
                    account,
                    amount,
                    currency,
                    category,
                    date,
                    note,
                },
                TxCommand::Expense {
                    account,
                    amount,
                    currency,
                    category,
                    date,
                    note,
                } => finctl::TxAction::AddExpense {
                    account,
                    amount,
                    currency,
                    category,
                    date,
                    note,
                },
                TxCommand::Transfer {
                    from,
                    to,
                    amount,
                    currency,
                    date,
                    note,
                } => finctl::TxAction::AddTransfer {
                    from,
                    to,
                    amount,
                    currency,
                    date,
                    note,
                },
                TxCommand::Rm { id } => finctl::TxAction::Remove { id },
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => finctl::cli::setup::setup(),
        Some(cmd) => finctl::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
