//! Core business logic: data model, conversion, and aggregation.

pub mod balance;
pub mod budget;
pub mod cashflow;
pub mod config;
pub mod debts;
pub mod deposit;
pub mod flows;
pub mod ledger;
pub mod log;
pub mod model;
pub mod rates;

// Re-export main types for cleaner imports
pub use ledger::Ledger;
pub use model::{
    Account, Budget, Debt, DebtStatus, DepositStatus, Movement, MovementKind, SavingGoal,
    TermDeposit,
};
pub use rates::{RateProvider, RateService, RateSnapshot, RateTable};
