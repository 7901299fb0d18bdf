//! Ledger data model: accounts, movements, budgets, goals, deposits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Native currency the account is denominated in. Balances are always
    /// derived from movements, never stored.
    pub currency: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    Income,
    Expense,
    Transfer,
}

/// A single dated financial event. `amount` is a non-negative magnitude;
/// the sign is derived from `kind` when aggregating.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Movement {
    pub id: String,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Set for income/expense movements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Source account for transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account_id: Option<String>,
    /// Destination account for transfers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Movement {
    /// Magnitude guarded against bad records: negative, NaN or infinite
    /// amounts contribute zero instead of poisoning a whole report.
    pub fn magnitude(&self) -> f64 {
        if self.amount.is_finite() && self.amount > 0.0 {
            self.amount
        } else {
            0.0
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit: f64,
    pub currency: String,
    /// Target month as `YYYY-MM`.
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SavingGoal {
    pub id: String,
    pub account_id: String,
    pub label: String,
    pub target: f64,
    #[serde(default)]
    pub saved: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl SavingGoal {
    /// Progress towards the target, capped at 100. A goal without a target
    /// reports 0 rather than dividing by zero.
    pub fn progress_pct(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.saved / self.target * 100.0).min(100.0)
    }

    pub fn contribute(&mut self, amount: f64) {
        if amount.is_finite() {
            self.saved += amount;
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    Active,
    Paid,
    Overdue,
    Upcoming,
}

/// An outstanding obligation paid off in monthly installments.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub account_id: String,
    /// Remaining amount owed, in `currency`.
    pub total: f64,
    pub currency: String,
    pub monthly_payment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    pub status: DebtStatus,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TermDeposit {
    pub id: String,
    pub account_id: String,
    pub currency: String,
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: DepositStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_guards_bad_amounts() {
        let mut m = Movement {
            id: "m1".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            kind: MovementKind::Income,
            amount: 25.0,
            currency: "USD".into(),
            category: None,
            account_id: Some("a1".into()),
            from_account_id: None,
            to_account_id: None,
            note: None,
        };
        assert_eq!(m.magnitude(), 25.0);

        m.amount = f64::NAN;
        assert_eq!(m.magnitude(), 0.0);
        m.amount = -10.0;
        assert_eq!(m.magnitude(), 0.0);
        m.amount = f64::INFINITY;
        assert_eq!(m.magnitude(), 0.0);
    }

    #[test]
    fn goal_progress_caps_at_100() {
        let mut goal = SavingGoal {
            id: "g1".into(),
            account_id: "a1".into(),
            label: "Vacation".into(),
            target: 200.0,
            saved: 50.0,
            deadline: None,
        };
        assert_eq!(goal.progress_pct(), 25.0);

        goal.contribute(500.0);
        assert_eq!(goal.progress_pct(), 100.0);

        goal.target = 0.0;
        assert_eq!(goal.progress_pct(), 0.0);
    }

    #[test]
    fn movement_yaml_roundtrip_keeps_kind_tags() {
        let yaml = r#"
id: "mv-1"
date: 2024-03-15
kind: EXPENSE
amount: 12.5
currency: "EUR"
category: "Food"
account_id: "acc-1"
"#;
        let m: Movement = serde_yaml::from_str(yaml).expect("Failed to deserialize");
        assert_eq!(m.kind, MovementKind::Expense);
        assert_eq!(m.amount, 12.5);
        assert_eq!(m.category.as_deref(), Some("Food"));
        assert!(m.from_account_id.is_none());
    }
}
