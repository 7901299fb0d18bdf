//! Account balance aggregation across currencies.

use crate::core::model::{Account, Movement, MovementKind};
use crate::core::rates::RateTable;
use std::collections::HashMap;
use tracing::debug;

/// Balance of a single account, both native and in the display currency.
#[derive(Debug, Clone)]
pub struct AccountBalance {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub native: f64,
    pub converted: f64,
    pub share_pct: f64,
}

#[derive(Debug)]
pub struct BalanceReport {
    pub rows: Vec<AccountBalance>,
    pub total_converted: f64,
    pub display_currency: String,
    /// Index into `rows` of the account with the highest converted balance.
    /// Ties resolve to the first occurrence in account order.
    pub richest: Option<usize>,
}

/// Derives every account's balance from the movement list and converts it
/// into `display_currency`.
///
/// Income adds, expense subtracts, and a transfer moves the amount between
/// its two accounts without changing the aggregate total. Movements whose
/// currency differs from the account's native currency are converted before
/// being applied. Movements referencing unknown accounts are ignored.
pub fn balance_report(
    accounts: &[Account],
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
) -> BalanceReport {
    let currency_of: HashMap<&str, &str> = accounts
        .iter()
        .map(|a| (a.id.as_str(), a.currency.as_str()))
        .collect();

    let mut native: HashMap<String, f64> = HashMap::new();
    for movement in movements {
        let amount = movement.magnitude();
        let deltas: [(Option<&str>, f64); 2] = match movement.kind {
            MovementKind::Income => [(movement.account_id.as_deref(), amount), (None, 0.0)],
            MovementKind::Expense => [(movement.account_id.as_deref(), -amount), (None, 0.0)],
            MovementKind::Transfer => [
                (movement.from_account_id.as_deref(), -amount),
                (movement.to_account_id.as_deref(), amount),
            ],
        };
        for (account_id, delta) in deltas {
            let Some(id) = account_id else { continue };
            let Some(account_currency) = currency_of.get(id) else {
                debug!(account_id = id, "Movement references unknown account, skipping");
                continue;
            };
            let delta = rates.convert(delta, &movement.currency, account_currency);
            *native.entry(id.to_string()).or_insert(0.0) += delta;
        }
    }

    let mut rows: Vec<AccountBalance> = accounts
        .iter()
        .map(|account| {
            let native = native.get(account.id.as_str()).copied().unwrap_or(0.0);
            let converted = rates.convert(native, &account.currency, display_currency);
            AccountBalance {
                id: account.id.clone(),
                name: account.name.clone(),
                currency: account.currency.clone(),
                native,
                converted,
                share_pct: 0.0,
            }
        })
        .collect();

    let total_converted: f64 = rows.iter().map(|r| r.converted).sum();
    if total_converted != 0.0 {
        for row in &mut rows {
            row.share_pct = row.converted / total_converted * 100.0;
        }
    }

    // Strict greater-than so the first occurrence wins ties.
    let mut richest: Option<usize> = None;
    for (i, row) in rows.iter().enumerate() {
        match richest {
            Some(best) if rows[best].converted >= row.converted => {}
            _ => richest = Some(i),
        }
    }

    BalanceReport {
        rows,
        total_converted,
        display_currency: display_currency.to_string(),
        richest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account(id: &str, currency: &str) -> Account {
        Account {
            id: id.to_string(),
            name: format!("Account {id}"),
            currency: currency.to_string(),
        }
    }

    fn income(account_id: &str, amount: f64, currency: &str) -> Movement {
        Movement {
            id: format!("mv-{account_id}-{amount}"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            kind: MovementKind::Income,
            amount,
            currency: currency.to_string(),
            category: None,
            account_id: Some(account_id.to_string()),
            from_account_id: None,
            to_account_id: None,
            note: None,
        }
    }

    fn expense(account_id: &str, amount: f64, currency: &str) -> Movement {
        Movement {
            kind: MovementKind::Expense,
            ..income(account_id, amount, currency)
        }
    }

    fn transfer(from: &str, to: &str, amount: f64, currency: &str) -> Movement {
        Movement {
            id: format!("mv-t-{from}-{to}"),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            kind: MovementKind::Transfer,
            amount,
            currency: currency.to_string(),
            category: None,
            account_id: None,
            from_account_id: Some(from.to_string()),
            to_account_id: Some(to.to_string()),
            note: None,
        }
    }

    #[test]
    fn income_and_expense_apply_signed_deltas() {
        let accounts = vec![account("a1", "USD")];
        let movements = vec![
            income("a1", 100.0, "USD"),
            expense("a1", 30.0, "USD"),
        ];
        let report = balance_report(&accounts, &movements, &RateTable::default(), "USD");
        assert_eq!(report.rows[0].native, 70.0);
        assert_eq!(report.rows[0].converted, 70.0);
        assert_eq!(report.rows[0].share_pct, 100.0);
    }

    #[test]
    fn movement_currency_converted_into_account_currency() {
        let accounts = vec![account("a1", "UYU")];
        // 10 USD into a UYU account at the default 40 rate.
        let movements = vec![income("a1", 10.0, "USD")];
        let report = balance_report(&accounts, &movements, &RateTable::default(), "UYU");
        assert!((report.rows[0].native - 400.0).abs() < 1e-9);
    }

    #[test]
    fn transfers_never_change_the_aggregate_total() {
        let accounts = vec![account("a1", "USD"), account("a2", "USD")];
        let base = vec![income("a1", 500.0, "USD"), income("a2", 200.0, "USD")];

        let before = balance_report(&accounts, &base, &RateTable::default(), "USD");

        let mut with_transfer = base.clone();
        with_transfer.push(transfer("a1", "a2", 150.0, "USD"));
        let after = balance_report(&accounts, &with_transfer, &RateTable::default(), "USD");

        assert!((before.total_converted - after.total_converted).abs() < 1e-9);
        assert_eq!(after.rows[0].native, 350.0);
        assert_eq!(after.rows[1].native, 350.0);
    }

    #[test]
    fn unknown_account_reference_is_ignored() {
        let accounts = vec![account("a1", "USD")];
        let movements = vec![income("a1", 100.0, "USD"), income("ghost", 9999.0, "USD")];
        let report = balance_report(&accounts, &movements, &RateTable::default(), "USD");
        assert_eq!(report.total_converted, 100.0);
    }

    #[test]
    fn add_then_remove_restores_previous_balance() {
        let accounts = vec![account("a1", "USD")];
        let mut movements = vec![income("a1", 100.0, "USD")];
        let before = balance_report(&accounts, &movements, &RateTable::default(), "USD");

        movements.push(expense("a1", 40.0, "EUR"));
        movements.retain(|m| m.kind != MovementKind::Expense);
        let after = balance_report(&accounts, &movements, &RateTable::default(), "USD");

        assert_eq!(before.rows[0].native, after.rows[0].native);
    }

    #[test]
    fn richest_ties_resolve_to_first_account() {
        let accounts = vec![account("a1", "USD"), account("a2", "USD")];
        let movements = vec![income("a1", 100.0, "USD"), income("a2", 100.0, "USD")];
        let report = balance_report(&accounts, &movements, &RateTable::default(), "USD");
        assert_eq!(report.richest, Some(0));
        assert_eq!(report.rows[0].share_pct, 50.0);
    }

    #[test]
    fn empty_ledger_has_zero_shares() {
        let accounts = vec![account("a1", "USD"), account("a2", "EUR")];
        let report = balance_report(&accounts, &[], &RateTable::default(), "USD");
        assert_eq!(report.total_converted, 0.0);
        assert!(report.rows.iter().all(|r| r.share_pct == 0.0));
    }
}
