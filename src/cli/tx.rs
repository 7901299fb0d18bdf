use crate::TxAction;
use crate::core::Ledger;
use crate::core::model::{Movement, MovementKind};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

fn parse_date(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match value {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD")),
        None => Ok(today),
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        bail!("Amount must be positive");
    }
    Ok(())
}

pub fn run(ledger: &mut Ledger, action: TxAction, today: NaiveDate) -> Result<()> {
    match action {
        TxAction::AddIncome {
            account,
            amount,
            currency,
            category,
            date,
            note,
        } => add_simple(
            ledger,
            MovementKind::Income,
            &account,
            amount,
            currency,
            category,
            date,
            note,
            today,
        ),
        TxAction::AddExpense {
            account,
            amount,
            currency,
            category,
            date,
            note,
        } => add_simple(
            ledger,
            MovementKind::Expense,
            &account,
            amount,
            currency,
            category,
            date,
            note,
            today,
        ),
        TxAction::AddTransfer {
            from,
            to,
            amount,
            currency,
            date,
            note,
        } => {
            check_amount(amount)?;
            if from == to {
                bail!("Transfer source and destination must differ");
            }
            let Some(from_account) = ledger.account(&from) else {
                bail!("Unknown account '{from}'");
            };
            if ledger.account(&to).is_none() {
                bail!("Unknown account '{to}'");
            }
            let currency = currency.unwrap_or_else(|| from_account.currency.clone());
            let date = parse_date(date.as_deref(), today)?;
            let id = ledger.add_movement(Movement {
                id: String::new(),
                date,
                kind: MovementKind::Transfer,
                amount,
                currency,
                category: None,
                account_id: None,
                from_account_id: Some(from.clone()),
                to_account_id: Some(to.clone()),
                note,
            });
            println!("Recorded transfer {from} -> {to} as {id}");
            Ok(())
        }
        TxAction::Remove { id } => {
            if !ledger.remove_movement(&id) {
                bail!("No movement with id '{id}'");
            }
            println!("Removed movement {id}");
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn add_simple(
    ledger: &mut Ledger,
    kind: MovementKind,
    account: &str,
    amount: f64,
    currency: Option<String>,
    category: Option<String>,
    date: Option<String>,
    note: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    check_amount(amount)?;
    let Some(target) = ledger.account(account) else {
        bail!("Unknown account '{account}'");
    };
    let currency = currency.unwrap_or_else(|| target.currency.clone());
    let date = parse_date(date.as_deref(), today)?;
    let label = match kind {
        MovementKind::Income => "income",
        MovementKind::Expense => "expense",
        MovementKind::Transfer => "transfer",
    };
    let id = ledger.add_movement(Movement {
        id: String::new(),
        date,
        kind,
        amount,
        currency,
        category,
        account_id: Some(account.to_string()),
        from_account_id: None,
        to_account_id: None,
        note,
    });
    println!("Recorded {label} of {amount:.2} as {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Account;

    fn ledger() -> Ledger {
        Ledger {
            accounts: vec![
                Account {
                    id: "cash".into(),
                    name: "Cash".into(),
                    currency: "UYU".into(),
                },
                Account {
                    id: "bank".into(),
                    name: "Bank".into(),
                    currency: "USD".into(),
                },
            ],
            ..Ledger::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn income_defaults_to_the_account_currency_and_today() {
        let mut ledger = ledger();
        run(
            &mut ledger,
            TxAction::AddIncome {
                account: "cash".into(),
                amount: 100.0,
                currency: None,
                category: Some("Salary".into()),
                date: None,
                note: None,
            },
            today(),
        )
        .unwrap();

        let movement = &ledger.movements[0];
        assert_eq!(movement.kind, MovementKind::Income);
        assert_eq!(movement.currency, "UYU");
        assert_eq!(movement.date, today());
        assert_eq!(movement.id, "mv-1");
    }

    #[test]
    fn expense_with_explicit_date_and_currency() {
        let mut ledger = ledger();
        run(
            &mut ledger,
            TxAction::AddExpense {
                account: "cash".into(),
                amount: 40.0,
                currency: Some("USD".into()),
                category: Some("Food".into()),
                date: Some("2024-06-01".into()),
                note: Some("groceries".into()),
            },
            today(),
        )
        .unwrap();

        let movement = &ledger.movements[0];
        assert_eq!(movement.currency, "USD");
        assert_eq!(movement.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn transfer_requires_two_known_distinct_accounts() {
        let mut ledger = ledger();
        assert!(
            run(
                &mut ledger,
                TxAction::AddTransfer {
                    from: "cash".into(),
                    to: "cash".into(),
                    amount: 10.0,
                    currency: None,
                    date: None,
                    note: None,
                },
                today(),
            )
            .is_err()
        );
        assert!(
            run(
                &mut ledger,
                TxAction::AddTransfer {
                    from: "cash".into(),
                    to: "ghost".into(),
                    amount: 10.0,
                    currency: None,
                    date: None,
                    note: None,
                },
                today(),
            )
            .is_err()
        );

        run(
            &mut ledger,
            TxAction::AddTransfer {
                from: "cash".into(),
                to: "bank".into(),
                amount: 10.0,
                currency: None,
                date: None,
                note: None,
            },
            today(),
        )
        .unwrap();
        let movement = &ledger.movements[0];
        assert_eq!(movement.kind, MovementKind::Transfer);
        assert_eq!(movement.currency, "UYU");
        assert_eq!(movement.from_account_id.as_deref(), Some("cash"));
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let mut ledger = ledger();
        let base = |amount: f64, date: Option<String>| TxAction::AddIncome {
            account: "cash".into(),
            amount,
            currency: None,
            category: None,
            date,
            note: None,
        };
        assert!(run(&mut ledger, base(-5.0, None), today()).is_err());
        assert!(run(&mut ledger, base(10.0, Some("junk".into())), today()).is_err());
        assert!(ledger.movements.is_empty());
    }

    #[test]
    fn remove_round_trips_an_add() {
        let mut ledger = ledger();
        run(
            &mut ledger,
            TxAction::AddIncome {
                account: "cash".into(),
                amount: 100.0,
                currency: None,
                category: None,
                date: None,
                note: None,
            },
            today(),
        )
        .unwrap();
        run(&mut ledger, TxAction::Remove { id: "mv-1".into() }, today()).unwrap();
        assert!(ledger.movements.is_empty());
        assert!(run(&mut ledger, TxAction::Remove { id: "mv-1".into() }, today()).is_err());
    }
}
