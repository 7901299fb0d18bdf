//! Debt overview: outstanding totals, this month's installments, and the
//! historic paid amount, all converted to the display currency.

use crate::core::model::{Debt, DebtStatus};
use crate::core::rates::RateTable;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone)]
pub struct DebtRow {
    pub id: String,
    pub name: String,
    pub account_id: String,
    pub total_converted: f64,
    pub installment_converted: f64,
    pub next_due_date: Option<NaiveDate>,
    pub status: DebtStatus,
}

#[derive(Debug)]
pub struct DebtReport {
    pub display_currency: String,
    pub rows: Vec<DebtRow>,
    /// Sum of every recorded debt's remaining amount, paid ones included.
    pub total_converted: f64,
    /// Installments falling due in `today`'s month, paid debts excluded.
    pub due_this_month: f64,
    /// Historic total of debts marked paid.
    pub paid_converted: f64,
}

pub fn debt_report(
    debts: &[Debt],
    rates: &RateTable,
    display_currency: &str,
    today: NaiveDate,
) -> DebtReport {
    let mut total_converted = 0.0;
    let mut due_this_month = 0.0;
    let mut paid_converted = 0.0;

    let rows: Vec<DebtRow> = debts
        .iter()
        .map(|debt| {
            let total = rates.convert(debt.total, &debt.currency, display_currency);
            let installment =
                rates.convert(debt.monthly_payment, &debt.currency, display_currency);

            total_converted += total;
            if debt.status == DebtStatus::Paid {
                paid_converted += total;
            } else if let Some(due) = debt.next_due_date {
                if due.year() == today.year() && due.month() == today.month() {
                    due_this_month += installment;
                }
            }

            DebtRow {
                id: debt.id.clone(),
                name: debt.name.clone(),
                account_id: debt.account_id.clone(),
                total_converted: total,
                installment_converted: installment,
                next_due_date: debt.next_due_date,
                status: debt.status,
            }
        })
        .collect();

    DebtReport {
        display_currency: display_currency.to_string(),
        rows,
        total_converted,
        due_this_month,
        paid_converted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt(id: &str, total: f64, currency: &str, status: DebtStatus) -> Debt {
        Debt {
            id: id.to_string(),
            name: format!("Debt {id}"),
            account_id: "bank".into(),
            total,
            currency: currency.to_string(),
            monthly_payment: total / 10.0,
            next_due_date: NaiveDate::from_ymd_opt(2024, 6, 20),
            status,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn totals_convert_into_the_display_currency() {
        // 920 EUR at the default 0.92 rate is 1000 USD.
        let debts = vec![debt("d-1", 920.0, "EUR", DebtStatus::Active)];
        let report = debt_report(&debts, &RateTable::default(), "USD", today());
        assert!((report.total_converted - 1000.0).abs() < 1e-9);
        assert!((report.rows[0].installment_converted - 100.0).abs() < 1e-9);
        assert!((report.due_this_month - 100.0).abs() < 1e-9);
        assert_eq!(report.paid_converted, 0.0);
    }

    #[test]
    fn paid_debts_count_towards_paid_but_not_installments() {
        let debts = vec![
            debt("d-1", 500.0, "USD", DebtStatus::Active),
            debt("d-2", 300.0, "USD", DebtStatus::Paid),
        ];
        let report = debt_report(&debts, &RateTable::default(), "USD", today());
        assert_eq!(report.total_converted, 800.0);
        assert_eq!(report.paid_converted, 300.0);
        assert_eq!(report.due_this_month, 50.0);
    }

    #[test]
    fn installments_outside_the_current_month_are_excluded() {
        let mut due_later = debt("d-1", 500.0, "USD", DebtStatus::Active);
        due_later.next_due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        let mut no_due_date = debt("d-2", 200.0, "USD", DebtStatus::Overdue);
        no_due_date.next_due_date = None;

        let report = debt_report(
            &[due_later, no_due_date],
            &RateTable::default(),
            "USD",
            today(),
        );
        assert_eq!(report.due_this_month, 0.0);
        assert_eq!(report.total_converted, 700.0);
    }

    #[test]
    fn empty_debt_list_yields_zero_totals() {
        let report = debt_report(&[], &RateTable::default(), "USD", today());
        assert!(report.rows.is_empty());
        assert_eq!(report.total_converted, 0.0);
        assert_eq!(report.due_this_month, 0.0);
        assert_eq!(report.paid_converted, 0.0);
    }
}
