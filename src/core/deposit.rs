//! Term-deposit projection and lifecycle.

use crate::core::model::{DepositStatus, TermDeposit};
use chrono::{Months, NaiveDate};

/// End date after a whole number of calendar months, not 30-day increments.
pub fn end_date_after(start: NaiveDate, months: u32) -> NaiveDate {
    start + Months::new(months)
}

/// Simple compound growth: `principal * (1 + rate/100) ^ (days / 365)`,
/// rounded to 2 decimal places. Negative ranges project no growth.
pub fn project_final_amount(
    principal: f64,
    annual_rate_pct: f64,
    start: NaiveDate,
    end: NaiveDate,
) -> f64 {
    let days = (end - start).num_days().max(0) as f64;
    let years = days / 365.0;
    let amount = principal * (1.0 + annual_rate_pct / 100.0).powf(years);
    (amount * 100.0).round() / 100.0
}

impl TermDeposit {
    pub fn projected_final_amount(&self) -> f64 {
        project_final_amount(self.principal, self.annual_rate_pct, self.start_date, self.end_date)
    }

    /// Eligible for completion: past its end date and still active.
    pub fn is_mature(&self, today: NaiveDate) -> bool {
        self.status == DepositStatus::Active && self.end_date <= today
    }

    /// Marks the deposit completed. Idempotent: completing a completed
    /// deposit is a no-op, and cancelled deposits are left unchanged.
    pub fn complete(&mut self) {
        if self.status == DepositStatus::Active {
            self.status = DepositStatus::Completed;
        }
    }

    /// Cancels an active deposit. Completed deposits are left unchanged.
    pub fn cancel(&mut self) {
        if self.status == DepositStatus::Active {
            self.status = DepositStatus::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(status: DepositStatus) -> TermDeposit {
        TermDeposit {
            id: "td-1".into(),
            account_id: "acc-1".into(),
            currency: "USD".into(),
            principal: 1000.0,
            annual_rate_pct: 10.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status,
        }
    }

    #[test]
    fn end_date_uses_calendar_month_arithmetic() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        // January 31 + 1 month clamps to February 29 (leap year).
        assert_eq!(end_date_after(start, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(end_date_after(start, 12), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn projection_compounds_over_actual_days() {
        // 366 days across a leap year: 1000 * 1.10^(366/365) = 1100.29.
        let amount = project_final_amount(
            1000.0,
            10.0,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert!((amount - 1100.29).abs() <= 0.01, "got {amount}");

        // A plain 365-day year yields exactly one compounding period.
        let amount = project_final_amount(
            2000.0,
            5.0,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!((amount - 2100.0).abs() <= 0.01, "got {amount}");
    }

    #[test]
    fn projection_clamps_negative_ranges_to_zero_days() {
        let amount = project_final_amount(
            1000.0,
            10.0,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert_eq!(amount, 1000.0);
    }

    #[test]
    fn maturity_requires_active_status_and_elapsed_end_date() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(deposit(DepositStatus::Active).is_mature(today));
        assert!(!deposit(DepositStatus::Completed).is_mature(today));

        let early = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert!(!deposit(DepositStatus::Active).is_mature(early));
    }

    #[test]
    fn completing_twice_is_a_noop() {
        let mut d = deposit(DepositStatus::Active);
        d.complete();
        assert_eq!(d.status, DepositStatus::Completed);
        d.complete();
        assert_eq!(d.status, DepositStatus::Completed);
    }

    #[test]
    fn cancelled_deposits_stay_cancelled() {
        let mut d = deposit(DepositStatus::Cancelled);
        d.complete();
        assert_eq!(d.status, DepositStatus::Cancelled);

        let mut d = deposit(DepositStatus::Completed);
        d.cancel();
        assert_eq!(d.status, DepositStatus::Completed);
    }
}
