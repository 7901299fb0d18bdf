//! Command implementations: thin rendering over the core aggregations.

pub mod balances;
pub mod budgets;
pub mod calendar;
pub mod cashflow;
pub mod debts;
pub mod deposits;
pub mod flows;
pub mod goals;
pub mod rates;
pub mod setup;
pub mod tx;
pub mod ui;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn current_month() -> String {
    crate::core::cashflow::month_key(today())
}

/// Parses a `YYYY-MM` month argument.
pub fn parse_month(value: &str) -> Result<(i32, u32)> {
    let (year, month) = value
        .split_once('-')
        .with_context(|| format!("Invalid month '{value}', expected YYYY-MM"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in month '{value}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{value}'"))?;
    if !(1..=12).contains(&month) {
        bail!("Month out of range in '{value}'");
    }
    Ok((year, month))
}

/// Month immediately before a `YYYY-MM` key.
pub fn previous_month(value: &str) -> Result<String> {
    let (year, month) = parse_month(value)?;
    let (year, month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    Ok(format!("{year:04}-{month:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_month_accepts_padded_keys() {
        assert_eq!(parse_month("2024-06").unwrap(), (2024, 6));
        assert_eq!(parse_month("1999-12").unwrap(), (1999, 12));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024").is_err());
        assert!(parse_month("abcd-ef").is_err());
    }

    #[test]
    fn previous_month_wraps_the_year() {
        assert_eq!(previous_month("2024-01").unwrap(), "2023-12");
        assert_eq!(previous_month("2024-06").unwrap(), "2024-05");
    }

    #[test]
    fn current_month_matches_key_format() {
        let month = current_month();
        assert!(parse_month(&month).is_ok());
    }
}
