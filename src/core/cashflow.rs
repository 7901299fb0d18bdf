//! Time-bucketed income/expense series: monthly windows, daily calendars,
//! and month-over-month comparison.

use crate::core::model::{Movement, MovementKind};
use crate::core::rates::RateTable;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// `YYYY-MM` key; zero-padded so lexicographic order is chronological.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `YYYY-MM-DD` key with the same ordering property.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(30)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthFlow {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayFlow {
    pub day: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub is_positive: bool,
}

/// Month-over-month expense comparison between two adjacent months.
#[derive(Debug, Clone)]
pub struct MonthDelta {
    pub expense_delta: f64,
    /// None when the previous month had no spend (no meaningful percentage).
    pub expense_delta_pct: Option<f64>,
    /// Category with the largest absolute increase in spend, with its
    /// increase. Ties resolve to the first-encountered category.
    pub top_increase: Option<(String, f64)>,
}

fn converted(movement: &Movement, rates: &RateTable, display_currency: &str) -> f64 {
    rates.convert(movement.magnitude(), &movement.currency, display_currency)
}

/// Buckets income/expense by calendar month over a trailing window of
/// `window` months ending at `anchor`'s month, newest last.
///
/// Every month of the window is present even with no movements; charts
/// need contiguous buckets.
pub fn monthly_cashflow(
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
    anchor: NaiveDate,
    window: u32,
) -> Vec<MonthFlow> {
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();
    for movement in movements {
        let amount = converted(movement, rates, display_currency);
        let entry = sums.entry(month_key(movement.date)).or_insert((0.0, 0.0));
        match movement.kind {
            MovementKind::Income => entry.0 += amount,
            MovementKind::Expense => entry.1 += amount,
            MovementKind::Transfer => {}
        }
    }

    let mut months: Vec<String> = Vec::with_capacity(window as usize);
    let (mut year, mut month) = (anchor.year(), anchor.month());
    for _ in 0..window {
        months.push(format!("{year:04}-{month:02}"));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();

    months
        .into_iter()
        .map(|key| {
            let (income, expense) = sums.get(&key).copied().unwrap_or((0.0, 0.0));
            MonthFlow {
                month: key,
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Buckets one calendar month by day. Every day of the month appears in the
/// output, zero-filled when empty; `is_positive` reflects `net >= 0`.
pub fn daily_calendar(
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
    year: i32,
    month: u32,
) -> Vec<DayFlow> {
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();
    for movement in movements {
        if movement.date.year() != year || movement.date.month() != month {
            continue;
        }
        let amount = converted(movement, rates, display_currency);
        let entry = sums.entry(day_key(movement.date)).or_insert((0.0, 0.0));
        match movement.kind {
            MovementKind::Income => entry.0 += amount,
            MovementKind::Expense => entry.1 += amount,
            MovementKind::Transfer => {}
        }
    }

    (1..=days_in_month(year, month))
        .map(|day| {
            let key = format!("{year:04}-{month:02}-{day:02}");
            let (income, expense) = sums.get(&key).copied().unwrap_or((0.0, 0.0));
            let net = income - expense;
            DayFlow {
                day: key,
                income,
                expense,
                net,
                is_positive: net >= 0.0,
            }
        })
        .collect()
}

/// Per-category expense sums for one month, in first-encountered order.
fn expense_by_category(
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
    month: &str,
) -> Vec<(String, f64)> {
    let mut sums: Vec<(String, f64)> = Vec::new();
    for movement in movements {
        if movement.kind != MovementKind::Expense || month_key(movement.date) != month {
            continue;
        }
        let category = movement
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("(uncategorized)");
        let key = category.to_lowercase();
        let value = converted(movement, rates, display_currency);
        match sums.iter_mut().find(|(c, _)| c.to_lowercase() == key) {
            Some((_, total)) => *total += value,
            None => sums.push((category.to_string(), value)),
        }
    }
    sums
}

/// Compares total expenses of two adjacent months and finds the category
/// with the largest absolute increase.
pub fn month_over_month(
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
    previous_month: &str,
    current_month: &str,
) -> MonthDelta {
    let previous = expense_by_category(movements, rates, display_currency, previous_month);
    let current = expense_by_category(movements, rates, display_currency, current_month);

    let previous_total: f64 = previous.iter().map(|(_, v)| v).sum();
    let current_total: f64 = current.iter().map(|(_, v)| v).sum();
    let expense_delta = current_total - previous_total;
    let expense_delta_pct = if previous_total > 0.0 {
        Some(expense_delta / previous_total * 100.0)
    } else {
        None
    };

    let previous_by_key: HashMap<String, f64> = previous
        .iter()
        .map(|(c, v)| (c.to_lowercase(), *v))
        .collect();
    let current_keys: Vec<String> = current.iter().map(|(c, _)| c.to_lowercase()).collect();

    // Current-month categories first, then categories only seen in the
    // previous month; strict greater-than keeps the first on ties.
    let mut top_increase: Option<(String, f64)> = None;
    let previous_only = previous
        .iter()
        .filter(|(c, _)| !current_keys.contains(&c.to_lowercase()))
        .map(|(c, v)| (c.clone(), -v));
    for (category, increase) in current
        .iter()
        .map(|(c, v)| {
            let before = previous_by_key.get(&c.to_lowercase()).copied().unwrap_or(0.0);
            (c.clone(), v - before)
        })
        .chain(previous_only)
    {
        match &top_increase {
            Some((_, best)) if *best >= increase => {}
            _ => top_increase = Some((category, increase)),
        }
    }

    MonthDelta {
        expense_delta,
        expense_delta_pct,
        top_increase,
    }
}
