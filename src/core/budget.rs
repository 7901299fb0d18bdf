//! Budget utilization tracking for one target month.

use crate::core::cashflow::month_key;
use crate::core::model::{Budget, Movement, MovementKind};
use crate::core::rates::RateTable;
use std::fmt::Display;

/// Status classification, first match wins in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    NoLimit,
    FarOver,
    Over,
    High,
    OnTrack,
}

impl BudgetStatus {
    pub fn classify(limit: f64, percent_used: f64) -> Self {
        if limit == 0.0 {
            BudgetStatus::NoLimit
        } else if percent_used >= 110.0 {
            BudgetStatus::FarOver
        } else if percent_used >= 100.0 {
            BudgetStatus::Over
        } else if percent_used >= 80.0 {
            BudgetStatus::High
        } else {
            BudgetStatus::OnTrack
        }
    }
}

impl Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BudgetStatus::NoLimit => "no amount set",
                BudgetStatus::FarOver => "far over",
                BudgetStatus::Over => "over",
                BudgetStatus::High => "high",
                BudgetStatus::OnTrack => "on track",
            }
        )
    }
}

#[derive(Debug, Clone)]
pub struct BudgetRow {
    pub category: String,
    pub limit_converted: f64,
    pub spent_converted: f64,
    /// 0 when no limit is set; the status carries the "no limit" sentinel.
    pub percent_used: f64,
    pub status: BudgetStatus,
}

#[derive(Debug)]
pub struct BudgetReport {
    pub month: String,
    pub display_currency: String,
    pub rows: Vec<BudgetRow>,
    pub total_limit: f64,
    pub total_spent: f64,
    pub total_percent_used: f64,
    /// Expense categories with spend this month but no budget, sorted by
    /// spend descending.
    pub unbudgeted: Vec<(String, f64)>,
}

fn category_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Computes per-category utilization for `month` (`YYYY-MM`).
///
/// Spent amounts sum the month's expense movements whose category matches
/// the budget's case-insensitively, converted to `display_currency`.
pub fn budget_report(
    budgets: &[Budget],
    movements: &[Movement],
    month: &str,
    rates: &RateTable,
    display_currency: &str,
) -> BudgetReport {
    let month_budgets: Vec<&Budget> = budgets.iter().filter(|b| b.month == month).collect();
    let month_expenses: Vec<&Movement> = movements
        .iter()
        .filter(|m| m.kind == MovementKind::Expense && month_key(m.date) == month)
        .collect();

    let rows: Vec<BudgetRow> = month_budgets
        .iter()
        .map(|budget| {
            let limit_converted = rates.convert(budget.limit, &budget.currency, display_currency);
            let budget_key = category_key(&budget.category);
            let spent_converted: f64 = month_expenses
                .iter()
                .filter(|m| {
                    m.category
                        .as_deref()
                        .map(|c| category_key(c) == budget_key)
                        .unwrap_or(false)
                })
                .map(|m| rates.convert(m.magnitude(), &m.currency, display_currency))
                .sum();

            let percent_used = if limit_converted > 0.0 {
                spent_converted / limit_converted * 100.0
            } else {
                0.0
            };

            BudgetRow {
                category: budget.category.clone(),
                limit_converted,
                spent_converted,
                percent_used,
                status: BudgetStatus::classify(limit_converted, percent_used),
            }
        })
        .collect();

    let total_limit: f64 = rows.iter().map(|r| r.limit_converted).sum();
    let total_spent: f64 = rows.iter().map(|r| r.spent_converted).sum();
    let total_percent_used = if total_limit > 0.0 {
        total_spent / total_limit * 100.0
    } else {
        0.0
    };

    // Expense categories present in movements but absent from any budget.
    // First-encountered display casing is kept; accumulation preserves
    // encounter order so equal spends sort deterministically.
    let budgeted: Vec<String> = month_budgets
        .iter()
        .map(|b| category_key(&b.category))
        .collect();
    let mut unbudgeted: Vec<(String, f64)> = Vec::new();
    for movement in &month_expenses {
        let Some(raw) = movement.category.as_deref() else { continue };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let key = category_key(raw);
        if budgeted.contains(&key) {
            continue;
        }
        let value = rates.convert(movement.magnitude(), &movement.currency, display_currency);
        match unbudgeted.iter_mut().find(|(c, _)| category_key(c) == key) {
            Some((_, total)) => *total += value,
            None => unbudgeted.push((raw.to_string(), value)),
        }
    }
    unbudgeted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    BudgetReport {
        month: month.to_string(),
        display_currency: display_currency.to_string(),
        rows,
        total_limit,
        total_spent,
        total_percent_used,
        unbudgeted,
    }
}

impl BudgetReport {
    /// Categories at or past their limit.
    pub fn over_limit(&self) -> Vec<&BudgetRow> {
        self.rows.iter().filter(|r| r.percent_used >= 100.0).collect()
    }

    /// Categories in the [80, 100) band.
    pub fn near_limit(&self) -> Vec<&BudgetRow> {
        self.rows
            .iter()
            .filter(|r| r.percent_used >= 80.0 && r.percent_used < 100.0)
            .collect()
    }

    /// Categories with some spend but at most 30% utilization.
    pub fn low_usage(&self) -> Vec<&BudgetRow> {
        self.rows
            .iter()
            .filter(|r| r.spent_converted > 0.0 && r.percent_used <= 30.0)
            .collect()
    }
}
