use super::ui;
use crate::core::Ledger;
use crate::core::cashflow::{MonthFlow, month_key, month_over_month, monthly_cashflow};
use crate::core::rates::RateTable;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

fn display_as_table(flows: &[MonthFlow], display_currency: &str) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell(&format!("Income ({display_currency})")),
        ui::header_cell(&format!("Expenses ({display_currency})")),
        ui::header_cell(&format!("Net ({display_currency})")),
    ]);

    for flow in flows {
        table.add_row(vec![
            Cell::new(&flow.month),
            ui::amount_cell(flow.income),
            ui::amount_cell(flow.expense),
            ui::signed_amount_cell(flow.net),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Cashflow", ui::StyleType::Title));
    output.push_str(&table.to_string());
    output
}

fn comparison_line(ledger: &Ledger, rates: &RateTable, display_currency: &str, flows: &[MonthFlow]) -> Option<String> {
    let [.., previous, current] = flows else {
        return None;
    };
    let delta = month_over_month(
        &ledger.movements,
        rates,
        display_currency,
        &previous.month,
        &current.month,
    );

    let direction = if delta.expense_delta >= 0.0 { "up" } else { "down" };
    let mut line = match delta.expense_delta_pct {
        Some(pct) => format!(
            "Expenses {direction} {:.1}% vs {} ({})",
            pct.abs(),
            previous.month,
            ui::format_amount(delta.expense_delta, display_currency)
        ),
        None => format!(
            "Expenses {direction} {} vs {}",
            ui::format_amount(delta.expense_delta, display_currency),
            previous.month
        ),
    };
    if let Some((category, increase)) = delta.top_increase {
        if increase > 0.0 {
            line.push_str(&format!(
                ", biggest increase: {category} (+{})",
                ui::format_amount(increase, display_currency)
            ));
        }
    }
    Some(line)
}

pub fn run(
    ledger: &Ledger,
    rates: &RateTable,
    display_currency: &str,
    anchor: NaiveDate,
    months: u32,
) -> Result<()> {
    let flows = monthly_cashflow(&ledger.movements, rates, display_currency, anchor, months);
    println!("{}", display_as_table(&flows, display_currency));

    if let Some(line) = comparison_line(ledger, rates, display_currency, &flows) {
        println!("\n{}", ui::style_text(&line, ui::StyleType::Subtle));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Movement, MovementKind};

    fn expense(amount: f64, date: (i32, u32, u32), category: &str) -> Movement {
        Movement {
            id: format!("mv-{}-{}", date.1, amount),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            kind: MovementKind::Expense,
            amount,
            currency: "USD".into(),
            category: Some(category.to_string()),
            account_id: Some("acc-1".into()),
            from_account_id: None,
            to_account_id: None,
            note: None,
        }
    }

    #[test]
    fn table_contains_every_window_month() {
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let flows = monthly_cashflow(&[], &RateTable::default(), "USD", anchor, 3);
        let rendered = display_as_table(&flows, "USD");
        for month in ["2024-04", "2024-05", "2024-06"] {
            assert!(rendered.contains(month), "missing {month}");
        }
    }

    #[test]
    fn comparison_line_reports_the_increase() {
        let ledger = Ledger {
            movements: vec![
                expense(100.0, (2024, 5, 5), "Food"),
                expense(150.0, (2024, 6, 5), "Food"),
            ],
            ..Ledger::default()
        };
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let flows = monthly_cashflow(&ledger.movements, &RateTable::default(), "USD", anchor, 2);
        let line = comparison_line(&ledger, &RateTable::default(), "USD", &flows).unwrap();
        assert!(line.contains("up 50.0%"), "got: {line}");
        assert!(line.contains("Food"), "got: {line}");
    }

    #[test]
    fn current_month_key_is_well_formed() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(month_key(date), "2024-01");
    }
}
