use super::ui;
use crate::core::Ledger;
use crate::core::cashflow::{DayFlow, daily_calendar};
use crate::core::rates::RateTable;
use anyhow::Result;
use comfy_table::Cell;

fn display_as_table(days: &[DayFlow], year: i32, month: u32, display_currency: &str) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Day"),
        ui::header_cell(&format!("Income ({display_currency})")),
        ui::header_cell(&format!("Expenses ({display_currency})")),
        ui::header_cell(&format!("Net ({display_currency})")),
    ]);

    for day in days {
        table.add_row(vec![
            Cell::new(&day.day),
            ui::amount_cell(day.income),
            ui::amount_cell(day.expense),
            ui::signed_amount_cell(day.net),
        ]);
    }

    let income: f64 = days.iter().map(|d| d.income).sum();
    let expense: f64 = days.iter().map(|d| d.expense).sum();

    let mut output = format!(
        "{}\n\n",
        ui::style_text(&format!("Calendar {year:04}-{month:02}"), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nIncome {} / Expenses {} / Net {}",
        ui::format_amount(income, display_currency),
        ui::format_amount(expense, display_currency),
        ui::format_amount(income - expense, display_currency)
    ));
    output
}

pub fn run(
    ledger: &Ledger,
    rates: &RateTable,
    display_currency: &str,
    year: i32,
    month: u32,
) -> Result<()> {
    let days = daily_calendar(&ledger.movements, rates, display_currency, year, month);
    println!("{}", display_as_table(&days, year, month, display_currency));
    Ok(())
}
