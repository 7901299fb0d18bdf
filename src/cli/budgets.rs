use super::ui;
use crate::core::Ledger;
use crate::core::budget::{BudgetReport, BudgetStatus, budget_report};
use crate::core::rates::RateTable;
use anyhow::Result;
use comfy_table::{Cell, Color};

fn status_cell(status: BudgetStatus) -> Cell {
    let cell = Cell::new(status.to_string());
    match status {
        BudgetStatus::FarOver | BudgetStatus::Over => cell.fg(Color::Red),
        BudgetStatus::High => cell.fg(Color::Yellow),
        BudgetStatus::OnTrack => cell.fg(Color::Green),
        BudgetStatus::NoLimit => cell.fg(Color::DarkGrey),
    }
}

impl BudgetReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell(&format!("Limit ({})", self.display_currency)),
            ui::header_cell(&format!("Spent ({})", self.display_currency)),
            ui::header_cell("Used (%)"),
            ui::header_cell("Status"),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.category),
                ui::amount_cell(row.limit_converted),
                ui::amount_cell(row.spent_converted),
                ui::percent_cell(row.percent_used),
                status_cell(row.status),
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text(&format!("Budgets for {}", self.month), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal: {} of {} ({:.1}%)",
            ui::format_amount(self.total_spent, &self.display_currency),
            ui::format_amount(self.total_limit, &self.display_currency),
            self.total_percent_used
        ));

        if !self.unbudgeted.is_empty() {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text("Unbudgeted spending:", ui::StyleType::TotalLabel)
            ));
            for (category, spent) in &self.unbudgeted {
                output.push_str(&format!(
                    "\n  {category}: {}",
                    ui::format_amount(*spent, &self.display_currency)
                ));
            }
        }

        output
    }
}

pub fn run(ledger: &Ledger, rates: &RateTable, month: &str, display_currency: &str) -> Result<()> {
    let report = budget_report(
        &ledger.budgets,
        &ledger.movements,
        month,
        rates,
        display_currency,
    );
    if report.rows.is_empty() && report.unbudgeted.is_empty() {
        println!("No budgets defined for {month}.");
        return Ok(());
    }
    println!("{}", report.display_as_table());
    Ok(())
}
