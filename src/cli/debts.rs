use super::ui;
use crate::core::Ledger;
use crate::core::debts::{DebtReport, debt_report};
use crate::core::model::DebtStatus;
use crate::core::rates::RateTable;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Color};

fn status_cell(status: DebtStatus) -> Cell {
    match status {
        DebtStatus::Active => Cell::new("active").fg(Color::Green),
        DebtStatus::Paid => Cell::new("paid").fg(Color::DarkGrey),
        DebtStatus::Overdue => Cell::new("overdue").fg(Color::Red),
        DebtStatus::Upcoming => Cell::new("upcoming").fg(Color::Yellow),
    }
}

impl DebtReport {
    pub fn display_as_table(&self, ledger: &Ledger) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Debt"),
            ui::header_cell("Account"),
            ui::header_cell(&format!("Total ({})", self.display_currency)),
            ui::header_cell(&format!("Installment ({})", self.display_currency)),
            ui::header_cell("Next due"),
            ui::header_cell("Status"),
        ]);

        for row in &self.rows {
            let account = ledger
                .account(&row.account_id)
                .map(|a| a.name.as_str())
                .unwrap_or(row.account_id.as_str());
            table.add_row(vec![
                Cell::new(&row.name),
                Cell::new(account),
                ui::amount_cell(row.total_converted),
                ui::amount_cell(row.installment_converted),
                Cell::new(
                    row.next_due_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                status_cell(row.status),
            ]);
        }

        let mut output = format!("{}\n\n", ui::style_text("Debts", ui::StyleType::Title));
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal debt: {} / Due this month: {} / Paid: {}",
            ui::format_amount(self.total_converted, &self.display_currency),
            ui::format_amount(self.due_this_month, &self.display_currency),
            ui::format_amount(self.paid_converted, &self.display_currency)
        ));
        output
    }
}

pub fn run(
    ledger: &Ledger,
    rates: &RateTable,
    display_currency: &str,
    today: NaiveDate,
) -> Result<()> {
    let report = debt_report(&ledger.debts, rates, display_currency, today);
    if report.rows.is_empty() {
        println!("No debts recorded.");
        return Ok(());
    }
    println!("{}", report.display_as_table(ledger));
    Ok(())
}
