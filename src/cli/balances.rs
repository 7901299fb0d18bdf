use super::ui;
use crate::core::Ledger;
use crate::core::balance::{BalanceReport, balance_report};
use crate::core::rates::RateTable;
use anyhow::Result;
use comfy_table::Cell;

impl BalanceReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Account"),
            ui::header_cell("Currency"),
            ui::header_cell("Balance"),
            ui::header_cell(&format!("Balance ({})", self.display_currency)),
            ui::header_cell("Share (%)"),
        ]);

        for (i, row) in self.rows.iter().enumerate() {
            let name = if self.richest == Some(i) && self.rows.len() > 1 {
                format!("{} *", row.name)
            } else {
                row.name.clone()
            };
            table.add_row(vec![
                Cell::new(name),
                Cell::new(&row.currency),
                ui::amount_cell(row.native),
                ui::amount_cell(row.converted),
                Cell::new(format!("{:.1}", row.share_pct))
                    .set_alignment(comfy_table::CellAlignment::Right),
            ]);
        }

        let mut output = format!("{}\n\n", ui::style_text("Accounts", ui::StyleType::Title));
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\nTotal ({}): {}",
            ui::style_text(&self.display_currency, ui::StyleType::TotalLabel),
            ui::style_text(
                &ui::format_amount(self.total_converted, &self.display_currency),
                ui::StyleType::TotalValue
            )
        ));

        output
    }
}

pub fn run(ledger: &Ledger, rates: &RateTable, display_currency: &str) -> Result<()> {
    let report = balance_report(&ledger.accounts, &ledger.movements, rates, display_currency);
    println!("{}", report.display_as_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Account, Movement, MovementKind};
    use chrono::NaiveDate;

    #[test]
    fn table_lists_accounts_and_total() {
        let accounts = vec![Account {
            id: "acc-1".into(),
            name: "Checking".into(),
            currency: "USD".into(),
        }];
        let movements = vec![Movement {
            id: "mv-1".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            kind: MovementKind::Income,
            amount: 1500.0,
            currency: "USD".into(),
            category: None,
            account_id: Some("acc-1".into()),
            from_account_id: None,
            to_account_id: None,
            note: None,
        }];
        let report = balance_report(&accounts, &movements, &RateTable::default(), "USD");
        let rendered = report.display_as_table();
        assert!(rendered.contains("Checking"));
        assert!(rendered.contains("1,500.00"));
        assert!(rendered.contains("Total"));
    }
}
