use super::ui;
use crate::core::model::{DepositStatus, TermDeposit};
use crate::core::Ledger;
use crate::DepositsAction;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Color};

fn status_cell(deposit: &TermDeposit, today: NaiveDate) -> Cell {
    if deposit.is_mature(today) {
        return Cell::new("mature").fg(Color::Yellow);
    }
    match deposit.status {
        DepositStatus::Active => Cell::new("active").fg(Color::Green),
        DepositStatus::Completed => Cell::new("completed").fg(Color::DarkGrey),
        DepositStatus::Cancelled => Cell::new("cancelled").fg(Color::DarkGrey),
    }
}

fn display_as_table(ledger: &Ledger, today: NaiveDate) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Account"),
        ui::header_cell("Principal"),
        ui::header_cell("Rate (%)"),
        ui::header_cell("Start"),
        ui::header_cell("End"),
        ui::header_cell("Projected"),
        ui::header_cell("Status"),
    ]);

    for deposit in &ledger.deposits {
        let account = ledger
            .account(&deposit.account_id)
            .map(|a| a.name.as_str())
            .unwrap_or(deposit.account_id.as_str());
        table.add_row(vec![
            Cell::new(&deposit.id),
            Cell::new(account),
            Cell::new(ui::format_amount(deposit.principal, &deposit.currency)),
            Cell::new(format!("{:.2}", deposit.annual_rate_pct))
                .set_alignment(comfy_table::CellAlignment::Right),
            Cell::new(deposit.start_date.to_string()),
            Cell::new(deposit.end_date.to_string()),
            Cell::new(ui::format_amount(
                deposit.projected_final_amount(),
                &deposit.currency,
            )),
            status_cell(deposit, today),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Term deposits", ui::StyleType::Title));
    output.push_str(&table.to_string());
    output
}

/// Returns whether the ledger was modified.
pub fn run(ledger: &mut Ledger, action: DepositsAction, today: NaiveDate) -> Result<bool> {
    match action {
        DepositsAction::List => {
            if ledger.deposits.is_empty() {
                println!("No term deposits recorded.");
            } else {
                println!("{}", display_as_table(ledger, today));
            }
            Ok(false)
        }
        DepositsAction::Complete { id } => {
            let Some(deposit) = ledger.deposit_mut(&id) else {
                bail!("No term deposit with id '{id}'");
            };
            // Completing twice is a no-op, not an error.
            if deposit.status == DepositStatus::Completed {
                println!("Term deposit '{id}' is already completed");
                return Ok(false);
            }
            if deposit.status == DepositStatus::Cancelled {
                bail!("Term deposit '{id}' was cancelled");
            }
            if !deposit.is_mature(today) {
                bail!(
                    "Term deposit '{id}' matures on {}, not completing it early",
                    deposit.end_date
                );
            }
            let payout = deposit.projected_final_amount();
            let currency = deposit.currency.clone();
            deposit.complete();
            println!(
                "Completed term deposit '{id}' with a final amount of {}",
                ui::format_amount(payout, &currency)
            );
            Ok(true)
        }
        DepositsAction::Cancel { id } => {
            let Some(deposit) = ledger.deposit_mut(&id) else {
                bail!("No term deposit with id '{id}'");
            };
            if deposit.status == DepositStatus::Cancelled {
                println!("Term deposit '{id}' is already cancelled");
                return Ok(false);
            }
            if deposit.status == DepositStatus::Completed {
                bail!("Term deposit '{id}' is already completed");
            }
            deposit.cancel();
            println!("Cancelled term deposit '{id}'");
            Ok(true)
        }
    }
}
