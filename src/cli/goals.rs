use super::ui;
use crate::core::Ledger;
use crate::GoalsAction;
use anyhow::{Result, bail};
use comfy_table::{Cell, Color};

fn progress_cell(pct: f64) -> Cell {
    let cell = Cell::new(format!("{pct:.1}%")).set_alignment(comfy_table::CellAlignment::Right);
    if pct >= 100.0 {
        cell.fg(Color::Green)
    } else {
        cell
    }
}

fn display_as_table(ledger: &Ledger) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Goal"),
        ui::header_cell("Account"),
        ui::header_cell("Target"),
        ui::header_cell("Saved"),
        ui::header_cell("Progress"),
        ui::header_cell("Deadline"),
    ]);

    for goal in &ledger.goals {
        let (account_name, currency) = ledger
            .account(&goal.account_id)
            .map(|a| (a.name.as_str(), a.currency.as_str()))
            .unwrap_or((goal.account_id.as_str(), ""));
        table.add_row(vec![
            Cell::new(&goal.id),
            Cell::new(&goal.label),
            Cell::new(account_name),
            Cell::new(ui::format_amount(goal.target, currency)),
            Cell::new(ui::format_amount(goal.saved, currency)),
            progress_cell(goal.progress_pct()),
            Cell::new(
                goal.deadline
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Saving goals", ui::StyleType::Title));
    output.push_str(&table.to_string());
    output
}

/// Returns whether the ledger was modified.
pub fn run(ledger: &mut Ledger, action: GoalsAction) -> Result<bool> {
    match action {
        GoalsAction::List => {
            if ledger.goals.is_empty() {
                println!("No saving goals recorded.");
            } else {
                println!("{}", display_as_table(ledger));
            }
            Ok(false)
        }
        GoalsAction::Contribute { id, amount } => {
            if !amount.is_finite() || amount <= 0.0 {
                bail!("Contribution amount must be positive");
            }
            let Some(goal) = ledger.goal_mut(&id) else {
                bail!("No saving goal with id '{id}'");
            };
            goal.contribute(amount);
            println!(
                "Saved towards '{}': now at {:.1}% of the target",
                goal.label,
                goal.progress_pct()
            );
            Ok(true)
        }
    }
}
