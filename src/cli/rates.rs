use super::ui;
use crate::core::rates::{RateSnapshot, REFERENCE_CURRENCY};
use chrono::Utc;
use comfy_table::Cell;

pub fn run(snapshot: &RateSnapshot, display_currency: &str) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {REFERENCE_CURRENCY}")),
    ]);

    for (currency, rate) in snapshot.table.currencies() {
        table.add_row(vec![
            Cell::new(currency),
            Cell::new(format!("{rate:.4}")).set_alignment(comfy_table::CellAlignment::Right),
        ]);
    }

    println!("{}\n", ui::style_text("Exchange rates", ui::StyleType::Title));
    println!("{table}");

    let fetched = match snapshot.fetched_at {
        Some(at) => format!("Fetched {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => "Built-in fallback rates".to_string(),
    };
    let staleness = if snapshot.is_stale(Utc::now()) {
        " (stale)"
    } else {
        ""
    };
    println!(
        "\n{}",
        ui::style_text(
            &format!("{fetched}{staleness}, display currency {display_currency}"),
            ui::StyleType::Subtle
        )
    );
}
