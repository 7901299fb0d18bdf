use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned money cell.
pub fn amount_cell(amount: f64) -> Cell {
    Cell::new(group_thousands(amount)).set_alignment(CellAlignment::Right)
}

/// Money cell colored by sign; used for nets and deltas.
pub fn signed_amount_cell(amount: f64) -> Cell {
    let cell = amount_cell(amount);
    if amount >= 0.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

/// Creates a cell for displaying percentage values with color coding.
pub fn percent_cell(value: f64) -> Cell {
    let text = format!("{value:.1}%");
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if value >= 100.0 {
        cell.fg(Color::Red)
    } else if value >= 80.0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Green)
    }
}

/// Formats an amount that is ALREADY in `currency`. Purely presentational;
/// callers convert first.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{} {}", group_thousands(amount), currency)
}

fn group_thousands(amount: f64) -> String {
    let raw = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Creates a spinner for the rate refresh.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(1234567.891, "USD"), "1,234,567.89 USD");
        assert_eq!(format_amount(999.9, "EUR"), "999.90 EUR");
        assert_eq!(format_amount(0.0, "UYU"), "0.00 UYU");
        assert_eq!(format_amount(-1500.0, "ARS"), "-1,500.00 ARS");
    }
}
