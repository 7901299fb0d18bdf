use super::ui;
use crate::core::Ledger;
use crate::core::cashflow::month_key;
use crate::core::flows::{FlowGraph, cashflow_graph};
use crate::core::model::Movement;
use crate::core::rates::RateTable;
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::collections::HashMap;

impl FlowGraph {
    pub fn display_as_table(&self, display_currency: &str) -> String {
        let names: HashMap<&str, &str> = self
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.name.as_str()))
            .collect();

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell(&format!("Amount ({display_currency})")),
        ]);

        for link in &self.links {
            let source = names
                .get(link.source.as_str())
                .copied()
                .unwrap_or(link.source.as_str());
            let target = names
                .get(link.target.as_str())
                .copied()
                .unwrap_or(link.target.as_str());
            table.add_row(vec![
                Cell::new(source),
                Cell::new(target),
                ui::amount_cell(link.value),
            ]);
        }

        let mut output = format!("{}\n\n", ui::style_text("Money flows", ui::StyleType::Title));
        output.push_str(&table.to_string());
        output
    }
}

pub fn run(
    ledger: &Ledger,
    rates: &RateTable,
    display_currency: &str,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let filtered: Vec<Movement>;
    let movements: &[Movement] = match month {
        Some(month) => {
            filtered = ledger
                .movements
                .iter()
                .filter(|m| month_key(m.date) == month)
                .cloned()
                .collect();
            &filtered
        }
        None => &ledger.movements,
    };

    let graph = cashflow_graph(&ledger.accounts, movements, rates, display_currency);

    if json {
        let raw = serde_json::to_string_pretty(&graph).context("Failed to serialize flow graph")?;
        println!("{raw}");
        return Ok(());
    }

    if graph.links.is_empty() {
        println!("No money flows to display.");
        return Ok(());
    }
    println!("{}", graph.display_as_table(display_currency));
    Ok(())
}
