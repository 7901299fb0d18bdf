//! Money flow graph (Sankey): income categories into accounts, accounts
//! into expense categories.

use crate::core::model::{Account, Movement, MovementKind};
use crate::core::rates::RateTable;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowNodeType {
    Income,
    Account,
    Category,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: FlowNodeType,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Default)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

/// Builder keeping nodes and links in first-insertion order, with hash
/// lookups on the side, so identical inputs produce identical graphs.
struct GraphBuilder {
    nodes: Vec<FlowNode>,
    node_index: HashMap<String, usize>,
    links: Vec<FlowLink>,
    link_index: HashMap<(String, String), usize>,
}

impl GraphBuilder {
    fn new() -> Self {
        GraphBuilder {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            links: Vec::new(),
            link_index: HashMap::new(),
        }
    }

    fn ensure_node(&mut self, id: &str, name: &str, node_type: FlowNodeType) {
        if self.node_index.contains_key(id) {
            return;
        }
        self.node_index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(FlowNode {
            id: id.to_string(),
            name: name.to_string(),
            node_type,
        });
    }

    fn add_link(&mut self, source: &str, target: &str, value: f64) {
        let key = (source.to_string(), target.to_string());
        match self.link_index.get(&key) {
            Some(&i) => self.links[i].value += value,
            None => {
                self.link_index.insert(key, self.links.len());
                self.links.push(FlowLink {
                    source: source.to_string(),
                    target: target.to_string(),
                    value,
                });
            }
        }
    }

    fn build(self) -> FlowGraph {
        FlowGraph {
            nodes: self.nodes,
            links: self.links,
        }
    }
}

/// Builds the flow graph for one month's movements.
///
/// An income movement contributes an edge income-category -> account, an
/// expense movement an edge account -> expense-category; edge weights
/// accumulate per (source, target). Transfers and non-positive amounts are
/// excluded. Values are converted to `display_currency`.
pub fn cashflow_graph(
    accounts: &[Account],
    movements: &[Movement],
    rates: &RateTable,
    display_currency: &str,
) -> FlowGraph {
    let account_names: HashMap<&str, &str> = accounts
        .iter()
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .collect();

    let mut graph = GraphBuilder::new();
    for movement in movements {
        let amount = rates.convert(movement.magnitude(), &movement.currency, display_currency);
        if amount <= 0.0 {
            continue;
        }

        let category = movement
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let account_id = movement.account_id.as_deref().unwrap_or("unknown");
        let account_node_id = format!("account:{account_id}");
        let account_name = account_names
            .get(account_id)
            .copied()
            .unwrap_or("(unknown account)");

        match movement.kind {
            MovementKind::Income => {
                let category = category.unwrap_or("Income");
                let income_node_id = format!("income:{category}");
                graph.ensure_node(&income_node_id, category, FlowNodeType::Income);
                graph.ensure_node(&account_node_id, account_name, FlowNodeType::Account);
                graph.add_link(&income_node_id, &account_node_id, amount);
            }
            MovementKind::Expense => {
                let category = category.unwrap_or("Expenses");
                let category_node_id = format!("category:{category}");
                graph.ensure_node(&account_node_id, account_name, FlowNodeType::Account);
                graph.ensure_node(&category_node_id, category, FlowNodeType::Category);
                graph.add_link(&account_node_id, &category_node_id, amount);
            }
            MovementKind::Transfer => {}
        }
    }

    graph.build()
}
