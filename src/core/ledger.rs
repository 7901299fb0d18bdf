//! The ledger file: a YAML document holding all user records.

use crate::core::model::{Account, Budget, Debt, Movement, SavingGoal, TermDeposit};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Ledger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<SavingGoal>,
    #[serde(default)]
    pub deposits: Vec<TermDeposit>,
    #[serde(default)]
    pub debts: Vec<Debt>,
}

impl Ledger {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read ledger file: {}", path.as_ref().display()))?;
        let ledger: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse ledger file: {}", path.as_ref().display()))?;
        debug!(
            accounts = ledger.accounts.len(),
            movements = ledger.movements.len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = serde_yaml::to_string(self).context("Failed to serialize ledger")?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path.as_ref(), raw)
            .with_context(|| format!("Failed to write ledger file: {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Appends a movement, assigning the next free `mv-N` identifier.
    pub fn add_movement(&mut self, mut movement: Movement) -> String {
        if movement.id.is_empty() {
            movement.id = self.next_id("mv");
        }
        let id = movement.id.clone();
        self.movements.push(movement);
        id
    }

    /// Removes a movement by id. Balances are derived from the movement
    /// list, so removal reverses exactly the delta the movement applied.
    pub fn remove_movement(&mut self, id: &str) -> bool {
        let before = self.movements.len();
        self.movements.retain(|m| m.id != id);
        self.movements.len() != before
    }

    pub fn deposit_mut(&mut self, id: &str) -> Option<&mut TermDeposit> {
        self.deposits.iter_mut().find(|d| d.id == id)
    }

    pub fn goal_mut(&mut self, id: &str) -> Option<&mut SavingGoal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    fn next_id(&self, prefix: &str) -> String {
        let max = self
            .movements
            .iter()
            .filter_map(|m| m.id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{}-{}", prefix, max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::MovementKind;
    use chrono::NaiveDate;

    fn movement(id: &str, amount: f64) -> Movement {
        Movement {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            kind: MovementKind::Income,
            amount,
            currency: "USD".into(),
            category: None,
            account_id: Some("acc-1".into()),
            from_account_id: None,
            to_account_id: None,
            note: None,
        }
    }

    #[test]
    fn add_movement_assigns_sequential_ids() {
        let mut ledger = Ledger::default();
        let first = ledger.add_movement(movement("", 10.0));
        let second = ledger.add_movement(movement("", 20.0));
        assert_eq!(first, "mv-1");
        assert_eq!(second, "mv-2");

        // Explicit ids are kept as-is and counted for the next assignment.
        ledger.add_movement(movement("mv-9", 5.0));
        assert_eq!(ledger.add_movement(movement("", 1.0)), "mv-10");
    }

    #[test]
    fn remove_movement_reports_whether_found() {
        let mut ledger = Ledger::default();
        ledger.add_movement(movement("mv-1", 10.0));
        assert!(ledger.remove_movement("mv-1"));
        assert!(!ledger.remove_movement("mv-1"));
        assert!(ledger.movements.is_empty());
    }

    #[test]
    fn ledger_roundtrips_through_yaml_file() {
        let mut ledger = Ledger::default();
        ledger.accounts.push(Account {
            id: "acc-1".into(),
            name: "Checking".into(),
            currency: "USD".into(),
        });
        ledger.add_movement(movement("", 42.0));

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ledger.yaml");
        ledger.save_to_path(&path).expect("Failed to save ledger");

        let loaded = Ledger::load_from_path(&path).expect("Failed to load ledger");
        assert_eq!(loaded.accounts.len(), 1);
        assert_eq!(loaded.movements.len(), 1);
        assert_eq!(loaded.movements[0].amount, 42.0);
    }
}
