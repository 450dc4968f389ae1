//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{parse_date, Amount, Transaction};
use crate::store::{CredentialStore, Ledger, TransactionStore};
use crate::Config;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a ledger home directory with a `Config`.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a ledger home whose config never opens a chart viewer.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("ledger");
        std::fs::create_dir(&home).unwrap();
        std::fs::write(
            home.join("config.json"),
            r#"{ "app_name": "ledger", "config_version": 1, "open_chart": false }"#,
        )
        .unwrap();
        let config = Config::load_or_create(home).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::open(self.config.users_path()).unwrap()
    }

    pub fn transactions(&self) -> TransactionStore {
        TransactionStore::open(self.config.transactions_path()).unwrap()
    }

    /// Loads a fresh `Ledger` from the transaction file.
    pub fn ledger(&self) -> Ledger {
        Ledger::open(self.transactions()).unwrap()
    }

    /// Appends a transaction directly to the transaction file.
    pub fn add(&self, date: &str, amount: &str, category: &str, user: &str) -> Transaction {
        let transaction = Transaction::new(
            parse_date(date).unwrap(),
            Amount::from_str(amount).unwrap(),
            format!("{category} purchase"),
            category,
            "checking",
            user,
        )
        .unwrap();
        self.transactions().append(&transaction).unwrap();
        transaction
    }
}
