//! File-backed persistence: the credential file and the transaction file.

mod credentials;
mod transactions;

pub use credentials::{CredentialStore, Credentials, PasswordScheme, Plaintext};
pub use transactions::TransactionStore;

use crate::error::Result;
use crate::model::Transaction;

/// The transaction file together with every transaction loaded from it.
///
/// The whole file is read once when the ledger is opened. `add` appends to the file first and
/// only then to memory, so a failed write never leaves a phantom record in memory.
#[derive(Debug, Clone)]
pub struct Ledger {
    store: TransactionStore,
    records: Vec<Transaction>,
}

impl Ledger {
    /// Loads every transaction held by `store`.
    pub fn open(store: TransactionStore) -> Result<Self> {
        let records = store.load_all()?;
        Ok(Self { store, records })
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// All transactions in the order they were recorded.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn add(&mut self, transaction: Transaction) -> Result<&Transaction> {
        self.store.append(&transaction)?;
        self.records.push(transaction);
        Ok(&self.records[self.records.len() - 1])
    }
}
