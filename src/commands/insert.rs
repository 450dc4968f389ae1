//! Insert command handler.

use crate::commands::Out;
use crate::error::Result;
use crate::model::Transaction;
use crate::store::Ledger;

/// Appends `transaction` to the transaction file and to the loaded ledger.
///
/// # Errors
///
/// - Returns an `ErrorType::Io` error if the row cannot be written. The in-memory ledger is left
///   unchanged in that case.
pub fn add_transaction(ledger: &mut Ledger, transaction: Transaction) -> Result<Out<Transaction>> {
    let added = ledger.add(transaction)?.clone();
    let message = format!(
        "Added {} for '{}' on {} to {}",
        added.amount().currency(),
        added.category(),
        added.date(),
        added.account()
    );
    Ok(Out::new(message, added))
}
