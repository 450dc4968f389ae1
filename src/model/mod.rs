//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod transaction;

pub use amount::{Amount, AmountError, AmountFormat};
pub(crate) use transaction::TransactionRow;
pub use transaction::{headers, parse_date, Transaction, TransactionColumn, COLUMNS, DATE_FORMAT};
