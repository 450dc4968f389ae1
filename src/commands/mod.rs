//! Command handlers for the ledger.
//!
//! Each menu operation is implemented here as a plain function over explicit store handles. The
//! session controller gathers input, calls one of these, and shows the returned `Out` message.

mod auth;
mod insert;
mod query;
mod report;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use auth::{login, register};
pub use insert::add_transaction;
pub use query::{detailed_summary, summarize, view, Detail};
pub use report::{chart, export};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be shown to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    pub fn into_structure(self) -> Option<T> {
        self.structure
    }

    /// Logs the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn log(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// "1 transaction", "2 transactions"
pub(crate) fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out() {
        let out: Out<u32> = "hello".into();
        assert_eq!(out.message(), "hello");
        assert!(out.structure().is_none());

        let out = Out::new("numbers", vec![1, 2]);
        assert_eq!(out.structure(), Some(&vec![1, 2]));
        assert_eq!(out.into_structure(), Some(vec![1, 2]));
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "row", "rows"), "0 rows");
        assert_eq!(plural(1, "row", "rows"), "1 row");
        assert_eq!(plural(3, "category", "categories"), "3 categories");
    }
}
