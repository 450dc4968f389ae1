//! Error types for the ledger.
//!
//! Internally, functions return `anyhow::Result` (aliased as `Res`) and attach context as they
//! go. At the boundary of each public operation the error is tagged with an `ErrorType` via
//! `IntoResult::pub_result`, which lets the menu loop decide whether to re-prompt, report or abort.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub(crate) type Res<T> = anyhow::Result<T>;

/// The result type returned by public operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The category of an `Error`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Bad user input such as an unparseable date, a non-positive amount, an unknown menu choice
    /// or mismatched password entries.
    Validation,
    /// The username and password did not match a stored credential.
    InvalidCredentials,
    /// Registration was attempted with a username that already exists.
    DuplicateUser,
    /// A row, or the header, of the transaction file could not be parsed.
    MalformedRow,
    /// A reporting feature was compiled out of this build.
    MissingDependency,
    /// A filesystem operation failed.
    Io,
    /// The configuration file is missing, unreadable or invalid.
    Config,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// The public error type. It carries an `ErrorType` and the underlying `anyhow` error chain.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub(crate) fn new(error_type: ErrorType, message: impl Display) -> Self {
        Self {
            error_type,
            inner: anyhow::anyhow!("{message}"),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Returns true if the error is one the user can fix by entering something else.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.error_type,
            ErrorType::Validation
                | ErrorType::InvalidCredentials
                | ErrorType::DuplicateUser
                | ErrorType::MissingDependency
        )
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts an internal result into the public `Result`, tagging any error with `error_type`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error {
            error_type,
            inner: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pub_result_keeps_context() {
        let res: Res<()> = Err(anyhow::anyhow!("disk on fire")).context("Unable to save users");
        let err = res.pub_result(ErrorType::Io).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
        assert_eq!(err.to_string(), "Unable to save users: disk on fire");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::DuplicateUser.to_string(), "duplicate_user");
        assert_eq!(
            "malformed_row".parse::<ErrorType>().unwrap(),
            ErrorType::MalformedRow
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::new(ErrorType::Validation, "bad date").is_recoverable());
        assert!(Error::new(ErrorType::InvalidCredentials, "nope").is_recoverable());
        assert!(!Error::new(ErrorType::MalformedRow, "row 3").is_recoverable());
    }
}
