//! These structs provide the CLI interface for the ledger program.

use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing::level_filters::LevelFilter;

/// ledger: A small interactive ledger for personal transactions.
///
/// Register a user, log in, and then record, list and summarize your transactions from a text
/// menu. Transactions are kept in a CSV file and users in a JSON file, both in the ledger home
/// directory. From the menu you can also draw a bar chart of spending per category and export
/// your transactions to an Excel workbook.
///
/// There are no subcommands. The menu is read from stdin, so the program can also be driven by
/// piping a script of answers into it.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }
}

/// Options that configure the program rather than any one menu operation.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. Logs are written to stderr, the menu to stdout.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// The directory where the ledger's configuration, users and transactions are held. Defaults
    /// to ~/ledger
    #[arg(long, env = "LEDGER_HOME", default_value_t = default_ledger_home())]
    ledger_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger_home(&self) -> &DisplayPath {
        &self.ledger_home
    }
}

fn default_ledger_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger-home or LEDGER_HOME instead of relying on the default \
                ledger home directory. Falling back to ./ledger",
            );
            PathBuf::from("ledger")
        }
    })
}

/// A `PathBuf` that implements `Display` so that it can be used as a clap default value.
#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "ledger",
            "--log-level",
            "debug",
            "--ledger-home",
            "/tmp/my-ledger",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert_eq!(args.common().ledger_home().path(), Path::new("/tmp/my-ledger"));
    }

    #[test]
    fn test_rejects_subcommands() {
        assert!(Args::try_parse_from(["ledger", "sync", "up"]).is_err());
    }
}
