//! The append-only transaction file.

use crate::error::{Error, ErrorType, IntoResult, Res, Result};
use crate::model::{headers, Transaction, TransactionRow};
use crate::utils;
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Reads and appends rows of the CSV transaction file.
///
/// The file starts with the fixed header `Date,Amount,Description,Category,Account,User`. Rows
/// are only ever appended; nothing in the ledger rewrites an existing row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransactionStore {
    path: PathBuf,
}

impl TransactionStore {
    /// Creates the store and writes the header if the file is absent or empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header row if the file does not exist or has no content. Existing content is
    /// left untouched.
    pub fn initialize(&self) -> Result<()> {
        self.initialize_inner().pub_result(ErrorType::Io)
    }

    fn initialize_inner(&self) -> Res<()> {
        let is_empty = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Unable to inspect {}", self.path.display()))
            }
        };
        if !is_empty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::make_dir(parent)?;
        }
        debug!("Writing the transaction header to {}", self.path.display());
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Unable to create {}", self.path.display()))?;
        writer
            .write_record(headers())
            .context("Unable to write the transaction header")?;
        writer
            .flush()
            .with_context(|| format!("Unable to flush {}", self.path.display()))
    }

    /// Parses every row after the header.
    ///
    /// # Errors
    /// - `ErrorType::MalformedRow` naming the file line of the first row that cannot be parsed,
    ///   or if the header is not the expected one. No rows are skipped.
    /// - `ErrorType::Io` if the file cannot be opened.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .with_context(|| format!("Unable to open {}", self.path.display()))
            .pub_result(ErrorType::Io)?;

        let header = reader
            .headers()
            .context("Unable to read the transaction header")
            .pub_result(ErrorType::MalformedRow)?
            .clone();
        let found: Vec<&str> = header.iter().collect();
        let expected = headers();
        if found != expected {
            return Err(Error::new(
                ErrorType::MalformedRow,
                format!(
                    "Unexpected header in {}: expected '{}', found '{}'",
                    self.path.display(),
                    expected.join(","),
                    found.join(",")
                ),
            ));
        }

        let mut transactions = Vec::new();
        for result in reader.records() {
            // A quoted field may span lines, so take the line from the parser
            let (line, transaction) = match result {
                Ok(record) => (
                    record.position().map_or(0, |p| p.line()),
                    record
                        .deserialize::<TransactionRow>(Some(&header))
                        .map_err(anyhow::Error::from)
                        .and_then(Transaction::try_from),
                ),
                Err(e) => (
                    e.position().map_or(0, |p| p.line()),
                    Err(anyhow::Error::from(e)),
                ),
            };
            let transaction = transaction
                .with_context(|| {
                    format!("Malformed row at line {line} of {}", self.path.display())
                })
                .pub_result(ErrorType::MalformedRow)?;
            transactions.push(transaction);
        }

        debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }

    /// Writes exactly one row for `transaction` at the end of the file.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        self.initialize()?;
        self.append_inner(transaction).pub_result(ErrorType::Io)
    }

    fn append_inner(&self, transaction: &Transaction) -> Res<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Unable to open {} for appending", self.path.display()))?;

        // A hand-edited file may lack a trailing newline
        if !ends_with_newline(&mut file)? {
            trace!("Terminating the last line of {}", self.path.display());
            file.write_all(b"\n")
                .with_context(|| format!("Unable to write to {}", self.path.display()))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(transaction.to_row())
            .context("Unable to serialize the transaction")?;
        writer
            .flush()
            .with_context(|| format!("Unable to flush {}", self.path.display()))?;
        debug!(
            "Appended a {} transaction for {} to {}",
            transaction.amount(),
            transaction.user(),
            self.path.display()
        );
        Ok(())
    }
}

fn ends_with_newline(file: &mut std::fs::File) -> Res<bool> {
    let len = file.metadata().context("Unable to read file metadata")?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))
        .context("Unable to seek in the transaction file")?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)
        .context("Unable to read the transaction file")?;
    Ok(last[0] == b'\n')
}
