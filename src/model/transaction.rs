use crate::error::{Error, ErrorType, Res, Result};
use crate::model::Amount;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The date format used in the transaction file and at the prompt.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded monetary movement owned by one user.
///
/// Transactions are validated on construction: the amount must be greater than zero. Once
/// appended to the ledger they are never changed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    date: NaiveDate,
    amount: Amount,
    description: String,
    category: String,
    account: String,
    user: String,
}

impl Transaction {
    /// Creates a transaction, failing with `ErrorType::Validation` if `amount` is not positive.
    pub fn new(
        date: NaiveDate,
        amount: Amount,
        description: impl Into<String>,
        category: impl Into<String>,
        account: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<Self> {
        if !amount.is_positive() {
            return Err(Error::new(
                ErrorType::Validation,
                format!("The amount must be greater than zero, got {amount}"),
            ));
        }
        Ok(Self {
            date,
            amount: amount.plain(),
            description: description.into(),
            category: category.into(),
            account: account.into(),
            user: user.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The values of this transaction in `COLUMNS` order, as written to the transaction file.
    pub(crate) fn to_row(&self) -> TransactionRow {
        TransactionRow {
            date: self.date.format(DATE_FORMAT).to_string(),
            amount: self.amount.plain().to_string(),
            description: self.description.clone(),
            category: self.category.clone(),
            account: self.account.clone(),
            user: self.user.clone(),
        }
    }
}

/// Parses a `YYYY-MM-DD` string into a date, failing with `ErrorType::Validation`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        Error::new(
            ErrorType::Validation,
            format!("'{s}' is not a valid date in YYYY-MM-DD format: {e}"),
        )
    })
}

/// Represents the known columns of the transaction file, in file order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum TransactionColumn {
    Date,
    Amount,
    Description,
    Category,
    Account,
    User,
}

serde_plain::derive_display_from_serialize!(TransactionColumn);
serde_plain::derive_fromstr_from_deserialize!(TransactionColumn);

/// The header row of the transaction file.
pub const COLUMNS: [TransactionColumn; 6] = [
    TransactionColumn::Date,
    TransactionColumn::Amount,
    TransactionColumn::Description,
    TransactionColumn::Category,
    TransactionColumn::Account,
    TransactionColumn::User,
];

impl TransactionColumn {
    pub fn header(&self) -> String {
        self.to_string()
    }
}

/// Returns the header strings in file order.
pub fn headers() -> Vec<String> {
    COLUMNS.iter().map(|c| c.header()).collect()
}

/// One raw row of the transaction file, before validation.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TransactionRow {
    pub(crate) date: String,
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) account: String,
    pub(crate) user: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = anyhow::Error;

    fn try_from(row: TransactionRow) -> Res<Self> {
        let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}'", row.date))?;
        let amount = Amount::from_str(&row.amount)
            .with_context(|| format!("Invalid amount '{}'", row.amount))?;
        if !amount.is_positive() {
            bail!("The amount '{}' is not greater than zero", row.amount)
        }
        Ok(Self {
            date,
            amount: amount.plain(),
            description: row.description,
            category: row.category,
            account: row.account,
            user: row.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_new_rejects_non_positive_amount() {
        for bad in ["0", "0.00", "-5", "-$12.50"] {
            let err = Transaction::new(date("2024-01-05"), amount(bad), "x", "y", "z", "alice")
                .unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation, "{bad}");
        }
    }

    #[test]
    fn test_new_stores_plain_amount() {
        let t = Transaction::new(
            date("2024-01-05"),
            amount("$1,050.25"),
            "Rent share",
            "housing",
            "checking",
            "alice",
        )
        .unwrap();
        assert_eq!(t.amount().to_string(), "1050.25");
        assert_eq!(t.user(), "alice");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        for bad in ["2023-02-29", "2024-13-01", "01/05/2024", "", "yesterday"] {
            let err = parse_date(bad).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation, "{bad}");
        }
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            headers().join(","),
            "Date,Amount,Description,Category,Account,User"
        );
        assert_eq!(
            "Category".parse::<TransactionColumn>().unwrap(),
            TransactionColumn::Category
        );
    }

    #[test]
    fn test_row_conversion() {
        let t = Transaction::new(
            date("2024-01-20"),
            amount("30"),
            "Market, downtown",
            "groceries",
            "cash",
            "bob",
        )
        .unwrap();
        let row = t.to_row();
        assert_eq!(row.date, "2024-01-20");
        assert_eq!(row.amount, "30");
        assert_eq!(Transaction::try_from(row).unwrap(), t);
    }

    #[test]
    fn test_row_conversion_failures() {
        let good = TransactionRow {
            date: "2024-01-20".into(),
            amount: "30".into(),
            description: "d".into(),
            category: "c".into(),
            account: "a".into(),
            user: "u".into(),
        };
        assert!(Transaction::try_from(good.clone()).is_ok());

        let bad_date = TransactionRow {
            date: "2024-01-32".into(),
            ..good.clone()
        };
        let msg = Transaction::try_from(bad_date).unwrap_err().to_string();
        assert!(msg.contains("Invalid date"), "{msg}");

        let bad_amount = TransactionRow {
            amount: "abc".into(),
            ..good.clone()
        };
        assert!(Transaction::try_from(bad_amount).is_err());

        let zero_amount = TransactionRow {
            amount: "0".into(),
            ..good
        };
        let msg = Transaction::try_from(zero_amount).unwrap_err().to_string();
        assert!(msg.contains("not greater than zero"), "{msg}");
    }
}
