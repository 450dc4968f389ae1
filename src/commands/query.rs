//! Read-only views over the logged-in user's transactions.
//!
//! Every view here is scoped to one user. The ledger file is shared by all users, so nothing in
//! this module ever reports on transactions that belong to someone else.

use crate::commands::{plural, Out};
use crate::error::{Error, ErrorType, Result};
use crate::model::Transaction;
use crate::query::{self, Summary};
use crate::store::Ledger;
use chrono::NaiveDate;
use serde::Serialize;

/// Lists every transaction owned by `user`, in the order they were recorded.
pub fn view<'a>(ledger: &'a Ledger, user: &str) -> Out<Vec<&'a Transaction>> {
    let records = query::by_user(ledger.records(), user);
    let message = if records.is_empty() {
        String::from("No transactions recorded yet")
    } else {
        format!("Found {}", plural(records.len(), "transaction", "transactions"))
    };
    Out::new(message, records)
}

/// Summarizes every transaction owned by `user`.
///
/// # Errors
/// - `ErrorType::Validation` if the totals are too large to represent.
pub fn summarize(ledger: &Ledger, user: &str) -> Result<Out<Summary>> {
    let summary = query::summarize(query::by_user(ledger.records(), user))?;
    let message = match &summary {
        Summary::Empty => String::from("Nothing to summarize"),
        Summary::Totals(aggregate) => format!(
            "{} totaling {}",
            plural(aggregate.count(), "transaction", "transactions"),
            aggregate.total()
        ),
    };
    Ok(Out::new(message, summary))
}

/// The transactions matched by a detailed summary, along with their summary.
#[derive(Debug, Clone, Serialize)]
pub struct Detail<'a> {
    pub transactions: Vec<&'a Transaction>,
    pub summary: Summary,
}

/// Filters `user`'s transactions to `start..=end` and, if given, to `category` (ignoring case),
/// then summarizes the result.
///
/// # Errors
/// - `ErrorType::Validation` if `end` is before `start` or the totals are too large to represent.
pub fn detailed_summary<'a>(
    ledger: &'a Ledger,
    user: &str,
    start: NaiveDate,
    end: NaiveDate,
    category: Option<&str>,
) -> Result<Out<Detail<'a>>> {
    if end < start {
        return Err(Error::new(
            ErrorType::Validation,
            format!("The end date {end} is before the start date {start}"),
        ));
    }
    let transactions = query::filter(ledger.records(), start, end, category, Some(user));
    let summary = query::summarize(transactions.iter().copied())?;
    let scope = match category {
        Some(c) => format!("'{c}' from {start} to {end}"),
        None => format!("all categories from {start} to {end}"),
    };
    let message = match &summary {
        Summary::Empty => format!("Nothing to summarize for {scope}"),
        Summary::Totals(aggregate) => format!(
            "{} totaling {} for {scope}",
            plural(aggregate.count(), "transaction", "transactions"),
            aggregate.total()
        ),
    };
    Ok(Out::new(
        message,
        Detail {
            transactions,
            summary,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_date;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn sample_env() -> TestEnv {
        let env = TestEnv::new();
        env.add("2024-01-05", "50", "groceries", "alice");
        env.add("2024-02-10", "20", "utilities", "alice");
        env.add("2024-01-20", "30", "Groceries", "alice");
        env.add("2024-01-21", "999", "groceries", "bob");
        env
    }

    #[test]
    fn test_view_is_scoped_to_user() {
        let env = sample_env();
        let ledger = env.ledger();
        let out = view(&ledger, "alice");
        assert_eq!(out.message(), "Found 3 transactions");
        assert!(out.structure().unwrap().iter().all(|t| t.user() == "alice"));

        let out = view(&ledger, "carol");
        assert_eq!(out.message(), "No transactions recorded yet");
    }

    #[test]
    fn test_summarize_is_scoped_to_user() {
        let env = sample_env();
        let ledger = env.ledger();
        let out = summarize(&ledger, "bob").unwrap();
        let aggregate = out.structure().unwrap().aggregate().unwrap();
        assert_eq!(aggregate.total().value(), Decimal::from(999));
        assert_eq!(out.message(), "1 transaction totaling $999.00");

        let out = summarize(&ledger, "carol").unwrap();
        assert_eq!(out.structure(), Some(&Summary::Empty));
        assert_eq!(out.message(), "Nothing to summarize");
    }

    #[test]
    fn test_detailed_summary() {
        let env = sample_env();
        let ledger = env.ledger();
        let out = detailed_summary(
            &ledger,
            "alice",
            date("2024-01-01"),
            date("2024-01-31"),
            Some("GROCERIES"),
        )
        .unwrap();
        let detail = out.structure().unwrap();
        assert_eq!(detail.transactions.len(), 2);
        let aggregate = detail.summary.aggregate().unwrap();
        assert_eq!(aggregate.total().value(), Decimal::from(80));
        // Category labels are grouped exactly as recorded
        assert_eq!(aggregate.categories().len(), 2);
        assert_eq!(
            out.message(),
            "2 transactions totaling $80.00 for 'GROCERIES' from 2024-01-01 to 2024-01-31"
        );
    }

    #[test]
    fn test_detailed_summary_nothing_found() {
        let env = sample_env();
        let ledger = env.ledger();
        let out =
            detailed_summary(&ledger, "alice", date("2023-01-01"), date("2023-12-31"), None)
                .unwrap();
        assert_eq!(out.structure().unwrap().summary, Summary::Empty);
        assert!(out.message().starts_with("Nothing to summarize"));
    }

    #[test]
    fn test_detailed_summary_inverted_range() {
        let env = sample_env();
        let ledger = env.ledger();
        let err = detailed_summary(&ledger, "alice", date("2024-02-01"), date("2024-01-01"), None)
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }
}
