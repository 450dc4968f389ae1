//! Filtering and aggregation over loaded transactions.
//!
//! These are pure functions. Filters borrow from the input and preserve its order.

use crate::error::{Error, ErrorType, Result};
use crate::model::{Amount, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Returns the records dated within `start..=end`, optionally restricted to a category (compared
/// case-insensitively) and to a user (compared exactly).
pub fn filter<'a>(
    records: &'a [Transaction],
    start: NaiveDate,
    end: NaiveDate,
    category: Option<&str>,
    user: Option<&str>,
) -> Vec<&'a Transaction> {
    let category = category.map(str::to_lowercase);
    records
        .iter()
        .filter(|t| start <= t.date() && t.date() <= end)
        .filter(|t| match &category {
            Some(c) => t.category().to_lowercase() == *c,
            None => true,
        })
        .filter(|t| user.map_or(true, |u| t.user() == u))
        .collect()
}

/// Returns the records owned by `user`.
pub fn by_user<'a>(records: &'a [Transaction], user: &str) -> Vec<&'a Transaction> {
    records.iter().filter(|t| t.user() == user).collect()
}

/// The result of summarizing a set of transactions.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Summary {
    /// There were no transactions to summarize.
    Empty,
    Totals(Aggregate),
}

impl Summary {
    pub fn aggregate(&self) -> Option<&Aggregate> {
        match self {
            Summary::Empty => None,
            Summary::Totals(aggregate) => Some(aggregate),
        }
    }
}

/// Count, grand total and per-category totals of a non-empty set of transactions.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Aggregate {
    count: usize,
    total: Amount,
    categories: Vec<CategoryTotal>,
}

impl Aggregate {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Per-category totals, in the order each category first appeared.
    pub fn categories(&self) -> &[CategoryTotal] {
        &self.categories
    }

    /// Looks up the total for `category` by exact label.
    pub fn category(&self, category: &str) -> Option<Amount> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CategoryTotal {
    category: String,
    amount: Amount,
}

impl CategoryTotal {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Sums `records` overall and by category. Categories are grouped by exact label and listed in
/// first-seen order. An empty input yields `Summary::Empty`.
///
/// # Errors
/// - `ErrorType::Validation` if a total exceeds the range of a decimal amount.
pub fn summarize<'a, I>(records: I) -> Result<Summary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut count = 0;
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, Decimal)> = Vec::new();

    for t in records {
        count += 1;
        let ix = *index.entry(t.category()).or_insert_with(|| {
            sums.push((t.category(), Decimal::ZERO));
            sums.len() - 1
        });
        let sum = &mut sums[ix].1;
        *sum = sum
            .checked_add(t.amount().value())
            .ok_or_else(|| out_of_range(t.category()))?;
    }

    if count == 0 {
        return Ok(Summary::Empty);
    }

    let total = sums.iter().try_fold(Decimal::ZERO, |acc, (_, sum)| {
        acc.checked_add(*sum).ok_or_else(|| out_of_range("all categories"))
    })?;
    Ok(Summary::Totals(Aggregate {
        count,
        total: Amount::new(total),
        categories: sums
            .into_iter()
            .map(|(category, sum)| CategoryTotal {
                category: category.to_string(),
                amount: Amount::new(sum),
            })
            .collect(),
    }))
}

fn out_of_range(scope: &str) -> Error {
    Error::new(
        ErrorType::Validation,
        format!("The total for {scope} exceeds the supported range of amounts"),
    )
}
