//! Amount type for monetary values entered with or without a dollar sign and commas.
//!
//! `Amount` wraps an exact `Decimal` and remembers the style it was written in, so the transaction
//! file can hold plain numbers while the console shows currency.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// How an amount is written.
///
/// # Examples
///  - `AmountFormat::CURRENCY` -> `$1,250.00`
///  - `AmountFormat::PLAIN` -> `1250.00`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    /// Whether a dollar sign is present.
    dollar: bool,
    /// Whether commas are present as thousands separators.
    commas: bool,
}

impl AmountFormat {
    /// Dollar sign and thousands separators, used for display.
    pub const CURRENCY: AmountFormat = AmountFormat {
        dollar: true,
        commas: true,
    };

    /// Digits only, used in the transaction file.
    pub const PLAIN: AmountFormat = AmountFormat {
        dollar: false,
        commas: false,
    };
}

impl Default for AmountFormat {
    fn default() -> Self {
        AmountFormat::CURRENCY
    }
}

/// Represents a dollar amount.
///
/// Formatting is considered significant for equality, so compare `value()` for numeric checks.
///
/// ```
/// # use pocket_ledger::model::Amount;
/// # use std::str::FromStr;
/// let typed = Amount::from_str("$1,250.00").unwrap();
/// assert_eq!(typed.to_string(), "$1,250.00");
/// assert_eq!(typed.plain().to_string(), "1250.00");
/// assert_eq!(typed.value(), Amount::from_str("1250").unwrap().value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    /// Creates an amount that displays as currency.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: AmountFormat::CURRENCY,
        }
    }

    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The same value written without a dollar sign or commas.
    pub fn plain(&self) -> Self {
        Self::new_with_format(self.value, AmountFormat::PLAIN)
    }

    /// The same value written as currency.
    pub fn currency(&self) -> Self {
        Self::new_with_format(self.value, AmountFormat::CURRENCY)
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }
}

/// An error that can occur when parsing a string into an `Amount`.
pub struct AmountError {
    input: String,
    source: Option<rust_decimal::Error>,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?}, {:?})", self.input, self.source)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(e) => write!(f, "'{}' is not a valid amount: {e}", self.input),
            None => write!(f, "an amount is required"),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError {
                input: s.to_string(),
                source: None,
            });
        }

        // Accept "-$5", "$5" and "5"
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (dollar, digits) = match unsigned.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, unsigned),
        };

        let without_commas = digits.replace(',', "");
        let commas = without_commas.len() < digits.len();
        let signed = if negative {
            format!("-{without_commas}")
        } else {
            without_commas
        };

        let value = Decimal::from_str(&signed).map_err(|e| AmountError {
            input: s.to_string(),
            source: Some(e),
        })?;
        Ok(Amount::new_with_format(value, AmountFormat { dollar, commas }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.value.is_sign_negative() && !self.value.is_zero() {
            "-"
        } else {
            ""
        };
        let dol = if self.format.dollar { "$" } else { "" };
        let num = self.value.abs();

        if self.format.commas {
            write!(
                f,
                "{sign}{dol}{}",
                format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
            )
        } else {
            write!(f, "{sign}{dol}{num}")
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
