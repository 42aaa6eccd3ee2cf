//! Fixed-point payment amounts.
//!
//! Amounts are stored as whole centavos so that field `54` is always written
//! with exactly two decimals and never suffers binary float rounding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A BRL amount in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    /// Zero reais.
    pub const ZERO: Self = Self { cents: 0 };

    /// Build from a number of centavos.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Build from a number of reais, rounding to the nearest centavo.
    ///
    /// Halves round away from zero. Non-finite input saturates (NaN becomes
    /// zero).
    pub fn from_reais(reais: f64) -> Self {
        Self {
            cents: (reais * 100.0).round() as i64,
        }
    }

    /// Value in centavos.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Whether this amount activates the amount-bearing payload fields.
    pub const fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

/// Writes `<reais>.<centavos>` with a literal dot and no grouping.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Reasons an amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid character '{0}' in amount")]
    InvalidCharacter(char),
    #[error("amount has more than two decimal places")]
    TooManyDecimals,
    #[error("thousands groups must have exactly three digits")]
    InvalidGrouping,
    #[error("amount is too large")]
    Overflow,
}

/// Parses plain and Brazilian-formatted amounts.
///
/// Accepted forms include `1500`, `1500.5`, `1500,50`, `1.500,50`,
/// `1,500.50` and `R$ 99,90`. When both `.` and `,` appear the last one is
/// the decimal separator. When only one kind appears it is a decimal
/// separator if it occurs once and is followed by one or two digits, and a
/// thousands separator otherwise (`1.500` is fifteen hundred). Thousands
/// groups after the first must have exactly three digits.
impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim_start();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if body.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        if let Some(c) = body
            .chars()
            .find(|c| !c.is_ascii_digit() && *c != '.' && *c != ',')
        {
            return Err(ParseAmountError::InvalidCharacter(c));
        }

        let decimal_at = decimal_separator(body);
        let (int_part, frac_part) = match decimal_at {
            Some(i) => (&body[..i], &body[i + 1..]),
            None => (body, ""),
        };

        if frac_part.len() > 2 {
            return Err(ParseAmountError::TooManyDecimals);
        }
        if !valid_grouping(int_part) {
            return Err(ParseAmountError::InvalidGrouping);
        }

        let int_digits: String = int_part.chars().filter(|c| c.is_ascii_digit()).collect();
        if int_digits.is_empty() && frac_part.is_empty() {
            return Err(ParseAmountError::Empty);
        }

        let reais: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| ParseAmountError::Overflow)?
        };
        let centavos: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| ParseAmountError::Overflow)? * 10,
            _ => frac_part.parse().map_err(|_| ParseAmountError::Overflow)?,
        };

        let cents = reais
            .checked_mul(100)
            .and_then(|c| c.checked_add(centavos))
            .ok_or(ParseAmountError::Overflow)?;

        Ok(Self {
            cents: if negative { -cents } else { cents },
        })
    }
}

// Serde support for `Amount` as a decimal string ("1500.00").
impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(reais) => Ok(Amount::from_reais(reais)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Byte index of the decimal separator, if any.
fn decimal_separator(body: &str) -> Option<usize> {
    let last_dot = body.rfind('.');
    let last_comma = body.rfind(',');

    match (last_dot, last_comma) {
        (Some(d), Some(c)) => Some(d.max(c)),
        (Some(i), None) | (None, Some(i)) => {
            let sep = body.as_bytes()[i];
            let occurrences = body.bytes().filter(|b| *b == sep).count();
            let trailing = body.len() - i - 1;
            (occurrences == 1 && (1..=2).contains(&trailing)).then_some(i)
        }
        (None, None) => None,
    }
}

/// Integer digits either ungrouped, or split by a single separator kind
/// into a 1-3 digit leading group and 3-digit groups after it.
fn valid_grouping(int_part: &str) -> bool {
    let mut separators = int_part.chars().filter(|c| !c.is_ascii_digit());
    let Some(sep) = separators.next() else {
        return true;
    };
    if separators.any(|c| c != sep) {
        return false;
    }

    let mut groups = int_part.split(sep);
    let leading_ok = groups.next().is_some_and(|g| (1..=3).contains(&g.len()));
    leading_ok && groups.all(|g| g.len() == 3)
}
