use serde::Deserialize;
use thiserror::Error;

pub mod inventory;
pub mod sales;
pub mod shows;
pub mod tours;
pub mod users;

/// Largest amount accepted from a client, in cents (10,000,000.00).
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000;

/// A money amount as clients send it: a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount `{0}` is not a number")]
    NotANumber(String),
    #[error("amount cannot be negative")]
    Negative,
    #[error("amount is too large")]
    OutOfRange,
}

impl AmountInput {
    /// Convert to whole cents, rounding half away from zero.
    pub fn to_cents(&self) -> Result<i64, AmountError> {
        let value = match self {
            AmountInput::Number(value) => *value,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| AmountError::NotANumber(text.clone()))?,
        };

        if !value.is_finite() {
            return Err(AmountError::NotANumber(value.to_string()));
        }
        if value < 0.0 {
            return Err(AmountError::Negative);
        }

        let cents = (value * 100.0).round();
        if cents > MAX_AMOUNT_CENTS as f64 {
            return Err(AmountError::OutOfRange);
        }

        Ok(cents as i64)
    }
}

/// Collapse whitespace runs and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize an optional field, treating blank input as absent.
pub(crate) fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}
