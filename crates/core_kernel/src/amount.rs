//! Exact claim amounts
//!
//! Claim amounts are compared for exact equality between reports, so they are
//! held as `rust_decimal::Decimal` rather than binary floating point. Equality
//! is numeric: `100.0` and `100.00` are the same amount.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A claim amount with exact decimal semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount from a decimal value
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates an amount from integer minor units (e.g., cents) at the given scale
    pub fn from_minor(minor_units: i64, scale: u32) -> Self {
        Self(Decimal::new(minor_units, scale))
    }

    /// Returns the underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Nearest float, for consumers that render amounts as JSON numbers
    ///
    /// Comparison always uses the exact decimal, never this value.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| AmountError::InvalidAmount(s.to_string()))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}
