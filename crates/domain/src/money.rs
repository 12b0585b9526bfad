// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-point monetary amounts.
//!
//! Amounts are held as signed minor units (cents) so that balance arithmetic
//! is exact and maps one-to-one onto the integer columns of the store.
//! `rust_decimal::Decimal` is the exchange type at the boundary: parsing,
//! serialization, and display all go through it.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of decimal places carried by every amount.
pub const MONEY_SCALE: u32 = 2;

/// A signed monetary amount with exactly two decimal places.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self { cents: 0 };

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Converts a decimal into an amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the value carries more than two
    /// significant decimal places or does not fit the minor-unit range.
    pub fn from_decimal(value: Decimal) -> Result<Self, DomainError> {
        let normalized: Decimal = value.normalize();
        if normalized.scale() > MONEY_SCALE {
            return Err(DomainError::InvalidAmount(format!(
                "{value} has more than {MONEY_SCALE} decimal places"
            )));
        }

        let cents: i64 = normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| DomainError::InvalidAmount(format!("{value} is out of range")))?;

        Ok(Self { cents })
    }

    /// Returns the amount as a decimal with scale 2.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.cents, MONEY_SCALE)
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.cents > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.cents < 0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.cents.checked_add(other.cents) {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.cents.checked_sub(other.cents) {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.cents.checked_neg() {
            Some(cents) => Some(Self { cents }),
            None => None,
        }
    }

    /// Sums a sequence of amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.to_decimal()
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidAmount(format!("'{s}' is not a number: {e}")))?;
        Self::from_decimal(value)
    }
}
