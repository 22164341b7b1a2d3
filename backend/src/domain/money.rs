//! Monetary amounts as integer minor units.
//!
//! The donation ledger sums amounts across concurrent writers, so totals must
//! be exact. Amounts are stored as whole kyat-cents (i64); the HTTP boundary
//! accepts a JSON number of currency units with at most two decimal places.

use serde::{Deserialize, Serialize};

/// Upper bound on a single amount, in minor units (one billion units).
pub const AMOUNT_MAX_MINOR: i64 = 100_000_000_000;

/// Validation errors raised when constructing an [`Amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The value was NaN or infinite.
    #[error("amount must be a finite number")]
    NotFinite,
    /// The value was zero or negative.
    #[error("amount must be greater than zero")]
    NotPositive,
    /// The value carried more than two decimal places.
    #[error("amount must not have more than two decimal places")]
    TooPrecise,
    /// The value exceeded the supported range.
    #[error("amount exceeds the supported maximum")]
    TooLarge,
}

/// A strictly positive monetary amount in minor units.
///
/// # Examples
/// ```
/// use backend::domain::Amount;
///
/// let amount = Amount::from_major_units(12.5).expect("valid amount");
/// assert_eq!(amount.minor_units(), 1250);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Construct from minor units (e.g. cents).
    ///
    /// # Errors
    /// Returns [`AmountError::NotPositive`] for zero or negative input and
    /// [`AmountError::TooLarge`] above [`AMOUNT_MAX_MINOR`].
    pub fn from_minor_units(minor: i64) -> Result<Self, AmountError> {
        if minor <= 0 {
            return Err(AmountError::NotPositive);
        }
        if minor > AMOUNT_MAX_MINOR {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(minor))
    }

    /// Construct from a decimal number of currency units.
    ///
    /// Rejects NaN, infinities, non-positive values, values with more than
    /// two decimal places, and values beyond the supported range.
    ///
    /// # Errors
    /// Returns the corresponding [`AmountError`] variant.
    pub fn from_major_units(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        let scaled = value * 100.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(AmountError::TooPrecise);
        }
        if rounded > AMOUNT_MAX_MINOR as f64 {
            return Err(AmountError::TooLarge);
        }
        Self::from_minor_units(rounded as i64)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// The amount as a decimal number of currency units, for wire payloads.
    #[must_use]
    pub fn to_major_units(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
