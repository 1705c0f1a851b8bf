//! Type-safe unit price representation using decimal arithmetic.
//!
//! Prices are held as [`Decimal`] in memory and travel as plain JSON numbers
//! (`19.9`, not `"19.9"`) to stay compatible with snapshots written by the
//! mobile app. The number is written from the decimal digits directly, never
//! through `f64`, so every price survives a snapshot round trip exactly.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "wire")] Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount expressed in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim()).map(Self)
    }
}

/// Exact JSON number codec. Trailing zeros are dropped on write (`19.90`
/// becomes `19.9`), matching what the app stores.
mod wire {
    use rust_decimal::Decimal;
    use rust_decimal::serde::arbitrary_precision;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        arbitrary_precision::serialize(&amount.normalize(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        arbitrary_precision::deserialize(deserializer)
    }
}
