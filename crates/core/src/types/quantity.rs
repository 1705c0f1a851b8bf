//! Line item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or changing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The quantity would be zero.
    #[error("quantity must be at least 1")]
    Zero,
    /// The quantity would not fit in a `u32`.
    #[error("quantity cannot exceed {max}")]
    Overflow {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// How many units of a product sit in the cart.
///
/// A quantity is always at least 1. Deserializing `0` or a negative number
/// fails, so a snapshot can never smuggle an empty line into the cart.
///
/// ```
/// use go_marketplace_core::Quantity;
///
/// let one = Quantity::ONE;
/// assert_eq!(one.checked_increment().unwrap().get(), 2);
/// assert!(one.decrement().is_none()); // would reach zero
/// assert!(Quantity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Zero` if `value` is 0.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        match NonZeroU32::new(value) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::Zero),
        }
    }

    /// Get the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add one unit.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Overflow` if the quantity is already `u32::MAX`.
    pub const fn checked_increment(self) -> Result<Self, QuantityError> {
        match self.0.checked_add(1) {
            Some(n) => Ok(Self(n)),
            None => Err(QuantityError::Overflow { max: u32::MAX }),
        }
    }

    /// Remove one unit, or `None` if that would leave nothing.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        match NonZeroU32::new(self.0.get() - 1) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!(Quantity::new(3).unwrap().get(), 3);
    }

    #[test]
    fn test_increment() {
        let q = Quantity::new(2).unwrap().checked_increment().unwrap();
        assert_eq!(q.get(), 3);
    }

    #[test]
    fn test_increment_overflow() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert!(matches!(
            max.checked_increment(),
            Err(QuantityError::Overflow { .. })
        ));
    }

    #[test]
    fn test_decrement() {
        assert_eq!(Quantity::new(3).unwrap().decrement().unwrap().get(), 2);
        assert!(Quantity::ONE.decrement().is_none());
    }

    #[test]
    fn test_deserialize_rejects_zero_and_negative() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().get(), 4);
    }

    #[test]
    fn test_serializes_as_integer() {
        let q = Quantity::new(7).unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "7");
    }
}
