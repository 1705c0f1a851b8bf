//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::*;
pub use line_item::LineItem;
pub use price::Price;
pub use quantity::{Quantity, QuantityError};
