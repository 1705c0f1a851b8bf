//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Snapshots surviving a restart on the file-backed store
//! - `cart_concurrency` - Overlapping mutations from cloned cart handles
//! - `cart_properties` - Random operation sequences checked against a model
//!
//! Shared fixtures live here so every test file builds line items the same way.

use go_marketplace_core::{LineItem, Price, Quantity};

/// Build a line item with a predictable image URL and price.
///
/// # Panics
///
/// Panics if `quantity` is 0.
#[must_use]
pub fn line_item(id: &str, title: &str, quantity: u32) -> LineItem {
    #[allow(clippy::expect_used)]
    let quantity = Quantity::new(quantity).expect("fixture quantity must be at least 1");
    LineItem::new(
        id,
        title,
        format!("https://cdn.example.com/{id}.png"),
        Price::from_cents(1990),
    )
    .with_quantity(quantity)
}
