//! Cart line item.

use serde::{Deserialize, Serialize};

use super::{LineItemId, Price, Quantity};

/// A product sitting in the cart together with how many units were added.
///
/// The serialized form is the snapshot format shared with the mobile app:
///
/// ```json
/// {"id":"1","title":"Shirt","image_url":"https://...","price":19.9,"quantity":2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique per product.
    pub id: LineItemId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Units in the cart, always at least 1.
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a line item holding a single unit.
    #[must_use]
    pub fn new(
        id: impl Into<LineItemId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity: Quantity::ONE,
        }
    }

    /// Replace the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }
}
