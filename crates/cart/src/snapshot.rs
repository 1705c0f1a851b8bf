//! Cart snapshot codec.
//!
//! A snapshot is the UTF-8 JSON array of every line item in cart order:
//!
//! ```json
//! [{"id":"1","title":"Shirt","image_url":"https://...","price":19.9,"quantity":2}]
//! ```

use go_marketplace_core::LineItem;

/// Encode the full list of line items.
///
/// # Errors
///
/// Returns `serde_json::Error` if a value cannot be represented as JSON.
pub fn encode(items: &[LineItem]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(items)
}

/// Decode a snapshot back into line items.
///
/// A JSON `null` (written by app builds that saved an uninitialized cart)
/// decodes as an empty cart.
///
/// # Errors
///
/// Returns `serde_json::Error` if the bytes are not a valid snapshot,
/// including any line item with a quantity below 1.
pub fn decode(bytes: &[u8]) -> Result<Vec<LineItem>, serde_json::Error> {
    let items: Option<Vec<LineItem>> = serde_json::from_slice(bytes)?;
    Ok(items.unwrap_or_default())
}
