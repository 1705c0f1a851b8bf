//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cart list
//!
//! # Add a product (or one more unit of it)
//! gm-cart add --id 1 --title "Shirt" --image-url https://img/1.png --price 19.90
//!
//! # Change quantities
//! gm-cart increment 1
//! gm-cart decrement 1
//! ```

use std::path::Path;

use go_marketplace_cart::{CartConfig, CartStore, FileStore};
use go_marketplace_core::{LineItem, LineItemId};

use crate::error::{CliError, add_breadcrumb, report};

/// Open the file-backed cart and restore its snapshot.
///
/// An unreadable snapshot is reported and the cart starts empty, matching how
/// the app behaves on launch.
pub async fn open(data_dir: &Path, config: CartConfig) -> CartStore<FileStore> {
    let cart = CartStore::new(FileStore::new(data_dir), config);
    match cart.initialize().await {
        Ok(count) => tracing::debug!(lines = count, "Cart loaded"),
        Err(e) => report(&e),
    }
    cart
}

/// Render the cart as text, one line per product plus a total.
#[must_use]
pub fn render(items: &[LineItem]) -> String {
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let mut units: u64 = 0;
    for item in items {
        units += u64::from(item.quantity.get());
        out.push_str(&format!(
            "{}\t{}\t{} x {}\n",
            item.id, item.title, item.quantity, item.price
        ));
    }
    out.push_str(&format!("{} line(s), {units} unit(s)\n", items.len()));
    out
}

/// Print the cart.
pub fn list(cart: &CartStore<FileStore>) {
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&cart.products()));
    }
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `CliError::Cart` if the quantity overflows or the snapshot cannot
/// be written.
pub async fn add(cart: &CartStore<FileStore>, item: LineItem) -> Result<(), CliError> {
    add_breadcrumb("Added to cart", &[("id", item.id.as_str())]);
    cart.add_to_cart(item).await.inspect_err(report)?;
    list(cart);
    Ok(())
}

/// Add one unit to a line.
///
/// # Errors
///
/// Returns `CliError::Cart` if the id is not in the cart or the snapshot
/// cannot be written.
pub async fn increment(cart: &CartStore<FileStore>, id: &LineItemId) -> Result<(), CliError> {
    add_breadcrumb("Incremented line", &[("id", id.as_str())]);
    cart.increment(id).await.inspect_err(report)?;
    list(cart);
    Ok(())
}

/// Remove one unit from a line.
///
/// # Errors
///
/// Returns `CliError::Cart` if the id is not in the cart or the snapshot
/// cannot be written.
pub async fn decrement(cart: &CartStore<FileStore>, id: &LineItemId) -> Result<(), CliError> {
    add_breadcrumb("Decremented line", &[("id", id.as_str())]);
    cart.decrement(id).await.inspect_err(report)?;
    list(cart);
    Ok(())
}
