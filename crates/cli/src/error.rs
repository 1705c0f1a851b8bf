//! CLI error handling with Sentry integration.

use go_marketplace_cart::{CartError, CartErrorKind, ConfigError};
use thiserror::Error;

/// Errors surfaced by `gm-cart` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Report a cart error.
///
/// Storage failures are captured to Sentry; rejected operations are user
/// mistakes and only logged.
pub fn report(err: &CartError) {
    match err.kind() {
        CartErrorKind::StorageRead | CartErrorKind::StorageWrite => {
            let event_id = sentry::capture_error(err);
            tracing::error!(
                error = %err,
                sentry_event_id = %event_id,
                "Cart storage error"
            );
        }
        CartErrorKind::NotFound | CartErrorKind::InvalidItem => {
            tracing::warn!(error = %err, "Cart operation rejected");
        }
    }
}

/// Add a breadcrumb for cart actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use go_marketplace_core::LineItemId;

    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::from(CartError::NotFound(LineItemId::new("sku-1")));
        assert_eq!(err.to_string(), "Cart error: Line item not found: sku-1");

        let err = CliError::from(ConfigError::InvalidEnvVar(
            "GO_MARKETPLACE_CART_MATCH_KEY".to_string(),
            "bad".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid environment variable GO_MARKETPLACE_CART_MATCH_KEY: bad"
        );
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        report(&CartError::NotFound(LineItemId::new("x")));
        add_breadcrumb("Incremented line", &[("id", "x")]);
    }
}
