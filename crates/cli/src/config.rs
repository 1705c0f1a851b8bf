//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GO_MARKETPLACE_DATA_DIR` - Directory holding the cart snapshot (default: `.go-marketplace`)
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart snapshot
//! - `GO_MARKETPLACE_CART_MATCH_KEY` - `id` or `title` (default: `id`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use go_marketplace_cart::config::{get_env_or_default, get_optional_env};
use go_marketplace_cart::{CartConfig, ConfigError};

/// Default directory for the file-backed store.
pub const DEFAULT_DATA_DIR: &str = ".go-marketplace";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the snapshot file lives in
    pub data_dir: PathBuf,
    /// Cart store configuration
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a cart variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cart = CartConfig::from_env()?;

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default(
                "GO_MARKETPLACE_DATA_DIR",
                DEFAULT_DATA_DIR,
            )),
            cart,
            sentry_dsn: get_optional_env("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}
