//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart snapshot
//!   (default: `@GoMarketplace:cartProducts`)
//! - `GO_MARKETPLACE_CART_MATCH_KEY` - Field that identifies an existing line
//!   item when adding to the cart: `id` or `title` (default: `id`)

use std::fmt;
use std::str::FromStr;

use go_marketplace_core::LineItem;
use thiserror::Error;

/// Storage key the mobile app has always used for the cart snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:cartProducts";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which field decides that an added product is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKey {
    /// Match on the product id. Increment and decrement address lines by id
    /// too, so every line stays reachable.
    #[default]
    Id,
    /// Match on the product title, as older app builds did. Two products with
    /// the same title merge into whichever line was added first.
    Title,
}

impl MatchKey {
    /// Whether `candidate` refers to the same cart line as `existing`.
    #[must_use]
    pub fn matches(self, existing: &LineItem, candidate: &LineItem) -> bool {
        match self {
            Self::Id => existing.id == candidate.id,
            Self::Title => existing.title == candidate.title,
        }
    }
}

impl FromStr for MatchKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            other => Err(format!("expected `id` or `title`, got `{other}`")),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::Title => f.write_str("title"),
        }
    }
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Identity used by `add_to_cart` to find an existing line.
    pub match_key: MatchKey,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            match_key: MatchKey::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_key = get_env_or_default("GO_MARKETPLACE_CART_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "GO_MARKETPLACE_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let match_key = get_env_or_default("GO_MARKETPLACE_CART_MATCH_KEY", "id")
            .parse::<MatchKey>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GO_MARKETPLACE_CART_MATCH_KEY".to_string(), e)
            })?;

        Ok(Self {
            storage_key,
            match_key,
        })
    }

    /// Use a different storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different match key.
    #[must_use]
    pub const fn with_match_key(mut self, match_key: MatchKey) -> Self {
        self.match_key = match_key;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
