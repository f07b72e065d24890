//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults give a working local setup.
//!
//! - `VERDE_DATA_DIR` - Directory for durable client state (default: `.verde`)
//! - `VERDE_CATALOG_PATH` - Path to a catalog JSON file overriding the
//!   bundled catalog
//! - `VERDE_ORDER_LATENCY_MS` - Simulated order-placement latency in
//!   milliseconds (default: 2000)

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Default simulated latency for order placement, matching a realistic
/// payment round trip.
const DEFAULT_ORDER_LATENCY_MS: u64 = 2000;

/// File name of the durable cart record inside the data directory.
const CART_STORE_FILE: &str = "cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding durable client state (the cart record).
    pub data_dir: PathBuf,
    /// Optional catalog JSON file overriding the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    /// Simulated order-placement latency.
    pub order_latency: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".verde"),
            catalog_path: None,
            order_latency: Duration::from_millis(DEFAULT_ORDER_LATENCY_MS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable is present but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("VERDE_DATA_DIR") {
            if dir.is_empty() {
                return Err(ConfigError::InvalidEnvVar(
                    "VERDE_DATA_DIR".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("VERDE_CATALOG_PATH") {
            if !path.is_empty() {
                config.catalog_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(raw) = std::env::var("VERDE_ORDER_LATENCY_MS") {
            let millis: u64 = raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "VERDE_ORDER_LATENCY_MS".to_owned(),
                    format!("expected an integer, got {raw:?}"),
                )
            })?;
            config.order_latency = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Path of the durable cart record.
    #[must_use]
    pub fn cart_store_path(&self) -> PathBuf {
        self.data_dir.join(CART_STORE_FILE)
    }

    /// Use a specific data directory (mainly for tests).
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".verde"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.order_latency, Duration::from_millis(2000));
    }

    #[test]
    fn test_cart_store_path_joins_data_dir() {
        let config = StorefrontConfig::default().with_data_dir("/tmp/verde-test");
        assert_eq!(
            config.cart_store_path(),
            PathBuf::from("/tmp/verde-test/cart.json")
        );
    }
}
