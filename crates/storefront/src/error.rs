//! Unified error handling for the storefront core.
//!
//! Provides a unified `AppError` type wrapping the per-module error enums.
//! Front ends working through [`crate::AppState`] should handle
//! `Result<T, AppError>`.

use thiserror::Error;

use crate::cart::storage::StorageError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog data could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Durable cart storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout flow rejected an action.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");
    }

    #[test]
    fn test_app_error_from_checkout() {
        let err = AppError::from(CheckoutError::AlreadyProcessing);
        assert!(matches!(err, AppError::Checkout(_)));
        assert!(err.to_string().starts_with("Checkout error:"));
    }
}
