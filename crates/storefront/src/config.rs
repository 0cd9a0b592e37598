//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_CATALOG` - Catalog file path or http(s) URL (default: products.json)
//! - `STOREFRONT_DATA_DIR` - Directory for the persisted cart (default: .storefront)
//! - `STOREFRONT_CART_KEY` - Store key for the cart snapshot (default: cart)
//! - `STOREFRONT_PAGE_SIZE` - Products per catalog page (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::catalog::{CatalogSource, DEFAULT_PAGE_SIZE};
use crate::store::validate_key;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Where the product catalog is fetched from
    pub catalog: CatalogSource,
    /// Directory backing the file store
    pub data_dir: PathBuf,
    /// Store key the cart snapshot lives under
    pub cart_key: String,
    /// Products per catalog page
    pub page_size: NonZeroUsize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::from_location("products.json"),
            data_dir: PathBuf::from(".storefront"),
            cart_key: DEFAULT_CART_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl WidgetConfig {
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog = lookup("STOREFRONT_CATALOG")
            .map_or(defaults.catalog, |location| {
                CatalogSource::from_location(&location)
            });
        let data_dir = lookup("STOREFRONT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let cart_key = lookup("STOREFRONT_CART_KEY").unwrap_or(defaults.cart_key);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_CART_KEY".to_string(), e.to_string())
        })?;

        let page_size = match lookup("STOREFRONT_PAGE_SIZE") {
            Some(raw) => raw.trim().parse::<NonZeroUsize>().map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PAGE_SIZE".to_string(), e.to_string())
            })?,
            None => defaults.page_size,
        };

        Ok(Self {
            catalog,
            data_dir,
            cart_key,
            page_size,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<WidgetConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        WidgetConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("products.json"))
        );
        assert_eq!(config.data_dir, PathBuf::from(".storefront"));
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.page_size.get(), 4);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_CATALOG", "https://shop.example.com/products.json"),
            ("STOREFRONT_DATA_DIR", "/var/lib/shop"),
            ("STOREFRONT_CART_KEY", "cart_v2"),
            ("STOREFRONT_PAGE_SIZE", " 12 "),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();
        assert!(matches!(config.catalog, CatalogSource::Http(_)));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shop"));
        assert_eq!(config.cart_key, "cart_v2");
        assert_eq!(config.page_size.get(), 12);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let err = config_from(&[("STOREFRONT_PAGE_SIZE", "0")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "STOREFRONT_PAGE_SIZE")
        );
        assert!(config_from(&[("STOREFRONT_PAGE_SIZE", "four")]).is_err());
    }

    #[test]
    fn test_cart_key_is_validated() {
        let err = config_from(&[("STOREFRONT_CART_KEY", "../../etc/passwd")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "STOREFRONT_CART_KEY")
        );
    }
}
