//! Unified error handling with Sentry integration.
//!
//! The catalog and cart never surface errors to their callers; they degrade
//! to a visible state instead. `AppError` is for the edges: configuration
//! and anything a binary wants to report before exiting.

use thiserror::Error;

use crate::catalog::LoadError;
use crate::config::ConfigError;
use crate::store::PersistenceError;

/// Application-level error type for the storefront widget.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fetch or parse failed.
    #[error("Catalog error: {0}")]
    Load(#[from] LoadError),

    /// Cart store read or write failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Log an error and capture it to Sentry.
///
/// Without an initialized Sentry client the capture is a no-op.
pub fn report_error(error: &AppError) {
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "Storefront error"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "STOREFRONT_PAGE_SIZE".to_string(),
            "number would be zero for non-zero type".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid environment variable STOREFRONT_PAGE_SIZE: number would be zero for non-zero type"
        );

        let err = AppError::from(LoadError::Status(500));
        assert_eq!(err.to_string(), "Catalog error: catalog request returned HTTP 500");
    }

    #[test]
    fn test_report_and_breadcrumb_without_sentry_client() {
        // Both must be harmless when Sentry was never initialized
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
        report_error(&AppError::from(PersistenceError::InvalidKey("a b".to_string())));
    }
}
