//! Where the catalog comes from and how it is parsed.
//!
//! The feed is a JSON array of product records:
//!
//! ```json
//! [
//!   {"id": 1, "name": "Mug", "description": "Ceramic, 350ml", "category": "Kitchen",
//!    "price": 10.0, "image": "mug.jpg"}
//! ]
//! ```

use std::path::PathBuf;

use storefront_widget_core::{Product, ProductError, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Errors that can occur while fetching or parsing the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a local catalog file failed.
    #[error("failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("catalog request returned HTTP {0}")]
    Status(u16),

    /// The body is not a JSON array of products.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record parsed but violates a product invariant.
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    /// Two records share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// A read-only location serving the catalog feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file on the local filesystem.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Http(Url),
}

impl CatalogSource {
    /// Interpret a location string: `http://` and `https://` URLs become
    /// [`CatalogSource::Http`], anything else is treated as a file path.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            _ => Self::File(PathBuf::from(location)),
        }
    }

    /// Fetch and parse the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the resource cannot be read, the server
    /// answers with a non-success status, or the body is not a valid catalog.
    #[instrument(skip(self), fields(source = %self))]
    pub async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        let body = match self {
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            Self::Http(url) => {
                let response = reqwest::get(url.clone()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status(status.as_u16()));
                }
                response.text().await?
            }
        };

        debug!(bytes = body.len(), "Catalog body received");
        parse_catalog(&body)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => write!(f, "{url}"),
        }
    }
}

/// Parse and validate a catalog document.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] when a record is missing a field or has the
/// wrong type, [`LoadError::InvalidProduct`] when a record fails
/// [`Product::validate`], and [`LoadError::DuplicateId`] when ids repeat.
pub fn parse_catalog(body: &str) -> Result<Vec<Product>, LoadError> {
    let products: Vec<Product> = serde_json::from_str(body)?;
    super::validate_products(&products)?;
    Ok(products)
}
