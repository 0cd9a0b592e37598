//! Integration tests for the storefront widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-widget-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pagination` - Filtering and paging over loaded catalogs
//! - `cart_persistence` - Cart snapshots through a real `FileStore`
//! - `storefront_session` - End-to-end sessions: load, browse, add, reload
//!
//! This crate holds the shared fixtures those tests use.

use std::path::{Path, PathBuf};

use storefront_widget_core::{Price, Product, ProductId};

/// A fresh directory path under the system temp dir. Not created.
#[must_use]
pub fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()))
}

/// Removes a directory tree when dropped.
pub struct TempDir(PathBuf);

impl TempDir {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self(temp_path(prefix))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// `count` products with ids `1..=count`, alternating between the
/// "Kitchen" and "Apparel" categories, each priced at `id` dollars.
#[must_use]
pub fn numbered_products(count: u16) -> Vec<Product> {
    (1..=count)
        .map(|i| Product {
            id: ProductId::new(i32::from(i)),
            name: format!("Product {i}"),
            description: if i % 3 == 0 {
                "Limited edition".to_string()
            } else {
                "Everyday staple".to_string()
            },
            category: if i % 2 == 0 { "Apparel" } else { "Kitchen" }.to_string(),
            price: Price::from_cents(u32::from(i) * 100),
            image: format!("product-{i}.jpg"),
        })
        .collect()
}

/// Serialize products the way the catalog feed delivers them.
///
/// # Panics
///
/// Panics if serialization fails.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn catalog_json(products: &[Product]) -> String {
    serde_json::to_string(products).unwrap()
}

/// Write a catalog feed to `dir/products.json` and return its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn write_catalog(dir: &Path, products: &[Product]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("products.json");
    std::fs::write(&path, catalog_json(products)).unwrap();
    path
}
