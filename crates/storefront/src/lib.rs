//! Storefront Widget library.
//!
//! The stateful core of a storefront widget: a filterable, paginated product
//! catalog and a persistent shopping cart. Rendering is left to the caller,
//! which reads [`views`] after every action.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_widget::{FileStore, Storefront, WidgetConfig};
//!
//! let config = WidgetConfig::from_env()?;
//! let mut storefront = Storefront::new(&config, FileStore::new(&config.data_dir));
//! storefront.reload_catalog(&config.catalog).await;
//!
//! storefront.add_to_cart(ProductId::new(1));
//! let cart = storefront.cart_view();
//! println!("{} items, {}", cart.item_count, cart.subtotal);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod views;

pub use cart::CartStore;
pub use catalog::{CatalogFilter, CatalogSource, CatalogStatus, CategoryFilter, LoadError};
pub use config::{ConfigError, WidgetConfig};
pub use error::AppError;
pub use state::Storefront;
pub use store::{FileStore, MemoryStore, PersistenceError, Store};
