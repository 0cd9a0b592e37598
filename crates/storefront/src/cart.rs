//! Persistent shopping cart.
//!
//! [`CartStore`] owns the cart lines and is the only thing allowed to change
//! them. It enforces two invariants:
//!
//! - at most one line per product id
//! - every stored line has a quantity of at least one
//!
//! Every mutation that changes the cart rewrites the full snapshot to the
//! injected [`Store`] before returning. Persistence problems never escape:
//! an unreadable or malformed snapshot starts an empty cart, and a failed
//! write leaves the cart running in memory for the rest of the session.

use std::collections::HashSet;

use storefront_widget_core::{CartLine, Price, Product, ProductId};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::store::{PersistenceError, Store};

/// Store key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Why a persisted snapshot was thrown away.
#[derive(Debug, Error)]
enum SnapshotError {
    #[error("snapshot is not a list of cart lines: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot holds more than one line for product {0}")]
    DuplicateLine(ProductId),
}

fn decode_snapshot(raw: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        if !seen.insert(line.id()) {
            return Err(SnapshotError::DuplicateLine(line.id()));
        }
    }
    Ok(lines)
}

/// Cart lines plus the store they are mirrored to.
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    key: String,
    lines: Vec<CartLine>,
    /// Set once a read or write fails; the cart stops writing from then on.
    persistence_error: Option<PersistenceError>,
}

impl<S: Store> CartStore<S> {
    /// Load the cart saved under [`DEFAULT_CART_KEY`].
    pub fn initialize(store: S) -> Self {
        Self::initialize_with_key(store, DEFAULT_CART_KEY)
    }

    /// Load the cart saved under `key`, or start empty.
    ///
    /// A missing or malformed snapshot yields an empty cart. A store that
    /// cannot be read yields an empty, in-memory-only cart so that the
    /// unreadable snapshot is not overwritten.
    pub fn initialize_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut persistence_error = None;

        let lines = match store.get(&key) {
            Ok(Some(raw)) => decode_snapshot(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Discarding malformed cart snapshot");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(key = %key, error = %e, "Cart store unreadable, keeping cart in memory");
                persistence_error = Some(e);
                Vec::new()
            }
        };

        debug!(key = %key, lines = lines.len(), "Cart initialized");
        Self {
            store,
            key,
            lines,
            persistence_error,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`, creating its line if needed.
    ///
    /// Returns `false` only if the existing line is already at the maximum
    /// quantity.
    pub fn add_item(&mut self, product: &Product) -> bool {
        if let Some(line) = self.line_mut(product.id) {
            if !line.increment() {
                return false;
            }
        } else {
            self.lines.push(CartLine::new(product.clone()));
        }
        debug!(product_id = %product.id, "Added to cart");
        self.persist();
        true
    }

    /// Add one unit to an existing line. No-op if the product is not in the cart.
    pub fn increase_quantity(&mut self, id: ProductId) -> bool {
        let changed = self.line_mut(id).is_some_and(CartLine::increment);
        if changed {
            self.persist();
        } else {
            debug!(product_id = %id, "Increase ignored");
        }
        changed
    }

    /// Remove one unit; a line holding a single unit is removed entirely.
    /// No-op if the product is not in the cart.
    pub fn decrease_quantity(&mut self, id: ProductId) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.id() == id) else {
            debug!(product_id = %id, "Decrease ignored");
            return false;
        };

        let still_present = self
            .lines
            .get_mut(index)
            .is_some_and(CartLine::decrement);
        if !still_present {
            self.lines.remove(index);
        }
        self.persist();
        true
    }

    /// Drop the line for `id`. No-op if the product is not in the cart.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        if self.lines.len() == before {
            debug!(product_id = %id, "Remove ignored");
            return false;
        }
        self.persist();
        true
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    fn persist(&mut self) {
        if self.persistence_error.is_some() {
            return;
        }

        let result = serde_json::to_string(&self.lines)
            .map_err(PersistenceError::from)
            .and_then(|snapshot| self.store.set(&self.key, &snapshot));

        if let Err(e) = result {
            error!(key = %self.key, error = %e, "Failed to persist cart, keeping it in memory");
            self.persistence_error = Some(e);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Total units across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of price times quantity. Exact; round with [`Price::display`].
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The failure that switched the cart to in-memory mode, if any.
    #[must_use]
    pub const fn persistence_error(&self) -> Option<&PersistenceError> {
        self.persistence_error.as_ref()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
