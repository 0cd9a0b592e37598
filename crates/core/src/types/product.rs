//! Catalog products and cart lines.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors found when validating a [`Product`] record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product name is empty or whitespace.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A catalog entry available for purchase.
///
/// Products are created by bulk-loading the catalog feed and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier. Ids are `i32`; a feed id outside
    /// `i32::MIN..=i32::MAX` fails the whole catalog load.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description, searched alongside the name.
    pub description: String,
    /// Category label used by the category filter.
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Image filename, relative to the product asset directory.
    pub image: String,
}

impl Product {
    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyName`] if the name is blank.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName(self.id));
        }
        Ok(())
    }

    /// Whether the name or description contains `needle`.
    ///
    /// `needle` must already be lowercase; matching is case-insensitive.
    #[must_use]
    pub fn matches_term(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// A product plus the quantity selected for purchase.
///
/// Serialized as the product's fields with an added `quantity`, which is
/// the shape persisted cart snapshots use. A quantity of zero cannot be
/// represented, so a snapshot containing one fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Start a line for `product` with a quantity of one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Build a line with an explicit quantity.
    #[must_use]
    pub const fn with_quantity(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// The product this line holds.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Shorthand for `self.product().id`.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units, always at least one.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }

    /// Add one unit. Returns `false` if the quantity is already at its ceiling.
    pub fn increment(&mut self) -> bool {
        match self.quantity.checked_add(1) {
            Some(next) => {
                self.quantity = next;
                true
            }
            None => false,
        }
    }

    /// Remove one unit if more than one remains.
    ///
    /// Returns `false` when the line holds a single unit; the caller is
    /// expected to drop the line instead of storing a zero quantity.
    pub fn decrement(&mut self) -> bool {
        match NonZeroU32::new(self.quantity.get() - 1) {
            Some(next) => {
                self.quantity = next;
                true
            }
            None => false,
        }
    }
}
