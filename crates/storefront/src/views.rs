//! Display data for renderers.
//!
//! Views are snapshots: build one after each operation and draw it. All
//! prices are pre-formatted and every enable/disable decision is made here
//! so renderers stay free of catalog and cart rules. Views serialize to
//! JSON for renderers living outside the process.

use serde::Serialize;
use storefront_widget_core::{CartLine, Product, ProductId};

use crate::cart::CartStore;
use crate::catalog::{CatalogFilter, CatalogStatus};
use crate::store::Store;

/// Shown in place of the grid when the catalog could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";
/// Shown when the current criteria match nothing.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found matching your criteria.";
/// Shown in place of the cart lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One tile in the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.display(),
            image: product.image.clone(),
        }
    }
}

/// The product grid with its pagination and filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub status: CatalogStatus,
    pub items: Vec<ProductCard>,
    pub page: usize,
    pub total_pages: usize,
    /// e.g. "Page 1 of 3"
    pub page_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    /// Options for the category selector, excluding "all".
    pub categories: Vec<String>,
    pub selected_category: String,
    pub search_term: String,
    /// Replaces the grid when set.
    pub message: Option<&'static str>,
}

impl From<&CatalogFilter> for CatalogView {
    fn from(catalog: &CatalogFilter) -> Self {
        let items: Vec<ProductCard> = catalog
            .current_page_items()
            .into_iter()
            .map(ProductCard::from)
            .collect();

        let message = match catalog.status() {
            CatalogStatus::Failed(_) => Some(LOAD_FAILED_MESSAGE),
            CatalogStatus::Ready if items.is_empty() => Some(NO_PRODUCTS_MESSAGE),
            CatalogStatus::Ready | CatalogStatus::Loading => None,
        };

        Self {
            status: catalog.status().clone(),
            page: catalog.page(),
            total_pages: catalog.total_pages(),
            page_label: format!("Page {} of {}", catalog.page(), catalog.total_pages()),
            has_previous: catalog.has_previous_page(),
            has_next: catalog.has_next_page(),
            categories: catalog.available_categories().to_vec(),
            selected_category: catalog.category().to_string(),
            search_term: catalog.search_term().to_string(),
            message,
            items,
        }
    }
}

/// One row in the cart dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Unit price, e.g. "$5.50"
    pub price: String,
    /// Unit price times quantity
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            name: line.product().name.clone(),
            image: line.product().image.clone(),
            quantity: line.quantity(),
            price: line.product().price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    /// Total units, for the header badge.
    pub item_count: u64,
    /// Whether changes are still being saved to the store.
    pub persisted: bool,
    /// Replaces the item list when set.
    pub message: Option<&'static str>,
}

impl CartView {
    /// Snapshot a cart for display.
    pub fn from_cart<S: Store>(cart: &CartStore<S>) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.total().display(),
            item_count: cart.item_count(),
            persisted: cart.persistence_error().is_none(),
            message: cart.is_empty().then_some(EMPTY_CART_MESSAGE),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use storefront_widget_core::Price;

    use super::*;
    use crate::catalog::{CategoryFilter, LoadError};
    use crate::store::MemoryStore;

    fn product(id: i32, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: if id % 2 == 0 { "even" } else { "odd" }.to_string(),
            price: Price::from_cents(cents),
            image: format!("{id}.jpg"),
        }
    }

    #[test]
    fn test_catalog_view_first_page() {
        let mut catalog = CatalogFilter::default();
        catalog
            .load((1..=10).map(|i| product(i, 1000)).collect())
            .unwrap();

        let view = CatalogView::from(&catalog);
        assert_eq!(view.items.len(), 4);
        assert_eq!(view.items[0].price, "$10.00");
        assert_eq!(view.page_label, "Page 1 of 3");
        assert!(!view.has_previous);
        assert!(view.has_next);
        assert_eq!(view.categories, vec!["odd", "even"]);
        assert_eq!(view.selected_category, "all");
        assert_eq!(view.message, None);
    }

    #[test]
    fn test_catalog_view_no_matches() {
        let mut catalog = CatalogFilter::default();
        catalog.load(vec![product(1, 100)]).unwrap();
        catalog.set_filter("zzz", CategoryFilter::All);

        let view = CatalogView::from(&catalog);
        assert!(view.items.is_empty());
        assert_eq!(view.page_label, "Page 1 of 1");
        assert!(!view.has_next);
        assert_eq!(view.message, Some(NO_PRODUCTS_MESSAGE));
    }

    #[test]
    fn test_catalog_view_failed_load() {
        let mut catalog = CatalogFilter::default();
        let ticket = catalog.begin_load();
        catalog.finish_load(ticket, Err(LoadError::Status(404)));

        let view = CatalogView::from(&catalog);
        assert_eq!(view.message, Some(LOAD_FAILED_MESSAGE));
        assert!(view.items.is_empty());
        assert!(view.categories.is_empty());
    }

    #[test]
    fn test_catalog_view_while_loading() {
        let view = CatalogView::from(&CatalogFilter::default());
        assert_eq!(view.status, CatalogStatus::Loading);
        assert_eq!(view.message, None);
    }

    #[test]
    fn test_cart_view() {
        let mut cart = CartStore::initialize(MemoryStore::new());
        let empty = CartView::from_cart(&cart);
        assert_eq!(empty.message, Some(EMPTY_CART_MESSAGE));
        assert_eq!(empty.subtotal, "$0.00");
        assert_eq!(empty.item_count, 0);

        cart.add_item(&product(1, 1000));
        cart.add_item(&product(2, 550));
        cart.add_item(&product(1, 1000));

        let view = CartView::from_cart(&cart);
        assert_eq!(view.message, None);
        assert_eq!(view.subtotal, "$25.50");
        assert_eq!(view.item_count, 3);
        assert!(view.persisted);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "$10.00");
        assert_eq!(view.items[0].line_price, "$20.00");
        assert_eq!(view.items[1].price, "$5.50");
    }
}
