//! The storefront: one catalog and one cart, owned together.
//!
//! `Storefront` is what a renderer holds. It routes user actions to the
//! catalog or the cart, resolves "add to cart" by product id against the
//! loaded catalog, and leaves a Sentry breadcrumb for each action.

use storefront_widget_core::ProductId;
use tracing::{info, instrument, warn};

use crate::cart::CartStore;
use crate::catalog::{CatalogFilter, CatalogSource, CatalogStatus, CategoryFilter};
use crate::config::WidgetConfig;
use crate::error::add_breadcrumb;
use crate::store::Store;
use crate::views::{CartView, CatalogView};

/// Catalog and cart state for a single storefront session.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: CatalogFilter,
    cart: CartStore<S>,
}

impl<S: Store> Storefront<S> {
    /// Create a storefront with an empty, loading catalog and the cart
    /// restored from `store`.
    pub fn new(config: &WidgetConfig, store: S) -> Self {
        Self {
            catalog: CatalogFilter::new(config.page_size),
            cart: CartStore::initialize_with_key(store, config.cart_key.clone()),
        }
    }

    /// Fetch the catalog from `source` and load it.
    ///
    /// Failures are not returned; they leave the catalog in
    /// [`CatalogStatus::Failed`] for the renderer to show.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn reload_catalog(&mut self, source: &CatalogSource) {
        let ticket = self.catalog.begin_load();
        let result = source.fetch().await;
        self.catalog.finish_load(ticket, result);

        if self.catalog.status() == &CatalogStatus::Ready {
            info!(products = self.catalog.products().len(), "Catalog ready");
        }
    }

    // =========================================================================
    // Catalog actions
    // =========================================================================

    /// Apply search and category criteria; returns to page 1.
    pub fn search(&mut self, term: &str, category: CategoryFilter) {
        add_breadcrumb(
            "catalog",
            "Filtered products",
            Some(&[("term", term), ("category", &category.to_string())]),
        );
        self.catalog.set_filter(term, category);
    }

    /// Jump to a page (clamped).
    pub fn go_to_page(&mut self, page: usize) -> bool {
        add_breadcrumb("catalog", "Changed page", Some(&[("page", &page.to_string())]));
        self.catalog.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        add_breadcrumb("catalog", "Next page", None);
        self.catalog.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        add_breadcrumb("catalog", "Previous page", None);
        self.catalog.previous_page()
    }

    // =========================================================================
    // Cart actions
    // =========================================================================

    /// Add one unit of a catalog product to the cart.
    ///
    /// Returns `false` if `id` is not in the loaded catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> bool {
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", &id.to_string())]));
        let Some(product) = self.catalog.product(id) else {
            warn!(product_id = %id, "Add to cart for unknown product");
            return false;
        };
        self.cart.add_item(product)
    }

    pub fn increase_quantity(&mut self, id: ProductId) -> bool {
        add_breadcrumb("cart", "Increased quantity", Some(&[("product_id", &id.to_string())]));
        self.cart.increase_quantity(id)
    }

    pub fn decrease_quantity(&mut self, id: ProductId) -> bool {
        add_breadcrumb("cart", "Decreased quantity", Some(&[("product_id", &id.to_string())]));
        self.cart.decrease_quantity(id)
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", &id.to_string())]));
        self.cart.remove_item(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &CatalogFilter {
        &self.catalog
    }

    /// Mutable access for loading a catalog obtained some other way.
    pub const fn catalog_mut(&mut self) -> &mut CatalogFilter {
        &mut self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::from(&self.catalog)
    }

    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from_cart(&self.cart)
    }
}
