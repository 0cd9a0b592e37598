//! Catalog filtering and pagination.
//!
//! [`CatalogFilter`] owns the full product list and a derived view: the
//! products matching the current search term and category, cut into pages
//! of a fixed size. The view is recomputed eagerly whenever the criteria or
//! the product list change, so every query is a cheap read.
//!
//! # Loading
//!
//! A catalog starts out [`CatalogStatus::Loading`]. Loads are tracked by
//! [`LoadTicket`]s: only the result for the most recently issued ticket is
//! applied, so a slow load that was superseded by a newer one can never
//! overwrite fresher data.
//!
//! ```rust,ignore
//! let ticket = catalog.begin_load();
//! let result = source.fetch().await;
//! catalog.finish_load(ticket, result);
//! ```

mod source;

pub use source::{CatalogSource, LoadError, parse_catalog};

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;
use storefront_widget_core::{Product, ProductId};
use tracing::{debug, info, warn};

/// Products per page when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => unreachable!(),
};

/// Category criterion for [`CatalogFilter::set_filter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only products whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// Exactly `"all"` selects every category; anything else is a label,
    /// so a category named "All" stays selectable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Where the catalog is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum CatalogStatus {
    /// No load has completed yet.
    Loading,
    /// Products are available (possibly zero of them).
    Ready,
    /// The most recent load failed; the view is empty.
    Failed(String),
}

/// Identifies one call to [`CatalogFilter::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket to finish_load"]
pub struct LoadTicket(u64);

/// The full product set plus its filtered, paginated view.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    products: Vec<Product>,
    categories: Vec<String>,
    /// Indices into `products` that pass the current criteria, in source order.
    filtered: Vec<usize>,
    search_term: String,
    category: CategoryFilter,
    /// 1-based; always within `1..=total_pages()`.
    page: usize,
    page_size: NonZeroUsize,
    status: CatalogStatus,
    generation: u64,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogFilter {
    /// Create an empty catalog in the [`CatalogStatus::Loading`] state.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            category: CategoryFilter::All,
            page: 1,
            page_size,
            status: CatalogStatus::Loading,
            generation: 0,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the product set and reset the view to show everything.
    ///
    /// On error the catalog is cleared and marked [`CatalogStatus::Failed`];
    /// the error is returned as well so callers can log or report it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if a product is invalid or ids repeat.
    pub fn load(&mut self, products: Vec<Product>) -> Result<(), LoadError> {
        if let Err(e) = validate_products(&products) {
            self.fail(&e);
            return Err(e);
        }

        let mut seen = HashSet::new();
        self.categories = products
            .iter()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect();
        self.products = products;
        self.search_term.clear();
        self.category = CategoryFilter::All;
        self.status = CatalogStatus::Ready;
        self.recompute();

        info!(
            products = self.products.len(),
            categories = self.categories.len(),
            "Catalog loaded"
        );
        Ok(())
    }

    /// Parse a JSON catalog document and [`load`](Self::load) it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document is malformed or invalid.
    pub fn load_json(&mut self, body: &str) -> Result<(), LoadError> {
        match parse_catalog(body) {
            Ok(products) => self.load(products),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Start a new load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = CatalogStatus::Loading;
        LoadTicket(self.generation)
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) if a newer load has begun since
    /// the ticket was issued.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Product>, LoadError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded catalog load"
            );
            return false;
        }

        match result {
            Ok(products) => {
                if let Err(e) = self.load(products) {
                    debug!(ticket = ticket.0, error = %e, "Fetched catalog rejected");
                }
            }
            Err(e) => self.fail(&e),
        }
        true
    }

    fn fail(&mut self, error: &LoadError) {
        warn!(error = %error, "Catalog load failed");
        self.products.clear();
        self.categories.clear();
        self.filtered.clear();
        self.search_term.clear();
        self.category = CategoryFilter::All;
        self.page = 1;
        self.status = CatalogStatus::Failed(error.to_string());
    }

    // =========================================================================
    // Criteria
    // =========================================================================

    /// Filter by a case-insensitive substring of name or description and by
    /// category. Always returns to page 1.
    pub fn set_filter(&mut self, search_term: &str, category: CategoryFilter) {
        search_term.clone_into(&mut self.search_term);
        self.category = category;
        self.recompute();
    }

    /// Jump to page `n`, clamped to the valid range.
    ///
    /// Returns whether the current page changed.
    pub fn set_page(&mut self, n: usize) -> bool {
        let clamped = n.clamp(1, self.total_pages());
        if clamped == self.page {
            return false;
        }
        self.page = clamped;
        debug!(page = self.page, "Catalog page changed");
        true
    }

    /// Advance one page if the "next" control is enabled.
    pub fn next_page(&mut self) -> bool {
        self.has_next_page() && self.set_page(self.page + 1)
    }

    /// Go back one page if the "previous" control is enabled.
    pub fn previous_page(&mut self) -> bool {
        self.has_previous_page() && self.set_page(self.page - 1)
    }

    fn recompute(&mut self) {
        let needle = self.search_term.to_lowercase();
        self.filtered = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| self.category.matches(&p.category) && p.matches_term(&needle))
            .map(|(i, _)| i)
            .collect();
        self.page = 1;

        debug!(
            search_term = %self.search_term,
            category = %self.category,
            matches = self.filtered.len(),
            "Catalog view recomputed"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Products on the current page, in source order.
    #[must_use]
    pub fn current_page_items(&self) -> Vec<&Product> {
        let size = self.page_size.get();
        self.filtered
            .iter()
            .skip((self.page - 1) * size)
            .take(size)
            .filter_map(|&i| self.products.get(i))
            .collect()
    }

    /// Every product passing the current criteria, across all pages.
    pub fn filtered_products(&self) -> impl Iterator<Item = &Product> {
        self.filtered.iter().filter_map(|&i| self.products.get(i))
    }

    /// `max(1, ceil(filtered / page_size))`.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size.get()).max(1)
    }

    /// Whether the "previous" control should be enabled.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Whether the "next" control should be enabled.
    ///
    /// Disabled on the last page and whenever nothing matches.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        !self.filtered.is_empty() && self.page < self.total_pages()
    }

    /// Distinct categories across the full set, in order of first appearance.
    #[must_use]
    pub fn available_categories(&self) -> &[String] {
        &self.categories
    }

    /// Look up a product in the full set, ignoring the current filter.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All loaded products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products passing the current criteria.
    #[must_use]
    pub const fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Current page, 1-based.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    #[must_use]
    pub const fn status(&self) -> &CatalogStatus {
        &self.status
    }
}

fn validate_products(products: &[Product]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        product.validate()?;
        if !seen.insert(product.id) {
            return Err(LoadError::DuplicateId(product.id));
        }
    }
    Ok(())
}
