//! Catalog browsing commands.

use storefront_widget::{CategoryFilter, Storefront, Store, WidgetConfig};

use super::Output;

/// Load the catalog, apply the criteria and show the requested page.
pub async fn list<S: Store>(
    storefront: &mut Storefront<S>,
    config: &WidgetConfig,
    search: &str,
    category: CategoryFilter,
    page: usize,
) -> Output {
    storefront.reload_catalog(&config.catalog).await;
    storefront.search(search, category);
    storefront.go_to_page(page);
    Output::Catalog(storefront.catalog_view())
}

/// Load the catalog and list its categories.
pub async fn categories<S: Store>(storefront: &mut Storefront<S>, config: &WidgetConfig) -> Output {
    storefront.reload_catalog(&config.catalog).await;
    Output::Categories(storefront.catalog_view())
}
