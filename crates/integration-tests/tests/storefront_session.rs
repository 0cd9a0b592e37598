//! End-to-end storefront sessions.
//!
//! A session loads the catalog from disk, browses it, edits the cart and
//! then "restarts" by building a new `Storefront` over the same data
//! directory.

use storefront_widget::views::{EMPTY_CART_MESSAGE, LOAD_FAILED_MESSAGE, NO_PRODUCTS_MESSAGE};
use storefront_widget::{
    CatalogSource, CatalogStatus, CategoryFilter, FileStore, Storefront, WidgetConfig,
};
use storefront_widget_core::{Price, Product, ProductId};
use storefront_widget_integration_tests::{TempDir, numbered_products, write_catalog};

fn config_for(dir: &TempDir, products: &[Product]) -> WidgetConfig {
    WidgetConfig {
        catalog: CatalogSource::File(write_catalog(&dir.path().join("feed"), products)),
        data_dir: dir.path().join("data"),
        ..WidgetConfig::default()
    }
}

async fn open(config: &WidgetConfig) -> Storefront<FileStore> {
    let mut storefront = Storefront::new(config, FileStore::new(&config.data_dir));
    storefront.reload_catalog(&config.catalog).await;
    storefront
}

#[tokio::test]
async fn test_two_product_scenario() {
    let dir = TempDir::new("session-scenario");
    let mut mug = numbered_products(1).remove(0);
    mug.price = Price::from_cents(1000);
    let mut tee = numbered_products(2).remove(1);
    tee.price = Price::from_cents(550);
    let config = config_for(&dir, &[mug, tee]);

    let mut storefront = open(&config).await;
    assert_eq!(storefront.catalog().status(), &CatalogStatus::Ready);

    assert!(storefront.add_to_cart(ProductId::new(1)));
    assert!(storefront.add_to_cart(ProductId::new(2)));
    assert!(storefront.add_to_cart(ProductId::new(1)));

    let cart = storefront.cart_view();
    let lines: Vec<(i32, u32)> = cart.items.iter().map(|i| (i.id.as_i32(), i.quantity)).collect();
    assert_eq!(lines, vec![(1, 2), (2, 1)]);
    assert_eq!(cart.subtotal, "$25.50");
    assert_eq!(cart.item_count, 3);
}

#[tokio::test]
async fn test_cart_restored_after_restart() {
    let dir = TempDir::new("session-restart");
    let config = config_for(&dir, &numbered_products(6));

    let mut storefront = open(&config).await;
    storefront.add_to_cart(ProductId::new(5));
    storefront.add_to_cart(ProductId::new(2));
    storefront.increase_quantity(ProductId::new(5));
    let before = storefront.cart_view();
    drop(storefront);

    let restarted = open(&config).await;
    assert_eq!(restarted.cart_view(), before);
    assert_eq!(restarted.cart_view().subtotal, "$12.00");
}

#[tokio::test]
async fn test_browse_filter_and_page() {
    let dir = TempDir::new("session-browse");
    let config = config_for(&dir, &numbered_products(10));
    let mut storefront = open(&config).await;

    let view = storefront.catalog_view();
    assert_eq!(view.page_label, "Page 1 of 3");
    assert_eq!(view.categories, vec!["Kitchen", "Apparel"]);

    assert!(storefront.next_page());
    assert!(storefront.next_page());
    let view = storefront.catalog_view();
    assert_eq!(view.items.len(), 2);
    assert!(view.has_previous);
    assert!(!view.has_next);

    storefront.search("limited", CategoryFilter::Only("Apparel".to_string()));
    let view = storefront.catalog_view();
    let ids: Vec<i32> = view.items.iter().map(|c| c.id.as_i32()).collect();
    assert_eq!(ids, vec![6]);
    assert_eq!(view.page_label, "Page 1 of 1");

    storefront.search("zzz", CategoryFilter::All);
    assert_eq!(storefront.catalog_view().message, Some(NO_PRODUCTS_MESSAGE));
}

#[tokio::test]
async fn test_missing_catalog_shows_error_but_cart_still_works() {
    let dir = TempDir::new("session-missing");
    let config = WidgetConfig {
        catalog: CatalogSource::File(dir.path().join("absent.json")),
        data_dir: dir.path().join("data"),
        ..WidgetConfig::default()
    };

    let mut storefront = open(&config).await;
    let view = storefront.catalog_view();
    assert!(matches!(view.status, CatalogStatus::Failed(_)));
    assert_eq!(view.message, Some(LOAD_FAILED_MESSAGE));
    assert_eq!(view.total_pages, 1);

    assert!(!storefront.add_to_cart(ProductId::new(1)));
    assert_eq!(storefront.cart_view().message, Some(EMPTY_CART_MESSAGE));
}

#[tokio::test]
async fn test_reload_recovers_after_failure() {
    let dir = TempDir::new("session-recover");
    let products = numbered_products(3);
    let feed = dir.path().join("feed");
    let config = WidgetConfig {
        catalog: CatalogSource::File(feed.join("products.json")),
        data_dir: dir.path().join("data"),
        ..WidgetConfig::default()
    };

    let mut storefront = open(&config).await;
    assert!(matches!(storefront.catalog().status(), CatalogStatus::Failed(_)));

    let _ = write_catalog(&feed, &products);
    storefront.reload_catalog(&config.catalog).await;
    assert_eq!(storefront.catalog().status(), &CatalogStatus::Ready);
    assert_eq!(storefront.catalog_view().items.len(), 3);
}
