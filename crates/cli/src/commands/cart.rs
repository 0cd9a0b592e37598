//! Cart commands.
//!
//! Only `add` needs the catalog; the other commands work purely on the
//! persisted cart, so they run even when the catalog is unreachable.

use storefront_widget::{CatalogStatus, Storefront, Store, WidgetConfig};
use storefront_widget_core::ProductId;

use super::Output;

pub fn show<S: Store>(storefront: &Storefront<S>) -> Output {
    with_notice(None, storefront)
}

/// Add one unit of a catalog product.
pub async fn add<S: Store>(
    storefront: &mut Storefront<S>,
    config: &WidgetConfig,
    id: ProductId,
) -> Output {
    storefront.reload_catalog(&config.catalog).await;
    if matches!(storefront.catalog().status(), CatalogStatus::Failed(_)) {
        return Output::Catalog(storefront.catalog_view());
    }

    if storefront.add_to_cart(id) {
        with_notice(Some("Added!".to_string()), storefront)
    } else {
        with_notice(Some(format!("No product with id {id}.")), storefront)
    }
}

pub fn increase<S: Store>(storefront: &mut Storefront<S>, id: ProductId) -> Output {
    let changed = storefront.increase_quantity(id);
    after_change(changed, id, storefront)
}

pub fn decrease<S: Store>(storefront: &mut Storefront<S>, id: ProductId) -> Output {
    let changed = storefront.decrease_quantity(id);
    after_change(changed, id, storefront)
}

pub fn remove<S: Store>(storefront: &mut Storefront<S>, id: ProductId) -> Output {
    let changed = storefront.remove_from_cart(id);
    after_change(changed, id, storefront)
}

fn after_change<S: Store>(changed: bool, id: ProductId, storefront: &Storefront<S>) -> Output {
    let notice = (!changed).then(|| format!("Product {id} is not in the cart."));
    with_notice(notice, storefront)
}

fn with_notice<S: Store>(notice: Option<String>, storefront: &Storefront<S>) -> Output {
    Output::Cart {
        notice,
        view: storefront.cart_view(),
    }
}
