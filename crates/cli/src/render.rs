//! Plain-text rendering of storefront views.

use storefront_widget::CatalogStatus;
use storefront_widget::views::{CartView, CatalogView};

/// Render the product grid and its pagination controls.
pub fn catalog(view: &CatalogView) -> String {
    let mut lines = Vec::new();

    if let Some(message) = view.message {
        lines.push(message.to_string());
    } else if view.status == CatalogStatus::Loading {
        lines.push("Loading products...".to_string());
    } else {
        for item in &view.items {
            lines.push(format!(
                "{:>6}  {:<32} {:>10}  {}",
                format!("#{}", item.id),
                item.name,
                item.price,
                item.image
            ));
        }
    }

    // A failed load has nothing to paginate
    if !matches!(view.status, CatalogStatus::Failed(_)) {
        lines.push(String::new());
        lines.push(pagination(view));
    }

    lines.join("\n")
}

fn pagination(view: &CatalogView) -> String {
    let previous = if view.has_previous { "< prev" } else { "      " };
    let next = if view.has_next { "next >" } else { "      " };
    format!("{previous}  {}  {next}", view.page_label)
}

/// Render the category selector options.
pub fn categories(view: &CatalogView) -> String {
    if let Some(message) = view.message.filter(|_| view.categories.is_empty()) {
        return message.to_string();
    }

    std::iter::once("all".to_string())
        .chain(view.categories.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the cart contents, badge count and total.
pub fn cart(view: &CartView) -> String {
    let mut lines = vec![format!("Cart ({})", view.item_count)];

    if let Some(message) = view.message {
        lines.push(message.to_string());
    } else {
        for item in &view.items {
            lines.push(format!(
                "{:>6}  {:<32} {:>10} x {:<4} {:>10}",
                format!("#{}", item.id),
                item.name,
                item.price,
                item.quantity,
                item.line_price
            ));
        }
    }

    lines.push(format!("Total: {}", view.subtotal));
    if !view.persisted {
        lines.push("Warning: the cart could not be saved; changes will be lost.".to_string());
    }
    lines.join("\n")
}
