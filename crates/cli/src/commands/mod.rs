//! Subcommand implementations.
//!
//! Each command performs one user action against the storefront and returns
//! the resulting view. `main` decides how to print it.

use serde::Serialize;
use storefront_widget::views::{CartView, CatalogView};

use crate::render;

pub mod cart;
pub mod products;

/// What a command produced.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Catalog(CatalogView),
    Categories(CatalogView),
    Cart {
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
        #[serde(flatten)]
        view: CartView,
    },
}

impl Output {
    /// Plain text for a terminal.
    pub fn to_text(&self) -> String {
        match self {
            Self::Catalog(view) => render::catalog(view),
            Self::Categories(view) => render::categories(view),
            Self::Cart { notice, view } => match notice {
                Some(notice) => format!("{notice}\n\n{}", render::cart(view)),
                None => render::cart(view),
            },
        }
    }

    /// Pretty-printed JSON for another renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
