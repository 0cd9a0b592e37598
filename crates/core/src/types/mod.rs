//! Core types for the storefront widget.
//!
//! This module provides type-safe wrappers for catalog and cart concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::{CartLine, Product, ProductError};
