//! Storefront Widget Core - Shared types library.
//!
//! This crate provides the domain types used across the storefront widget:
//! - `storefront` - Catalog filtering, cart state and persistence
//! - `cli` - Command-line renderer for browsing the catalog and editing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no stores,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   `Product` and `CartLine` records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
