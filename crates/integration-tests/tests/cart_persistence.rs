//! Integration tests for cart persistence through a real `FileStore`.
//!
//! Each test uses its own temporary data directory, so the tests can run
//! in parallel.

#![allow(clippy::indexing_slicing)]

use std::fs;

use storefront_widget::cart::DEFAULT_CART_KEY;
use storefront_widget::{CartStore, FileStore, PersistenceError, Store};
use storefront_widget_core::{Price, ProductId};
use storefront_widget_integration_tests::{TempDir, numbered_products};

fn summary<S: Store>(cart: &CartStore<S>) -> Vec<(i32, u32)> {
    cart.lines()
        .iter()
        .map(|line| (line.id().as_i32(), line.quantity()))
        .collect()
}

#[test]
fn test_cart_survives_restart() {
    let dir = TempDir::new("cart-restart");
    let products = numbered_products(3);

    let mut cart = CartStore::initialize(FileStore::new(dir.path()));
    cart.add_item(&products[2]);
    cart.add_item(&products[0]);
    cart.add_item(&products[2]);
    cart.increase_quantity(ProductId::new(1));
    let before = cart.lines().to_vec();
    drop(cart);

    let reopened = CartStore::initialize(FileStore::new(dir.path()));
    assert_eq!(reopened.lines(), before.as_slice());
    assert_eq!(summary(&reopened), vec![(3, 2), (1, 2)]);
    assert_eq!(reopened.total(), Price::from_cents(800));
}

#[test]
fn test_snapshot_file_uses_catalog_shape() {
    let dir = TempDir::new("cart-shape");
    let products = numbered_products(1);

    let mut cart = CartStore::initialize(FileStore::new(dir.path()));
    cart.add_item(&products[0]);

    let raw = fs::read_to_string(dir.path().join("cart.json")).expect("snapshot written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("snapshot is JSON");
    assert_eq!(value[0]["id"], 1);
    assert_eq!(value[0]["name"], "Product 1");
    assert_eq!(value[0]["price"], 1.0);
    assert_eq!(value[0]["quantity"], 1);
}

#[test]
fn test_emptied_cart_persists_as_empty() {
    let dir = TempDir::new("cart-emptied");
    let products = numbered_products(2);

    let mut cart = CartStore::initialize(FileStore::new(dir.path()));
    cart.add_item(&products[0]);
    cart.add_item(&products[1]);
    cart.decrease_quantity(ProductId::new(1));
    cart.remove_item(ProductId::new(2));
    drop(cart);

    let reopened = CartStore::initialize(FileStore::new(dir.path()));
    assert!(reopened.is_empty());
    assert_eq!(reopened.item_count(), 0);
}

#[test]
fn test_corrupt_snapshot_is_replaced() {
    let dir = TempDir::new("cart-corrupt");
    fs::create_dir_all(dir.path()).expect("dir created");
    fs::write(dir.path().join(format!("{DEFAULT_CART_KEY}.json")), "[{\"id\":")
        .expect("corrupt snapshot written");

    let mut cart = CartStore::initialize(FileStore::new(dir.path()));
    assert!(cart.is_empty());
    assert!(cart.persistence_error().is_none());

    cart.add_item(&numbered_products(1)[0]);
    drop(cart);

    let reopened = CartStore::initialize(FileStore::new(dir.path()));
    assert_eq!(summary(&reopened), vec![(1, 1)]);
}

#[test]
fn test_unwritable_store_degrades_to_memory() {
    let dir = TempDir::new("cart-unwritable");
    let data_dir = dir.path().join("data");
    let products = numbered_products(2);

    let mut cart = CartStore::initialize(FileStore::new(&data_dir));
    assert!(cart.persistence_error().is_none());

    // A regular file where the store expects its directory
    fs::create_dir_all(dir.path()).expect("dir created");
    fs::write(&data_dir, "").expect("blocker written");

    assert!(cart.add_item(&products[0]));
    assert!(cart.add_item(&products[1]));

    assert_eq!(cart.item_count(), 2);
    assert!(matches!(
        cart.persistence_error(),
        Some(PersistenceError::Write { .. })
    ));
}

#[test]
fn test_unreadable_store_is_never_overwritten() {
    let dir = TempDir::new("cart-unreadable");
    fs::create_dir_all(dir.path()).expect("dir created");
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").expect("blocker written");

    let mut cart = CartStore::initialize(FileStore::new(&blocker));
    assert!(matches!(
        cart.persistence_error(),
        Some(PersistenceError::Read { .. })
    ));

    assert!(cart.add_item(&numbered_products(1)[0]));
    assert_eq!(cart.item_count(), 1);
    assert_eq!(fs::read_to_string(&blocker).expect("blocker intact"), "");
}

#[test]
fn test_separate_keys_are_independent() {
    let dir = TempDir::new("cart-keys");
    let products = numbered_products(2);

    let mut first = CartStore::initialize_with_key(FileStore::new(dir.path()), "first");
    let mut second = CartStore::initialize_with_key(FileStore::new(dir.path()), "second");
    first.add_item(&products[0]);
    second.add_item(&products[1]);
    second.add_item(&products[1]);

    let first = CartStore::initialize_with_key(FileStore::new(dir.path()), "first");
    let second = CartStore::initialize_with_key(FileStore::new(dir.path()), "second");
    assert_eq!(summary(&first), vec![(1, 1)]);
    assert_eq!(summary(&second), vec![(2, 2)]);
}
