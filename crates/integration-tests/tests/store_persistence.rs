//! File-backed store behavior across store instances.
//!
//! Each `CartStore`/`WishlistStore` built over the same data directory
//! models a separate process lifetime; these tests verify that state
//! written by one instance is observed by the next.

use std::sync::Arc;

use rust_decimal::Decimal;

use dgency_core::{CustomerId, Identity};
use dgency_storefront::store::{
    CartItemInput, CartStore, FileStorage, StorageBackend, WishlistEntry, WishlistStore,
    item_count, total,
};

fn backend(dir: &std::path::Path) -> Arc<dyn StorageBackend> {
    Arc::new(FileStorage::new(dir).expect("create storage"))
}

fn cart_item(id: &str, price: i64) -> CartItemInput {
    CartItemInput {
        id: id.to_string(),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        image: format!("https://cdn.example/{id}.jpg"),
        slug: format!("product-{id}"),
    }
}

fn wishlist_entry(id: &str) -> WishlistEntry {
    WishlistEntry {
        id: id.to_string(),
        name: format!("Product {id}"),
        slug: format!("product-{id}"),
        price: Decimal::from(20),
        image: format!("https://cdn.example/{id}.jpg"),
        original_price: None,
        discount: None,
        in_stock: Some(true),
    }
}

#[test]
fn test_cart_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let cart = CartStore::new(backend(dir.path()));
        cart.add(cart_item("7", 30), 2).expect("add");
        cart.add(cart_item("12", 15), 1).expect("add");
    }

    let reopened = CartStore::new(backend(dir.path()));
    let lines = reopened.items();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines.first().map(|l| l.quantity), Some(2));
}

#[test]
fn test_cart_mutations_visible_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = CartStore::new(backend(dir.path()));
    first.add(cart_item("3", 10), 1).expect("add");

    // A second instance over the same directory sees and mutates the
    // same persisted collection.
    let second = CartStore::new(backend(dir.path()));
    second.update_quantity("3", 5);

    assert_eq!(first.items().first().map(|l| l.quantity), Some(5));
}

#[test]
fn test_wishlists_keep_identity_scoping_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let user = Identity::User(CustomerId::new(42));

    {
        let wishlist = WishlistStore::new(backend(dir.path()));
        wishlist.add(Identity::Guest, wishlist_entry("1"));
        wishlist.add(user, wishlist_entry("2"));
    }

    let reopened = WishlistStore::new(backend(dir.path()));
    assert!(reopened.is_wished(Identity::Guest, "1"));
    assert!(!reopened.is_wished(Identity::Guest, "2"));
    assert!(reopened.is_wished(user, "2"));
}

#[test]
fn test_corrupt_cart_file_reads_empty_and_recovers() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("dgency_cart.json"), "{ not json").expect("seed");

    let cart = CartStore::new(backend(dir.path()));
    assert!(cart.items().is_empty());

    // The first successful write replaces the corrupt value
    cart.add(cart_item("5", 10), 1).expect("add");
    let reopened = CartStore::new(backend(dir.path()));
    assert_eq!(reopened.items().len(), 1);
}

#[test]
fn test_totals_are_derivable_from_reopened_state() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let cart = CartStore::new(backend(dir.path()));
        cart.add(cart_item("1", 10), 2).expect("add");
        cart.add(cart_item("2", 5), 3).expect("add");
    }

    let lines = CartStore::new(backend(dir.path())).items();
    assert_eq!(total(&lines), Decimal::from(35));
    assert_eq!(item_count(&lines), 5);
}

/// Backend whose writes always fail, like a full disk or revoked quota.
struct BrokenStorage;

impl StorageBackend for BrokenStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> std::io::Result<()> {
        Err(std::io::Error::other("storage unavailable"))
    }

    fn remove(&self, _key: &str) -> std::io::Result<()> {
        Err(std::io::Error::other("storage unavailable"))
    }
}

#[test]
fn test_write_failures_are_swallowed_not_propagated() {
    let cart = CartStore::new(Arc::new(BrokenStorage));

    // The mutation itself succeeds and returns the in-memory view
    let lines = cart.add(cart_item("5", 10), 2).expect("add");
    assert_eq!(lines.len(), 1);

    // Nothing was persisted, so the next read starts from scratch
    assert!(cart.items().is_empty());
}

#[test]
fn test_cart_and_wishlist_share_a_backend_without_interference() {
    let dir = tempfile::tempdir().expect("tempdir");
    let shared = backend(dir.path());

    let cart = CartStore::new(Arc::clone(&shared));
    let wishlist = WishlistStore::new(shared);

    cart.add(cart_item("1", 10), 1).expect("add");
    wishlist.add(Identity::Guest, wishlist_entry("1"));
    cart.clear();

    assert!(cart.items().is_empty());
    assert!(wishlist.is_wished(Identity::Guest, "1"));
}
