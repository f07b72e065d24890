//! Durable cart record behavior across store reopens.
//!
//! Each `CartStore::open` here models a client restart against the same
//! device storage.

use verde_core::{Price, ProductId};
use verde_integration_tests::candidate;
use verde_storefront::cart::storage::JsonFileStorage;
use verde_storefront::cart::CartStore;

fn file_storage(dir: &tempfile::TempDir) -> JsonFileStorage {
    JsonFileStorage::new(dir.path().join("cart.json"))
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut cart = CartStore::open(Box::new(file_storage(&dir)));
        cart.add_item(candidate("bottle", 2999));
        cart.add_item(candidate("bottle", 2999));
        cart.add_item(candidate("tote", 3800));
    }

    let cart = CartStore::open(Box::new(file_storage(&dir)));
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Price::from_cents(9798));
    let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["bottle", "tote"]);
}

#[test]
fn test_clear_persists_too() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut cart = CartStore::open(Box::new(file_storage(&dir)));
        cart.add_item(candidate("bottle", 2999));
        cart.clear();
    }

    let cart = CartStore::open(Box::new(file_storage(&dir)));
    assert!(cart.is_empty());
}

#[test]
fn test_incompatible_record_fails_open_to_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    std::fs::write(&path, r#"{"schema": 2, "entries": [{"sku": "x"}]}"#)
        .expect("write incompatible record");

    let cart = CartStore::open(Box::new(JsonFileStorage::new(path.clone())));
    assert!(cart.is_empty());

    // The store is fully usable afterwards and overwrites the bad record.
    let mut cart = CartStore::open(Box::new(JsonFileStorage::new(path.clone())));
    cart.add_item(candidate("bottle", 2999));
    drop(cart);

    let reopened = CartStore::open(Box::new(JsonFileStorage::new(path)));
    assert_eq!(reopened.item_count(), 1);
    assert_eq!(reopened.items()[0].id, ProductId::new("bottle"));
}

#[test]
fn test_latest_write_wins() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut cart = CartStore::open(Box::new(file_storage(&dir)));
    cart.add_item(candidate("bottle", 2999));
    cart.update_quantity(&ProductId::new("bottle"), 5);
    cart.update_quantity(&ProductId::new("bottle"), 2);
    drop(cart);

    let reopened = CartStore::open(Box::new(file_storage(&dir)));
    assert_eq!(reopened.item_count(), 2);
}
