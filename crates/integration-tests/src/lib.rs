//! Integration tests for Verde.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verde-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart operations and the derived-aggregate invariant
//! - `checkout_flow` - End-to-end checkout scenarios
//! - `persistence` - Durable cart record behavior across reopens
//!
//! The helpers below build stores against in-memory storage so tests stay
//! hermetic; the persistence suite uses temp-dir file storage instead.

use verde_core::{Price, ProductId};
use verde_storefront::cart::storage::MemoryStorage;
use verde_storefront::cart::{CartStore, NewLineItem};

/// A cart store backed by fresh in-memory storage.
#[must_use]
pub fn memory_cart() -> CartStore {
    CartStore::open(Box::new(MemoryStorage::new()))
}

/// A line-item candidate with the given id and unit price in cents.
#[must_use]
pub fn candidate(id: &str, cents: i64) -> NewLineItem {
    NewLineItem {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        image: format!("/images/{id}.jpg"),
        unit_price: Price::from_cents(cents),
        original_unit_price: None,
    }
}
