//! End-to-end cart store scenarios.
//!
//! These exercise the store the way the storefront UI does: sequences of
//! add/remove/update operations with the derived aggregates checked against
//! a live recomputation after every step.

use rust_decimal::Decimal;

use verde_core::{Price, ProductId};
use verde_integration_tests::{candidate, memory_cart};
use verde_storefront::cart::aggregates;

/// Aggregates must always equal the live recomputation over the items.
fn assert_invariant(cart: &verde_storefront::cart::CartStore) {
    let (count, subtotal) = aggregates(cart.items());
    assert_eq!(cart.item_count(), count, "item_count drifted");
    assert_eq!(cart.subtotal(), subtotal, "subtotal drifted");
}

#[test]
fn test_mixed_operation_sequence_keeps_aggregates_consistent() {
    let mut cart = memory_cart();

    cart.add_item(candidate("utensils", 2499));
    assert_invariant(&cart);

    cart.add_item(candidate("candle", 1600));
    assert_invariant(&cart);

    cart.add_item(candidate("utensils", 2499));
    assert_invariant(&cart);

    cart.update_quantity(&ProductId::new("candle"), 4);
    assert_invariant(&cart);

    cart.remove_item(&ProductId::new("utensils"));
    assert_invariant(&cart);

    cart.update_quantity(&ProductId::new("candle"), -5);
    assert_invariant(&cart);

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert!(cart.subtotal().is_zero());
}

#[test]
fn test_duplicate_add_merges_lines() {
    let mut cart = memory_cart();
    cart.add_item(candidate("bottle", 2999));
    cart.add_item(candidate("bottle", 2999));

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn test_zero_and_negative_quantities_delete_the_line() {
    let mut cart = memory_cart();

    cart.add_item(candidate("a", 1000));
    cart.update_quantity(&ProductId::new("a"), 0);
    assert!(cart.items().iter().all(|i| i.id != ProductId::new("a")));

    cart.add_item(candidate("a", 1000));
    cart.update_quantity(&ProductId::new("a"), -5);
    assert!(cart.items().iter().all(|i| i.id != ProductId::new("a")));
}

#[test]
fn test_clear_resets_regardless_of_prior_state() {
    let mut cart = memory_cart();
    cart.add_item(candidate("a", 1234));
    cart.add_item(candidate("b", 5678));
    cart.update_quantity(&ProductId::new("b"), 9);

    cart.clear();

    assert!(cart.items().is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.subtotal().amount(), Decimal::ZERO);
}

#[test]
fn test_subtotal_uses_unit_price_not_original_price() {
    let mut cart = memory_cart();
    let mut item = candidate("throw", 6800);
    item.original_unit_price = Some(Price::from_cents(8500));
    cart.add_item(item);
    cart.update_quantity(&ProductId::new("throw"), 2);

    assert_eq!(cart.subtotal(), Price::from_cents(13600));
}
