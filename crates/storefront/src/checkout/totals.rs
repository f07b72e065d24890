//! Shared order totals policy.
//!
//! The shipping fee rule is a single pure function of the cart subtotal,
//! applied identically wherever a total is displayed (cart summary and
//! checkout summary). There is exactly one implementation of this policy.

use rust_decimal::Decimal;

use verde_core::Price;

/// Orders strictly above this subtotal ship free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat fee in cents for orders at or below the threshold.
const STANDARD_SHIPPING_CENTS: i64 = 999;

/// Shipping fee for a given subtotal: zero above the free-shipping
/// threshold, a flat $9.99 otherwise.
#[must_use]
pub fn shipping_fee(subtotal: &Price) -> Price {
    if subtotal.amount() > FREE_SHIPPING_THRESHOLD {
        Price::zero(subtotal.currency_code())
    } else {
        Price::new(Decimal::new(STANDARD_SHIPPING_CENTS, 2), subtotal.currency_code())
    }
}

/// Derived monetary figures for an order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub grand_total: Price,
}

/// Compute the full order totals from a cart subtotal.
#[must_use]
pub fn order_totals(subtotal: Price) -> OrderTotals {
    let fee = shipping_fee(&subtotal);
    let grand_total = Price::new(subtotal.amount() + fee.amount(), subtotal.currency_code());
    OrderTotals {
        subtotal,
        shipping_fee: fee,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_at_exactly_fifty_is_standard() {
        assert_eq!(
            shipping_fee(&Price::from_major(50)),
            Price::from_cents(999)
        );
    }

    #[test]
    fn test_fee_just_above_fifty_is_free() {
        assert!(shipping_fee(&Price::from_cents(5001)).is_zero());
    }

    #[test]
    fn test_fee_on_empty_subtotal_is_standard() {
        assert_eq!(
            shipping_fee(&Price::from_major(0)),
            Price::from_cents(999)
        );
    }

    #[test]
    fn test_order_totals_adds_fee() {
        let totals = order_totals(Price::from_major(20));
        assert_eq!(totals.subtotal, Price::from_major(20));
        assert_eq!(totals.shipping_fee, Price::from_cents(999));
        assert_eq!(totals.grand_total, Price::from_cents(2999));
    }

    #[test]
    fn test_order_totals_free_shipping() {
        let totals = order_totals(Price::from_major(55));
        assert!(totals.shipping_fee.is_zero());
        assert_eq!(totals.grand_total, Price::from_major(55));
    }
}
