//! Cart store: single source of truth for the shopping cart.
//!
//! The store holds an ordered collection of line items (insertion order is
//! display order) plus two derived aggregates, item count and subtotal. The
//! aggregates are always recomputed from the full item collection after a
//! mutation, never adjusted incrementally, so they cannot drift from the
//! items they summarize.
//!
//! Every mutation ends with a best-effort write of the full snapshot to the
//! injected [`storage::CartStorage`]. A failed write is logged and the
//! in-memory state stays authoritative for the running session.
//!
//! The store is a synchronous single-writer container. It is not safe for
//! concurrent mutation from multiple threads without external serialization;
//! [`crate::AppState`] wraps it in a mutex for that reason.

pub mod storage;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use verde_core::{CurrencyCode, Price, ProductId};

use crate::catalog::Product;
use storage::CartStorage;

/// One product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    /// Display metadata, opaque to the store.
    pub name: String,
    /// Display metadata, opaque to the store.
    pub image: String,
    pub unit_price: Price,
    /// Pre-discount reference price, display only; never part of totals.
    #[serde(default)]
    pub original_unit_price: Option<Price>,
    /// Always >= 1 while the item is in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A candidate for [`CartStore::add_item`]: a line item without a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: Price,
    pub original_unit_price: Option<Price>,
}

impl From<&Product> for NewLineItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            original_unit_price: product.original_price,
        }
    }
}

/// The full cart state: items plus derived aggregates.
///
/// This is both the read model handed to callers and the durable record
/// written to storage after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub item_count: u32,
    pub subtotal: Price,
}

impl CartSnapshot {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            item_count: 0,
            subtotal: Price::zero(CurrencyCode::default()),
        }
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Recompute the derived aggregates from the authoritative item collection.
///
/// Pure function, callable from tests in isolation: the item count is the
/// sum of quantities, the subtotal is the sum of `unit_price * quantity`.
#[must_use]
pub fn aggregates(items: &[LineItem]) -> (u32, Price) {
    let item_count = items.iter().map(|item| item.quantity).sum();
    let subtotal = items.iter().fold(Decimal::ZERO, |acc, item| {
        acc + item.unit_price.amount() * Decimal::from(item.quantity)
    });
    let currency = items
        .first()
        .map_or_else(CurrencyCode::default, |item| item.unit_price.currency_code());
    (item_count, Price::new(subtotal, currency))
}

/// Single-writer cart state container.
pub struct CartStore {
    items: Vec<LineItem>,
    item_count: u32,
    subtotal: Price,
    storage: Box<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("item_count", &self.item_count)
            .field("subtotal", &self.subtotal)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart store, restoring a previously persisted snapshot if one
    /// exists. Unreadable or shape-incompatible stored state fails open to
    /// an empty cart.
    #[must_use]
    pub fn open(storage: Box<dyn CartStorage>) -> Self {
        let snapshot = match storage.load() {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    item_count = snapshot.item_count,
                    "Restored persisted cart"
                );
                snapshot
            }
            Ok(None) => CartSnapshot::empty(),
            Err(e) => {
                tracing::warn!("Failed to load persisted cart, starting empty: {e}");
                CartSnapshot::empty()
            }
        };

        Self {
            items: snapshot.items,
            item_count: snapshot.item_count,
            subtotal: snapshot.subtotal,
            storage,
        }
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same id already exists its quantity increments by
    /// one and every other stored field is left unchanged; the candidate's
    /// price does NOT refresh the existing line. Otherwise a new line is
    /// appended with quantity 1. Always succeeds.
    pub fn add_item(&mut self, candidate: NewLineItem) {
        match self.items.iter_mut().find(|item| item.id == candidate.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(LineItem {
                id: candidate.id,
                name: candidate.name,
                image: candidate.image,
                unit_price: candidate.unit_price,
                original_unit_price: candidate.original_unit_price,
                quantity: 1,
            }),
        }
        self.commit();
    }

    /// Remove the line with the given id. Silently a no-op if absent.
    pub fn remove_item(&mut self, id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() != before {
            self.commit();
        }
    }

    /// Set the quantity of the line with the given id.
    ///
    /// A quantity of zero or less deletes the line entirely; zero and
    /// negative quantities are not representable states. Silently a no-op if
    /// the id is absent.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
            self.commit();
        }
    }

    /// Empty the cart and reset the aggregates to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Items in insertion (display) order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Derived: sum of all quantities.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Derived: sum of `unit_price * quantity` over all items.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The full current state as an owned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            item_count: self.item_count,
            subtotal: self.subtotal,
        }
    }

    /// Recompute aggregates from the full item collection and persist the
    /// snapshot. The write is fire-and-forget: failure is logged and the
    /// in-memory mutation stands.
    fn commit(&mut self) {
        let (item_count, subtotal) = aggregates(&self.items);
        self.item_count = item_count;
        self.subtotal = subtotal;

        if let Err(e) = self.storage.save(&self.snapshot()) {
            tracing::warn!("Failed to persist cart state: {e}");
        }
    }
}
