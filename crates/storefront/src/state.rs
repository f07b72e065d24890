//! Application state wiring the storefront collaborators together.
//!
//! The cart store is an explicitly owned, single-writer container injected
//! into the presentation layer through [`AppState`]; it is never ambient
//! global state. All mutation goes through the store's defined operations.

use std::sync::{Arc, Mutex, MutexGuard};

use verde_core::{OrderId, ProductId};

use crate::cart::storage::{CartStorage, JsonFileStorage};
use crate::cart::{CartSnapshot, CartStore, NewLineItem};
use crate::catalog::{Catalog, StaticCatalog};
use crate::checkout::gateway::{OrderGateway, SimulatedGateway};
use crate::checkout::totals::{self, OrderTotals};
use crate::checkout::{CheckoutError, CheckoutFlow, Redirect};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::notify::{Notification, Notifier, TracingNotifier};

/// Application state shared across the presentation layer.
///
/// Cheaply cloneable via `Arc`. The cart store sits behind a mutex because
/// the store itself is a synchronous single-writer container; the mutex is
/// the external serialization the store's contract requires. No lock is ever
/// held across an await point.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: StaticCatalog,
    cart: Mutex<CartStore>,
    notifier: Box<dyn Notifier>,
    gateway: SimulatedGateway,
}

impl AppState {
    /// Create the application state from configuration: loads the catalog
    /// (bundled, or the configured override file) and opens the cart store
    /// against file storage under the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => StaticCatalog::load(path)?,
            None => StaticCatalog::bundled()?,
        };
        let storage = JsonFileStorage::new(config.cart_store_path());
        Ok(Self::with_parts(
            config,
            catalog,
            Box::new(storage),
            Box::new(TracingNotifier),
        ))
    }

    /// Assemble state from explicit parts (used by tests to swap storage and
    /// notifier implementations).
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: StaticCatalog,
        storage: Box<dyn CartStorage>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let gateway = SimulatedGateway::new(config.order_latency);
        let cart = Mutex::new(CartStore::open(storage));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                notifier,
                gateway,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner.catalog
    }

    /// Current cart state.
    #[must_use]
    pub fn cart(&self) -> CartSnapshot {
        self.lock_cart().snapshot()
    }

    /// Order summary for the current cart, using the shared totals policy
    /// (the same one the checkout summary uses).
    #[must_use]
    pub fn cart_totals(&self) -> OrderTotals {
        totals::order_totals(self.lock_cart().subtotal())
    }

    /// Add a catalog product to the cart `quantity` times and emit an
    /// `AddedToCart` notification.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown product id.
    pub fn add_to_cart(&self, id: &ProductId, quantity: u32) -> Result<CartSnapshot> {
        let product = self
            .inner
            .catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        let candidate = NewLineItem::from(product);

        let snapshot = {
            let mut cart = self.lock_cart();
            for _ in 0..quantity {
                cart.add_item(candidate.clone());
            }
            cart.snapshot()
        };

        self.inner.notifier.notify(Notification::AddedToCart {
            name: product.name.clone(),
            quantity,
        });
        Ok(snapshot)
    }

    /// Remove a line from the cart. Silently a no-op for unknown ids.
    #[must_use]
    pub fn remove_from_cart(&self, id: &ProductId) -> CartSnapshot {
        let mut cart = self.lock_cart();
        cart.remove_item(id);
        cart.snapshot()
    }

    /// Set a line's quantity; zero or less removes the line. Silently a
    /// no-op for unknown ids.
    #[must_use]
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> CartSnapshot {
        let mut cart = self.lock_cart();
        cart.update_quantity(id, quantity);
        cart.snapshot()
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.lock_cart().clear();
    }

    /// Enter the checkout flow.
    ///
    /// # Errors
    ///
    /// The empty-cart guard redirects back to the cart view.
    pub fn begin_checkout(&self) -> std::result::Result<CheckoutFlow, Redirect> {
        CheckoutFlow::begin(&self.lock_cart())
    }

    /// Checkout order summary for the current cart.
    #[must_use]
    pub fn checkout_totals(&self, flow: &CheckoutFlow) -> OrderTotals {
        flow.totals(&self.lock_cart())
    }

    /// Re-run the checkout guard against the current cart.
    #[must_use]
    pub fn checkout_guard(&self, flow: &CheckoutFlow) -> Option<Redirect> {
        flow.guard(&self.lock_cart())
    }

    /// Place the order for the given checkout flow through the simulated
    /// gateway. The cart lock is released while the gateway is in flight;
    /// the flow's processing latch blocks re-submission in the meantime.
    ///
    /// # Errors
    ///
    /// See [`CheckoutFlow::submit`] and [`CheckoutFlow::resolve`].
    pub async fn place_order(
        &self,
        flow: &mut CheckoutFlow,
    ) -> std::result::Result<OrderId, CheckoutError> {
        let snapshot = {
            let cart = self.lock_cart();
            flow.submit(&cart)?;
            cart.snapshot()
        };

        let outcome = self.inner.gateway.place_order(&snapshot).await;

        let mut cart = self.lock_cart();
        flow.resolve(outcome, &mut cart, self.inner.notifier.as_ref())
    }

    /// Lock the cart store, recovering from a poisoned lock: the store's
    /// state is always internally consistent, so the last snapshot wins.
    fn lock_cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
