//! Checkout flow: a linear `Shipping -> Payment -> Confirmation` state
//! machine.
//!
//! A fresh [`CheckoutFlow`] is created each time checkout is entered and
//! discarded when the shopper navigates away or the flow completes. The flow
//! reads the cart's items and subtotal, and clears the cart exactly once, on
//! a successful `Payment -> Confirmation` transition.
//!
//! Shipping and payment details are collected but never validated here;
//! field validation is a presentation concern.

pub mod gateway;
pub mod totals;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use verde_core::OrderId;

use crate::cart::CartStore;
use crate::notify::{Notification, Notifier};
use gateway::{OrderError, OrderGateway};
use totals::OrderTotals;

/// Position in the checkout state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Confirmation,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        };
        write!(f, "{label}")
    }
}

/// Abstract navigation request emitted by the core; routing is owned by the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Leave the flow for the cart view (empty-cart guard).
    Cart,
    /// Leave the flow for the product listing (post-confirmation).
    Products,
}

/// Shipping address fields, stored opaque and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
}

/// Payment form fields, stored opaque and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

/// Error from a checkout action.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The action is not available at the current step.
    #[error("action not available at the {0} step")]
    InvalidStep(CheckoutStep),
    /// An order placement is already in flight; re-submission is blocked.
    #[error("order placement already in progress")]
    AlreadyProcessing,
    /// Order placement requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,
    /// The order gateway failed; the cart is untouched and the flow stays at
    /// the payment step.
    #[error(transparent)]
    Placement(#[from] OrderError),
}

/// One checkout session, created fresh on entry.
#[derive(Debug)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    shipping: Option<ShippingDetails>,
    payment: Option<PaymentDetails>,
    order_id: Option<OrderId>,
    processing: bool,
}

impl CheckoutFlow {
    /// Enter the checkout flow.
    ///
    /// # Errors
    ///
    /// An empty cart cannot enter checkout: the guard redirects back to the
    /// cart view instead of starting a flow.
    pub fn begin(cart: &CartStore) -> Result<Self, Redirect> {
        if cart.is_empty() {
            tracing::debug!("Empty cart at checkout entry, redirecting to cart");
            return Err(Redirect::Cart);
        }

        Ok(Self {
            step: CheckoutStep::Shipping,
            shipping: None,
            payment: None,
            order_id: None,
            processing: false,
        })
    }

    /// Current state machine position.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether an order placement is currently in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Order id assigned on completion; `Some` only at `Confirmation`.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Order summary figures for the current cart, using the shared totals
    /// policy.
    #[must_use]
    pub fn totals(&self, cart: &CartStore) -> OrderTotals {
        totals::order_totals(cart.subtotal())
    }

    /// Re-entry guard: an empty cart while not at `Confirmation` redirects
    /// out of the flow. `Confirmation` stays reachable as a terminal display
    /// state even though completion cleared the cart.
    #[must_use]
    pub fn guard(&self, cart: &CartStore) -> Option<Redirect> {
        if cart.is_empty() && self.step != CheckoutStep::Confirmation {
            Some(Redirect::Cart)
        } else {
            None
        }
    }

    /// `Shipping -> Payment`. Unconditional on the collected fields; they
    /// are stored as-is.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidStep`] outside the shipping step.
    pub fn continue_to_payment(
        &mut self,
        details: ShippingDetails,
    ) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Shipping {
            return Err(CheckoutError::InvalidStep(self.step));
        }
        self.shipping = Some(details);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// `Payment -> Shipping` back action. No side effects beyond the step
    /// change; the cart is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidStep`] outside the payment step.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidStep(self.step));
        }
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Record the collected payment fields (opaque, unvalidated).
    pub fn set_payment_details(&mut self, details: PaymentDetails) {
        self.payment = Some(details);
    }

    /// Begin order placement: validates the step, the re-submission latch,
    /// and the non-empty cart, then latches the processing sub-state.
    ///
    /// Callers that need to release a long-held cart lock across the gateway
    /// await use this with [`Self::resolve`]; everyone else goes through
    /// [`Self::place_order`].
    ///
    /// # Errors
    ///
    /// [`CheckoutError::InvalidStep`] outside `Payment`,
    /// [`CheckoutError::AlreadyProcessing`] while a placement is in flight,
    /// [`CheckoutError::EmptyCart`] if the guard should have fired.
    pub fn submit(&mut self, cart: &CartStore) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidStep(self.step));
        }
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.processing = true;
        Ok(())
    }

    /// Finish order placement after the gateway resolved.
    ///
    /// On success: clears the cart, assigns the order id, advances to
    /// `Confirmation`, and emits an `OrderPlaced` notification. On gateway
    /// failure: releases the latch and leaves the cart and step untouched.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure as [`CheckoutError::Placement`].
    pub fn resolve<N: Notifier + ?Sized>(
        &mut self,
        outcome: Result<OrderId, OrderError>,
        cart: &mut CartStore,
        notifier: &N,
    ) -> Result<OrderId, CheckoutError> {
        self.processing = false;

        match outcome {
            Ok(order_id) => {
                cart.clear();
                self.order_id = Some(order_id.clone());
                self.step = CheckoutStep::Confirmation;
                tracing::info!(%order_id, "Checkout complete");
                notifier.notify(Notification::OrderPlaced {
                    order_id: order_id.clone(),
                });
                Ok(order_id)
            }
            Err(e) => {
                tracing::warn!("Order placement failed: {e}");
                Err(CheckoutError::Placement(e))
            }
        }
    }

    /// `Payment -> Confirmation` place-order action: submits, awaits the
    /// gateway, and resolves.
    ///
    /// # Errors
    ///
    /// See [`Self::submit`] and [`Self::resolve`].
    pub async fn place_order<G: OrderGateway, N: Notifier>(
        &mut self,
        cart: &mut CartStore,
        gateway: &G,
        notifier: &N,
    ) -> Result<OrderId, CheckoutError> {
        self.submit(cart)?;
        let outcome = gateway.place_order(&cart.snapshot()).await;
        self.resolve(outcome, cart, notifier)
    }

    /// Post-confirmation "continue shopping" action: a navigation request
    /// back to the product listing. `None` before the flow completes.
    #[must_use]
    pub fn continue_shopping(&self) -> Option<Redirect> {
        (self.step == CheckoutStep::Confirmation).then_some(Redirect::Products)
    }
}
