//! Fire-and-forget user-facing notifications.
//!
//! The core emits transient notifications ("added to cart", "order placed")
//! and does not track delivery or dismissal; the presentation layer decides
//! how to surface them.

use std::sync::Mutex;

use verde_core::OrderId;

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A product was added to the cart.
    AddedToCart { name: String, quantity: u32 },
    /// An order completed successfully.
    OrderPlaced { order_id: OrderId },
}

/// Notification collaborator.
pub trait Notifier: Send + Sync {
    /// Emit a notification. Fire-and-forget: there is no delivery feedback.
    fn notify(&self, notification: Notification);
}

/// Notifier that logs each notification at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::AddedToCart { name, quantity } => {
                tracing::info!(%name, quantity, "Added to cart");
            }
            Notification::OrderPlaced { order_id } => {
                tracing::info!(%order_id, "Order placed");
            }
        }
    }
}

/// Notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Notifier that records everything, for asserting on emitted notifications
/// in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut events) = self.events.lock() {
            events.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_captures_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::AddedToCart {
            name: "Bamboo Utensil Set".to_owned(),
            quantity: 2,
        });
        notifier.notify(Notification::OrderPlaced {
            order_id: OrderId::new("VRD000001"),
        });

        let events = notifier.take();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Notification::AddedToCart { .. }));
        assert!(notifier.take().is_empty());
    }
}
