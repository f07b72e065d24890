//! Order placement gateway.
//!
//! The checkout flow talks to order placement through the [`OrderGateway`]
//! trait so a real payment/ordering backend can replace the simulation
//! without touching the state machine. The trait is fallible even though the
//! bundled simulation never fails: the failure branch exists so the flow
//! handles it today rather than assuming infallibility.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use verde_core::OrderId;

use crate::cart::CartSnapshot;

/// Error placing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order was declined by the backend.
    #[error("order rejected: {0}")]
    Rejected(String),
    /// The backend could not be reached.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// Order placement collaborator.
pub trait OrderGateway: Send + Sync {
    /// Place an order for the given cart contents, returning the assigned
    /// order id.
    fn place_order(
        &self,
        cart: &CartSnapshot,
    ) -> impl Future<Output = Result<OrderId, OrderError>> + Send;
}

/// Simulated gateway: sleeps for a configured latency, then confirms.
///
/// Never fails; a real gateway implementation is expected to use the
/// [`OrderError`] branch.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    /// Gateway with the given simulated latency.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl OrderGateway for SimulatedGateway {
    async fn place_order(&self, cart: &CartSnapshot) -> Result<OrderId, OrderError> {
        tracing::debug!(
            item_count = cart.item_count,
            subtotal = %cart.subtotal,
            "Simulating order placement"
        );
        tokio::time::sleep(self.latency).await;
        Ok(generate_order_id())
    }
}

/// Generate a fresh order id: `VRD` plus six digits derived from the current
/// time with a random component so near-simultaneous orders do not collide.
fn generate_order_id() -> OrderId {
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    let jitter: u64 = rand::rng().random_range(0..1000);
    OrderId::new(format!("VRD{:06}", (millis.wrapping_add(jitter)) % 1_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_gateway_confirms() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        let order_id = gateway
            .place_order(&CartSnapshot::empty())
            .await
            .expect("simulation never fails");

        assert!(order_id.as_str().starts_with("VRD"));
        assert_eq!(order_id.as_str().len(), 9);
    }

    #[test]
    fn test_order_id_shape() {
        let id = generate_order_id();
        assert!(id.as_str().starts_with("VRD"));
        assert!(id.as_str()[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
