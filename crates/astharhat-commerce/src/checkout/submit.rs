//! Order submission seam.

use crate::cart::{CartLine, OrderTotals};
use crate::checkout::CheckoutForm;
use crate::error::CommerceError;
use crate::ids::TrackingNumber;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default delay of the simulated submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Everything a fulfilment backend needs to place an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub form: CheckoutForm,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderAck {
    pub tracking_number: TrackingNumber,
}

/// Places orders with whatever sits behind the storefront.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order. An `Err` means the order was not placed.
    async fn submit(&self, order: &OrderRequest) -> Result<OrderAck, CommerceError>;
}

/// Submitter that waits a fixed delay and accepts every order.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    /// Create a submitter with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedSubmitter {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderAck, CommerceError> {
        debug!(
            lines = order.lines.len(),
            total = %order.totals.total,
            delay_ms = self.delay.as_millis() as u64,
            "simulating order submission"
        );
        tokio::time::sleep(self.delay).await;
        Ok(OrderAck {
            tracking_number: TrackingNumber::generate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn request() -> OrderRequest {
        let zero = Money::zero(Currency::BDT);
        OrderRequest {
            lines: Vec::new(),
            totals: OrderTotals {
                subtotal: zero,
                shipping: zero,
                tax: zero,
                total: zero,
            },
            form: CheckoutForm::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_waits_then_accepts() {
        let submitter = SimulatedSubmitter::default();
        let start = tokio::time::Instant::now();

        let ack = submitter.submit(&request()).await.unwrap();

        assert!(start.elapsed() >= DEFAULT_SUBMIT_DELAY);
        assert!(ack.tracking_number.as_str().starts_with("TRK-"));
    }
}
