//! The frozen result of a completed checkout.

use crate::cart::OrderTotals;
use crate::ids::TrackingNumber;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery estimate shown on every confirmation.
pub const DELIVERY_ESTIMATE: &str = "3-5 Business Days";

/// Receipt for a placed order. Values are copied at submission time and
/// never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub tracking_number: TrackingNumber,
    /// subtotal + shipping + tax at submission.
    pub total: Money,
    pub contact_email: String,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// Sum of quantities in the submitted cart.
    pub item_count: u64,
    pub first_name: String,
    /// One-line delivery address.
    pub delivery_address: String,
    pub delivery_estimate: String,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub(crate) fn new(
        tracking_number: TrackingNumber,
        totals: &OrderTotals,
        item_count: u64,
        contact_email: impl Into<String>,
        first_name: impl Into<String>,
        delivery_address: impl Into<String>,
    ) -> Self {
        Self {
            tracking_number,
            total: totals.total,
            contact_email: contact_email.into(),
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            item_count,
            first_name: first_name.into(),
            delivery_address: delivery_address.into(),
            delivery_estimate: DELIVERY_ESTIMATE.to_string(),
            placed_at: Utc::now(),
        }
    }

    /// Whether shipping was waived on this order.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    #[cfg(test)]
    pub(crate) fn for_tests(tracking_number: TrackingNumber, total: Money) -> Self {
        let zero = Money::zero(total.currency);
        let totals = OrderTotals {
            subtotal: total,
            shipping: zero,
            tax: zero,
            total,
        };
        Self::new(tracking_number, &totals, 1, "test@example.com", "Test", "Dhaka")
    }
}
