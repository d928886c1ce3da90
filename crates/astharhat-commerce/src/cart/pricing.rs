//! Order pricing: shipping and tax policy.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Subtotal above which shipping is free, in whole taka.
pub const FREE_SHIPPING_THRESHOLD_TAKA: i64 = 60_000;
/// Flat shipping fee below the threshold, in whole taka.
pub const SHIPPING_FEE_TAKA: i64 = 150;
/// VAT charged on the subtotal.
pub const TAX_PERCENT: f64 = 5.0;

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Shipping is waived when the subtotal is strictly greater than this.
    pub free_shipping_threshold: Money,
    /// Flat fee charged otherwise.
    pub shipping_fee: Money,
    /// Tax as a percentage of the subtotal.
    pub tax_percent: f64,
}

impl PricingPolicy {
    /// Create a policy from explicit values.
    pub fn new(free_shipping_threshold: Money, shipping_fee: Money, tax_percent: f64) -> Self {
        Self {
            free_shipping_threshold,
            shipping_fee,
            tax_percent,
        }
    }

    /// The storefront's standard policy: free shipping over ৳60,000, else ৳150; 5% VAT.
    pub fn standard() -> Self {
        Self::new(
            Money::from_major(FREE_SHIPPING_THRESHOLD_TAKA, Currency::BDT),
            Money::from_major(SHIPPING_FEE_TAKA, Currency::BDT),
            TAX_PERCENT,
        )
    }

    /// Currency the policy is expressed in.
    pub fn currency(&self) -> Currency {
        self.shipping_fee.currency
    }

    /// Shipping charge for a subtotal.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_minor > self.free_shipping_threshold.amount_minor {
            Money::zero(subtotal.currency)
        } else {
            self.shipping_fee
        }
    }

    /// Tax charged on a subtotal.
    pub fn tax_for(&self, subtotal: &Money) -> Money {
        subtotal.percentage(self.tax_percent)
    }

    /// Full breakdown for a subtotal.
    pub fn totals(&self, subtotal: Money) -> Result<OrderTotals, CommerceError> {
        if subtotal.currency != self.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency().code().to_string(),
                got: subtotal.currency.code().to_string(),
            });
        }

        let shipping = self.shipping_for(&subtotal);
        let tax = self.tax_for(&subtotal);
        let total = subtotal
            .try_add(&shipping)
            .and_then(|m| m.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(OrderTotals {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pricing breakdown for an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of price x quantity.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Tax amount.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
}

impl OrderTotals {
    /// Check if shipping was waived.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taka(units: i64) -> Money {
        Money::from_major(units, Currency::BDT)
    }

    #[test]
    fn test_single_watch_total() {
        let totals = PricingPolicy::standard().totals(taka(5_500)).unwrap();
        assert_eq!(totals.subtotal, taka(5_500));
        assert_eq!(totals.shipping, taka(150));
        assert_eq!(totals.tax, taka(275));
        assert_eq!(totals.total, taka(5_925));
        assert!(!totals.has_free_shipping());
    }

    #[test]
    fn test_threshold_is_strict() {
        let policy = PricingPolicy::standard();
        assert_eq!(policy.shipping_for(&taka(60_000)), taka(150));
        assert_eq!(policy.shipping_for(&Money::new(6_000_001, Currency::BDT)), taka(0));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let totals = PricingPolicy::standard().totals(taka(540_000)).unwrap();
        assert!(totals.has_free_shipping());
        assert_eq!(totals.tax, taka(27_000));
        assert_eq!(totals.total, taka(567_000));
    }

    #[test]
    fn test_fractional_tax() {
        let totals = PricingPolicy::standard().totals(taka(450)).unwrap();
        assert_eq!(totals.tax, Money::new(2_250, Currency::BDT));
        assert_eq!(totals.total, Money::new(62_250, Currency::BDT));
    }

    #[test]
    fn test_currency_mismatch() {
        let result = PricingPolicy::standard().totals(Money::new(100, Currency::USD));
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }
}
