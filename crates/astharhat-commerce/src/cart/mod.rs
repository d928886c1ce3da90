//! Shopping cart module.
//!
//! Contains the cart store, its lines, and the pricing policy that turns a
//! subtotal into an order total.

mod pricing;
mod store;

pub use pricing::{
    OrderTotals, PricingPolicy, FREE_SHIPPING_THRESHOLD_TAKA, SHIPPING_FEE_TAKA, TAX_PERCENT,
};
pub use store::{CartLine, CartStore, MAX_QUANTITY_PER_LINE};
