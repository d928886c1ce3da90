//! Checkout module.
//!
//! Contains the checkout form, the submission seam, the flow state machine
//! and the order receipt.

mod flow;
mod form;
mod receipt;
mod submit;

pub use flow::{CheckoutFlow, CheckoutState, DEFAULT_SUBMIT_TIMEOUT};
pub use form::CheckoutForm;
pub use receipt::{OrderReceipt, DELIVERY_ESTIMATE};
pub use submit::{
    OrderAck, OrderRequest, OrderSubmitter, SimulatedSubmitter, DEFAULT_SUBMIT_DELAY,
};
