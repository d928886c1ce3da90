//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Search query was blank.
    #[error("Search query is empty")]
    EmptyQuery,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Required checkout fields are blank.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// The order submission was rejected or failed.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(String),

    /// The order submission did not complete in time.
    #[error("Order submission timed out after {0:?}")]
    SubmissionTimeout(std::time::Duration),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Key-value store error.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<astharhat_store::StoreError> for CommerceError {
    fn from(e: astharhat_store::StoreError) -> Self {
        CommerceError::StoreError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
