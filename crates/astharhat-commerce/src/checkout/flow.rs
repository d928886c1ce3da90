//! Checkout flow state machine.

use crate::cart::{CartStore, OrderTotals, PricingPolicy};
use crate::checkout::{CheckoutForm, OrderReceipt, OrderRequest, OrderSubmitter};
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default upper bound on a single submission.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// States of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Collecting contact and delivery details.
    #[default]
    FormEntry,
    /// Order handed to the submitter; submit is disabled.
    Submitting,
    /// Order placed. Terminal for this session.
    Confirmed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::FormEntry => "form_entry",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Confirmed => "confirmed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutState::FormEntry => "Shipping Information",
            CheckoutState::Submitting => "Processing...",
            CheckoutState::Confirmed => "Order Placed",
        }
    }
}

/// One checkout session: form contents plus submission state.
///
/// The flow does not own the cart. It borrows the caller's [`CartStore`]
/// for the duration of [`CheckoutFlow::submit`] and, on success, clears it
/// and stores the receipt in the same step.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: CheckoutState,
    form: CheckoutForm,
    policy: PricingPolicy,
    submit_timeout: Duration,
    last_error: Option<String>,
}

impl CheckoutFlow {
    /// Create a flow in `FormEntry` with an empty form.
    pub fn new(policy: PricingPolicy) -> Self {
        Self {
            state: CheckoutState::FormEntry,
            form: CheckoutForm::default(),
            policy,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            last_error: None,
        }
    }

    /// Set the submission timeout.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Edit the form. Only allowed while in `FormEntry`.
    pub fn form_mut(&mut self) -> Result<&mut CheckoutForm, CommerceError> {
        self.ensure_state(CheckoutState::FormEntry, "form_entry")?;
        Ok(&mut self.form)
    }

    /// Replace the whole form. Only allowed while in `FormEntry`.
    pub fn set_form(&mut self, form: CheckoutForm) -> Result<(), CommerceError> {
        *self.form_mut()? = form;
        Ok(())
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Error from the last failed submission, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        self.state == CheckoutState::FormEntry
    }

    /// Order summary for the current cart.
    pub fn quote(&self, cart: &CartStore) -> Result<OrderTotals, CommerceError> {
        cart.pricing(&self.policy)
    }

    /// Submit the order.
    ///
    /// On success the receipt is written to `cart`, the cart lines are
    /// cleared, the cart panel is opened and the flow ends in `Confirmed`.
    /// On failure the flow returns to `FormEntry`, the error is kept in
    /// [`Self::last_error`] and the cart is left as it was. Dropping the
    /// returned future mid-submission also returns the flow to `FormEntry`.
    pub async fn submit(
        &mut self,
        cart: &mut CartStore,
        submitter: &dyn OrderSubmitter,
    ) -> Result<OrderReceipt, CommerceError> {
        self.ensure_state(CheckoutState::FormEntry, "submitting")?;

        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }

        let totals = self.quote(cart)?;
        let request = OrderRequest {
            lines: cart.lines().to_vec(),
            totals,
            form: self.form.clone(),
        };

        self.state = CheckoutState::Submitting;
        info!(
            lines = request.lines.len(),
            total = %totals.total,
            "checkout submitting"
        );

        let timeout = self.submit_timeout;
        let outcome = {
            let reset = ResetOnDrop {
                state: &mut self.state,
            };
            let outcome = match tokio::time::timeout(timeout, submitter.submit(&request)).await {
                Ok(result) => result,
                Err(_) => Err(CommerceError::SubmissionTimeout(timeout)),
            };
            std::mem::forget(reset);
            outcome
        };

        match outcome {
            Ok(ack) => {
                let receipt = OrderReceipt::new(
                    ack.tracking_number,
                    &totals,
                    cart.total_quantity(),
                    self.form.email.trim(),
                    self.form.first_name.trim(),
                    self.form.one_line_address(),
                );
                cart.complete_order(receipt.clone());
                self.state = CheckoutState::Confirmed;
                self.last_error = None;
                info!(
                    tracking_number = %receipt.tracking_number,
                    total = %receipt.total,
                    "checkout confirmed"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "checkout submission failed");
                self.state = CheckoutState::FormEntry;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Start a fresh session after a confirmed order.
    pub fn restart(&mut self) {
        self.state = CheckoutState::FormEntry;
        self.form = CheckoutForm::default();
        self.last_error = None;
    }

    fn ensure_state(&self, expected: CheckoutState, to: &str) -> Result<(), CommerceError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: to.to_string(),
            })
        }
    }
}

/// Puts an abandoned submission back into `FormEntry`.
struct ResetOnDrop<'a> {
    state: &'a mut CheckoutState,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        warn!("checkout submission abandoned");
        *self.state = CheckoutState::FormEntry;
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(PricingPolicy::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::checkout::{OrderAck, SimulatedSubmitter};
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use async_trait::async_trait;

    struct RejectingSubmitter;

    #[async_trait]
    impl OrderSubmitter for RejectingSubmitter {
        async fn submit(&self, _order: &OrderRequest) -> Result<OrderAck, CommerceError> {
            Err(CommerceError::SubmissionFailed("warehouse offline".to_string()))
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Rahim".into(),
            last_name: "Uddin".into(),
            email: "rahim@example.com".into(),
            phone: "01700000000".into(),
            address: "House 12".into(),
            local_place: "Kawran Bazar".into(),
            zila: "Dhaka".into(),
            city: "Tejgaon".into(),
            zip: "1215".into(),
            country: "Bangladesh".into(),
        }
    }

    fn cart_with(ids: &[&str]) -> CartStore {
        let catalog = Catalog::builtin();
        let mut cart = CartStore::default();
        for id in ids {
            cart.add_item(catalog.get(&ProductId::new(*id)).unwrap()).unwrap();
        }
        cart
    }

    fn ready_flow() -> CheckoutFlow {
        let mut flow = CheckoutFlow::default();
        flow.set_form(form()).unwrap();
        flow
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_checkout() {
        let mut cart = cart_with(&["p1"]);
        let mut flow = ready_flow();

        let receipt = flow
            .submit(&mut cart, &SimulatedSubmitter::default())
            .await
            .unwrap();

        assert_eq!(flow.state(), CheckoutState::Confirmed);
        assert!(!flow.can_submit());
        assert_eq!(receipt.total, Money::from_major(5_925, Currency::BDT));
        assert_eq!(receipt.contact_email, "rahim@example.com");
        assert_eq!(receipt.item_count, 1);
        assert!(receipt.tracking_number.as_str().starts_with("TRK-"));

        assert!(cart.is_empty());
        assert!(cart.is_visible());
        assert_eq!(cart.last_order(), Some(&receipt));
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_total_frozen_at_submission() {
        let mut cart = cart_with(&["p4", "p4", "p5"]);
        let expected = cart.pricing(&PricingPolicy::standard()).unwrap();
        let mut flow = ready_flow();

        let receipt = flow
            .submit(&mut cart, &SimulatedSubmitter::default())
            .await
            .unwrap();

        assert_eq!(receipt.total, expected.total);
        assert_eq!(receipt.subtotal, expected.subtotal);
        assert_eq!(receipt.item_count, 3);
        assert_eq!(cart.subtotal().unwrap(), Money::zero(Currency::BDT));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let mut cart = CartStore::default();
        let mut flow = ready_flow();

        let result = flow.submit(&mut cart, &SimulatedSubmitter::default()).await;

        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert_eq!(flow.state(), CheckoutState::FormEntry);
        assert!(cart.last_order().is_none());
    }

    #[tokio::test]
    async fn test_incomplete_form_rejected() {
        let mut cart = cart_with(&["p1"]);
        let mut flow = ready_flow();
        flow.form_mut().unwrap().phone.clear();

        let result = flow.submit(&mut cart, &SimulatedSubmitter::default()).await;

        assert!(matches!(result, Err(CommerceError::CheckoutIncomplete(f)) if f == "phone"));
        assert_eq!(cart.line_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_returns_to_form() {
        let mut cart = cart_with(&["p1", "p3"]);
        let before = cart.clone();
        let mut flow = ready_flow();

        let result = flow.submit(&mut cart, &RejectingSubmitter).await;

        assert!(matches!(result, Err(CommerceError::SubmissionFailed(_))));
        assert_eq!(flow.state(), CheckoutState::FormEntry);
        assert!(flow.last_error().unwrap().contains("warehouse offline"));
        assert_eq!(cart, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_timeout() {
        let mut cart = cart_with(&["p1"]);
        let mut flow = ready_flow().with_submit_timeout(Duration::from_secs(1));
        let slow = SimulatedSubmitter::new(Duration::from_secs(5));

        let result = flow.submit(&mut cart, &slow).await;

        assert!(matches!(result, Err(CommerceError::SubmissionTimeout(_))));
        assert_eq!(flow.state(), CheckoutState::FormEntry);
        assert_eq!(cart.line_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_returns_to_form() {
        let mut cart = cart_with(&["p2"]);
        let mut flow = ready_flow();
        let slow = SimulatedSubmitter::new(Duration::from_secs(5));

        let cancelled =
            tokio::time::timeout(Duration::from_secs(1), flow.submit(&mut cart, &slow)).await;
        assert!(cancelled.is_err());
        assert_eq!(flow.state(), CheckoutState::FormEntry);
        assert!(flow.can_submit());
        assert_eq!(cart.line_count(), 1);

        let receipt = flow
            .submit(&mut cart, &SimulatedSubmitter::default())
            .await
            .unwrap();
        assert_eq!(flow.state(), CheckoutState::Confirmed);
        assert_eq!(cart.last_order(), Some(&receipt));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure_succeeds() {
        let mut cart = cart_with(&["p1"]);
        let mut flow = ready_flow();

        assert!(flow.submit(&mut cart, &RejectingSubmitter).await.is_err());
        let receipt = flow
            .submit(&mut cart, &SimulatedSubmitter::default())
            .await
            .unwrap();

        assert!(flow.last_error().is_none());
        assert_eq!(cart.last_order(), Some(&receipt));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_after_confirmed_is_invalid() {
        let mut cart = cart_with(&["p1"]);
        let mut flow = ready_flow();
        flow.submit(&mut cart, &SimulatedSubmitter::default())
            .await
            .unwrap();

        let result = flow.submit(&mut cart, &SimulatedSubmitter::default()).await;
        assert!(matches!(
            result,
            Err(CommerceError::InvalidCheckoutTransition { ref from, .. }) if from == "confirmed"
        ));
        assert!(flow.form_mut().is_err());

        flow.restart();
        assert_eq!(flow.state(), CheckoutState::FormEntry);
        assert!(!flow.form().is_complete());
    }
}
