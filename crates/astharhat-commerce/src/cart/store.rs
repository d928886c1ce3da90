//! The cart store: cart lines, panel visibility and the last order.

use crate::cart::{OrderTotals, PricingPolicy};
use crate::catalog::CatalogItem;
use crate::checkout::OrderReceipt;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// A catalog item plus the quantity the visitor wants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// The item being purchased (snapshot at add time).
    pub item: CatalogItem,
    /// Quantity, always at least one.
    pub quantity: u32,
}

impl CartLine {
    fn new(item: CatalogItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// Product id of this line.
    pub fn id(&self) -> &ProductId {
        &self.item.id
    }

    /// price x quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.item
            .price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// The visitor's cart.
///
/// Owned by one session and handed by reference to whatever needs to read
/// or change it, including the checkout flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartStore {
    lines: Vec<CartLine>,
    visible: bool,
    last_order: Option<OrderReceipt>,
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            visible: false,
            last_order: None,
            currency,
        }
    }

    /// Add one unit of `item`.
    ///
    /// A repeated add of the same id increments the existing line. Adding
    /// starts a new cart session, so any receipt still on display is
    /// dismissed. Returns the line's new quantity.
    pub fn add_item(&mut self, item: &CatalogItem) -> Result<u32, CommerceError> {
        if item.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.price.currency.code().to_string(),
            });
        }

        let quantity = match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(existing) => {
                let new_quantity = existing.quantity.saturating_add(1);
                if new_quantity > MAX_QUANTITY_PER_LINE {
                    return Err(CommerceError::QuantityExceedsLimit(
                        new_quantity,
                        MAX_QUANTITY_PER_LINE,
                    ));
                }
                existing.quantity = new_quantity;
                new_quantity
            }
            None => {
                self.lines.push(CartLine::new(item.clone()));
                1
            }
        };

        self.last_order = None;
        debug!(product_id = %item.id, quantity, "cart add");
        Ok(quantity)
    }

    /// Remove the whole line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.item.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            debug!(product_id = %id, "cart remove");
        }
        removed
    }

    /// Remove every line. The last order is left alone.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Show or hide the cart panel.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the cart panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the stored receipt; `None` dismisses the confirmation.
    pub fn set_last_order(&mut self, receipt: Option<OrderReceipt>) {
        self.last_order = receipt;
    }

    /// The most recent order, if not yet dismissed.
    pub fn last_order(&self) -> Option<&OrderReceipt> {
        self.last_order.as_ref()
    }

    /// Clear the lines and store the receipt in one step, then open the panel.
    pub(crate) fn complete_order(&mut self, receipt: OrderReceipt) {
        self.lines.clear();
        self.last_order = Some(receipt);
        self.visible = true;
    }

    /// Current lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `id`, if present.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item.id == id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of price x quantity over all lines.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let totals = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), self.currency).ok_or(CommerceError::Overflow)
    }

    /// Subtotal, shipping, tax and total under `policy`.
    pub fn pricing(&self, policy: &PricingPolicy) -> Result<OrderTotals, CommerceError> {
        policy.totals(self.subtotal()?)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::BDT)
    }
}
