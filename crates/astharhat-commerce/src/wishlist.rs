//! Persisted wishlist of product ids.

use crate::error::CommerceError;
use crate::ids::ProductId;
use astharhat_store::{Store, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Store key holding the wishlist as a JSON array of ids.
pub const WISHLIST_KEY: &str = "astharhat_wishlist";

/// Outcome of a [`Wishlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistChange {
    Added,
    Removed,
}

impl WishlistChange {
    /// Notification text for the change.
    pub fn message(&self) -> &'static str {
        match self {
            WishlistChange::Added => "Added to wishlist",
            WishlistChange::Removed => "Removed from wishlist",
        }
    }
}

/// Ordered set of saved product ids, written through to a [`Store`].
#[derive(Debug, Clone)]
pub struct Wishlist {
    store: Store,
    ids: Vec<ProductId>,
}

impl Wishlist {
    /// Load the wishlist from `store`.
    ///
    /// A missing key or content that is not a JSON array of ids loads as an
    /// empty wishlist. Backend failures are returned.
    pub fn load(store: Store) -> Result<Self, CommerceError> {
        let mut ids = match store.get::<Vec<ProductId>>(WISHLIST_KEY) {
            Ok(Some(ids)) => ids,
            Ok(None) => Vec::new(),
            Err(StoreError::SerializeError(e)) => {
                warn!(error = %e, key = WISHLIST_KEY, "discarding unreadable wishlist");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        dedup_in_order(&mut ids);
        debug!(count = ids.len(), "wishlist loaded");
        Ok(Self { store, ids })
    }

    /// Add `id` if absent, remove it if present, then persist.
    ///
    /// The in-memory list only changes once the write succeeds.
    pub fn toggle(&mut self, id: &ProductId) -> Result<WishlistChange, CommerceError> {
        let mut next = self.ids.clone();
        let change = match next.iter().position(|saved| saved == id) {
            Some(index) => {
                next.remove(index);
                WishlistChange::Removed
            }
            None => {
                next.push(id.clone());
                WishlistChange::Added
            }
        };
        self.store.set(WISHLIST_KEY, &next)?;
        self.ids = next;
        debug!(product_id = %id, ?change, "wishlist toggle");
        Ok(change)
    }

    /// Whether `id` is saved.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    /// Saved ids in the order they were added.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
fn dedup_in_order(ids: &mut Vec<ProductId>) {
    let mut seen = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if seen.contains(id) {
            false
        } else {
            seen.push(id.clone());
            true
        }
    });
}
