//! Storefront domain types and logic for AstharHat.
//!
//! - **Catalog**: the fixed product assortment and category list
//! - **Cart**: cart lines, pricing policy, the last order receipt
//! - **Checkout**: form, submission seam, `FormEntry -> Submitting -> Confirmed` flow
//! - **Search**: text search, category browse, sorting
//! - **Wishlist**: saved product ids persisted in an `astharhat_store::Store`
//!
//! # Example
//!
//! ```rust,no_run
//! use astharhat_commerce::prelude::*;
//!
//! # async fn demo() -> Result<(), CommerceError> {
//! let catalog = Catalog::builtin();
//! let mut cart = CartStore::default();
//! cart.add_item(catalog.require(&ProductId::new("p1"))?)?;
//!
//! let mut flow = CheckoutFlow::default();
//! let totals = flow.quote(&cart)?;
//! println!("Total: {}", totals.total.display());
//!
//! // fill in flow.form_mut()? ...
//! let receipt = flow.submit(&mut cart, &SimulatedSubmitter::default()).await?;
//! println!("Tracking: {}", receipt.tracking_number);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CatalogItem, Category};

    // Cart
    pub use crate::cart::{CartLine, CartStore, OrderTotals, PricingPolicy};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutForm, CheckoutState, OrderAck, OrderReceipt, OrderRequest,
        OrderSubmitter, SimulatedSubmitter,
    };

    // Search
    pub use crate::search::{Filter, SearchQuery, SearchResults, SortOption};

    // Wishlist
    pub use crate::wishlist::{Wishlist, WishlistChange};
}
