//! Type-safe key-value persistence for the AstharHat storefront.
//!
//! Stands in for browser local-storage: a small JSON store with an
//! in-memory backend for tests and sessions, and a file backend for data
//! that should survive restarts (the wishlist).
//!
//! # Example
//!
//! ```rust,ignore
//! use astharhat_store::Store;
//!
//! let store = Store::open_dir("/home/me/.local/share/astharhat")?;
//! store.set("astharhat_wishlist", &vec!["p1", "p4"])?;
//! let ids: Option<Vec<String>> = store.get("astharhat_wishlist")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Backend, Store, StoreError};
}
