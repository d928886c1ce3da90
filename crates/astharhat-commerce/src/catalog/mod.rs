//! Product catalog module.
//!
//! Contains the catalog item and category records plus the built-in
//! storefront assortment.

mod builtin;
mod category;
mod item;

pub use builtin::Catalog;
pub use category::Category;
pub use item::CatalogItem;
