//! Search module.
//!
//! Text search and category browsing over the catalog.

mod filter;
mod query;
mod results;

pub use filter::{Filter, IMAGE_SEARCH_PREFIX};
pub use query::{SearchQuery, SortOption};
pub use results::{SearchResults, NO_MATCHES_SUBTITLE, NO_MATCHES_TITLE};

use crate::catalog::Catalog;
use crate::error::CommerceError;
use tracing::debug;

/// Run a query against the catalog.
///
/// A blank text query is rejected. When nothing matches, the catalog's
/// recommended items are returned instead, sorted the same way.
pub fn run(catalog: &Catalog, query: &SearchQuery) -> Result<SearchResults, CommerceError> {
    if query.is_blank() {
        return Err(CommerceError::EmptyQuery);
    }

    let mut items: Vec<_> = catalog
        .items()
        .iter()
        .filter(|item| query.filter.matches(item))
        .cloned()
        .collect();

    debug!(filter = ?query.filter, sort = %query.sort, hits = items.len(), "search");

    if items.is_empty() {
        let mut fallback = catalog.recommended();
        query.sort.apply(&mut fallback);
        return Ok(SearchResults::fallback(fallback));
    }

    query.sort.apply(&mut items);
    Ok(SearchResults::found(query.filter.title(), items))
}

/// Case-insensitive text search on name or category.
pub fn search(catalog: &Catalog, text: &str, sort: SortOption) -> Result<SearchResults, CommerceError> {
    run(catalog, &SearchQuery::text(text).with_sort(sort))
}

/// Items in exactly the named category.
pub fn browse_category(
    catalog: &Catalog,
    name: &str,
    sort: SortOption,
) -> Result<SearchResults, CommerceError> {
    run(catalog, &SearchQuery::category(name).with_sort(sort))
}
