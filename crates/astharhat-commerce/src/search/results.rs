//! Search result listings.

use crate::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Title shown when nothing matched.
pub const NO_MATCHES_TITLE: &str = "No matches found";
/// Subtitle shown when nothing matched.
pub const NO_MATCHES_SUBTITLE: &str = "Check out these recommended items instead";

/// A titled product listing produced by a search or category browse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub title: String,
    pub subtitle: String,
    /// Items to display, already sorted.
    pub items: Vec<CatalogItem>,
    /// Whether `items` are real matches rather than the fallback listing.
    pub matched: bool,
}

impl SearchResults {
    /// Listing for a non-empty set of matches.
    pub fn found(title: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            title: title.into(),
            subtitle: format!("Found {} items", items.len()),
            items,
            matched: true,
        }
    }

    /// Listing shown in place of an empty result.
    pub fn fallback(items: Vec<CatalogItem>) -> Self {
        Self {
            title: NO_MATCHES_TITLE.to_string(),
            subtitle: NO_MATCHES_SUBTITLE.to_string(),
            items,
            matched: false,
        }
    }

    /// Number of matches; zero for a fallback listing.
    pub fn match_count(&self) -> usize {
        if self.matched {
            self.items.len()
        } else {
            0
        }
    }
}
