//! Search filters.

use crate::catalog::CatalogItem;
use serde::{Deserialize, Serialize};

/// Prefix of the query built from an uploaded picture.
pub const IMAGE_SEARCH_PREFIX: &str = "Image Search: ";

/// How a listing is narrowed down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Filter {
    /// Case-insensitive substring match on name or category.
    Text(String),
    /// Exact category name.
    Category(String),
}

impl Filter {
    /// Text filter for a picture upload, keyed by file name.
    pub fn image(file_name: &str) -> Self {
        Filter::Text(format!("{IMAGE_SEARCH_PREFIX}{file_name}"))
    }

    /// Whether `item` passes the filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            Filter::Text(q) => item.matches_text(&q.trim().to_lowercase()),
            Filter::Category(name) => item.category == *name,
        }
    }

    /// Title of the result listing.
    pub fn title(&self) -> String {
        match self {
            Filter::Text(q) => format!("Results for \"{}\"", q.trim()),
            Filter::Category(name) => format!("Category: {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let filter = Filter::Text("SMART watch".into());
        let hits: Vec<_> = catalog.items().iter().filter(|i| filter.matches(i)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "p1");
    }

    #[test]
    fn test_text_filter_matches_category() {
        let catalog = Catalog::builtin();
        let filter = Filter::Text("electronics".into());
        assert_eq!(catalog.items().iter().filter(|i| filter.matches(i)).count(), 2);
    }

    #[test]
    fn test_text_filter_ignores_surrounding_whitespace() {
        let catalog = Catalog::builtin();
        let filter = Filter::Text("  watch \t".into());
        let hits: Vec<_> = catalog.items().iter().filter(|i| filter.matches(i)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "p1");
        assert_eq!(filter.title(), "Results for \"watch\"");
    }

    #[test]
    fn test_titles() {
        assert_eq!(Filter::Text("watch".into()).title(), "Results for \"watch\"");
        assert_eq!(Filter::Category("Beauty".into()).title(), "Category: Beauty");
        assert_eq!(
            Filter::image("shoe.png"),
            Filter::Text("Image Search: shoe.png".into())
        );
    }
}
