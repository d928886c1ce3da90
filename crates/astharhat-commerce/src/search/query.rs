//! Search query builder.

use crate::catalog::CatalogItem;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    /// All options in menu order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }

    /// Sort `items` in place. Stable, so ties keep catalog order.
    pub fn apply(&self, items: &mut [CatalogItem]) {
        match self {
            SortOption::Relevance => {}
            SortOption::PriceAsc => items.sort_by(|a, b| a.price.amount_minor.cmp(&b.price.amount_minor)),
            SortOption::PriceDesc => items.sort_by(|a, b| b.price.amount_minor.cmp(&a.price.amount_minor)),
            SortOption::NameAsc => items.sort_by(compare_names),
        }
    }
}

fn compare_names(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| format!("unknown sort option '{s}'"))
    }
}

/// A search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// What to match.
    pub filter: Filter,
    /// Sort option.
    pub sort: SortOption,
}

impl SearchQuery {
    /// Free-text query.
    pub fn text(q: impl Into<String>) -> Self {
        Self::new(Filter::Text(q.into()))
    }

    /// Exact category browse.
    pub fn category(name: impl Into<String>) -> Self {
        Self::new(Filter::Category(name.into()))
    }

    /// Query built from an uploaded picture's file name.
    pub fn image(file_name: &str) -> Self {
        Self::new(Filter::image(file_name))
    }

    fn new(filter: Filter) -> Self {
        Self {
            filter,
            sort: SortOption::Relevance,
        }
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if this is a blank text query.
    pub fn is_blank(&self) -> bool {
        matches!(&self.filter, Filter::Text(q) if q.trim().is_empty())
    }
}
