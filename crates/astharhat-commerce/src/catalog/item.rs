//! Catalog item records.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A sellable product record. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current selling price.
    pub price: Money,
    /// Price before markdown, if the item is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Category name.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Short description.
    pub description: String,
    /// Minimum order quantity, display only (e.g. "5 pieces").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moq: Option<String>,
}

impl CatalogItem {
    /// Create a new item with no markdown and no MOQ.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            moq: None,
        }
    }

    /// Set the pre-markdown price.
    pub fn with_original_price(mut self, price: Money) -> Self {
        self.original_price = Some(price);
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the minimum order quantity label.
    pub fn with_moq(mut self, moq: impl Into<String>) -> Self {
        self.moq = Some(moq.into());
        self
    }

    /// Whether the item is sold below its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|original| original.currency == self.price.currency && original > self.price)
            .unwrap_or(false)
    }

    /// Markdown as a whole percentage of the original price, rounded.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if !self.is_on_sale() || original.amount_minor <= 0 {
            return None;
        }
        let saved = original.amount_minor - self.price.amount_minor;
        Some(((saved as f64 / original.amount_minor as f64) * 100.0).round() as u32)
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn taka(units: i64) -> Money {
        Money::from_major(units, Currency::BDT)
    }

    #[test]
    fn test_discount_percent() {
        let item = CatalogItem::new("p1", "Watch", taka(5500), "Consumer Electronics")
            .with_original_price(taka(7500));
        assert!(item.is_on_sale());
        assert_eq!(item.discount_percent(), Some(27));
    }

    #[test]
    fn test_no_discount_without_original_price() {
        let item = CatalogItem::new("p6", "Welder", taka(540_000), "Machinery");
        assert!(!item.is_on_sale());
        assert_eq!(item.discount_percent(), None);
    }

    #[test]
    fn test_matches_text() {
        let item = CatalogItem::new("p4", "Cotton Hoodie Premium", taka(1500), "Apparel & Accessories");
        assert!(item.matches_text("hoodie"));
        assert!(item.matches_text("apparel"));
        assert!(!item.matches_text("watch"));
    }

    #[test]
    fn test_serializes_with_camel_case() {
        let item = CatalogItem::new("p1", "Watch", taka(5500), "Consumer Electronics")
            .with_original_price(taka(7500));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("originalPrice").is_some());
        assert!(json.get("moq").is_none());
    }
}
