//! The built-in storefront assortment.

use crate::catalog::{CatalogItem, Category};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Number of items shown in the "frequently searched" strip.
const FREQUENTLY_SEARCHED_LEN: usize = 3;

/// An immutable product catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from explicit items and categories.
    pub fn new(items: Vec<CatalogItem>, categories: Vec<Category>) -> Self {
        Self { items, categories }
    }

    /// The fixed six-item storefront catalog.
    pub fn builtin() -> Self {
        let taka = |units| Money::from_major(units, Currency::BDT);

        let items = vec![
            CatalogItem::new("p1", "Smart Watch Ultra 2nd Gen", taka(5_500), "Consumer Electronics")
                .with_original_price(taka(7_500))
                .with_image("https://picsum.photos/seed/watch/300/300")
                .with_description(
                    "High-end smart watch with blood oxygen sensor and always-on display.",
                )
                .with_moq("5 pieces"),
            CatalogItem::new(
                "p2",
                "Business Sedan Luxury Edition",
                taka(3_000_000),
                "Vehicles & Accessories",
            )
            .with_original_price(taka(3_200_000))
            .with_image("https://picsum.photos/seed/car/300/300")
            .with_description("Electric sedan with autonomous driving features.")
            .with_moq("1 unit"),
            CatalogItem::new("p3", "iPhone 15 Pro Max Clone", taka(24_000), "Consumer Electronics")
                .with_original_price(taka(28_000))
                .with_image("https://picsum.photos/seed/phone/300/300")
                .with_description(
                    "High-quality smartphone with 5G connectivity and triple camera.",
                )
                .with_moq("10 pieces"),
            CatalogItem::new("p4", "Cotton Hoodie Premium", taka(1_500), "Apparel & Accessories")
                .with_original_price(taka(1_800))
                .with_image("https://picsum.photos/seed/hoodie/300/300")
                .with_description("100% organic cotton hoodie with custom branding options.")
                .with_moq("100 pieces"),
            CatalogItem::new("p5", "Skincare Serum Vitamin C", taka(450), "Beauty")
                .with_original_price(taka(600))
                .with_image("https://picsum.photos/seed/serum/300/300")
                .with_description(
                    "Anti-aging skin repair serum with high concentration of Vit-C.",
                )
                .with_moq("500 units"),
            CatalogItem::new("p6", "Industrial Laser Welder", taka(540_000), "Machinery")
                .with_image("https://picsum.photos/seed/machine/300/300")
                .with_description("High precision handheld fiber laser welding machine.")
                .with_moq("1 unit"),
        ];

        let categories = vec![
            Category::new("1", "Apparel & Accessories", "shirt"),
            Category::new("2", "Consumer Electronics", "smartphone"),
            Category::new("3", "Sports & Entertainment", "dumbbell"),
            Category::new("4", "Beauty", "sparkles"),
            Category::new("5", "Jewelry, Eyewear & Watches", "watch"),
            Category::new("6", "Home & Garden", "home"),
            Category::new("7", "Machinery", "factory"),
            Category::new("8", "Vehicles & Accessories", "car"),
        ];

        Self::new(items, categories)
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// All categories in sidebar order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up an item by id.
    pub fn get(&self, id: &ProductId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Look up an item by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &ProductId) -> Result<&CatalogItem, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a category by exact name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Items whose category equals `name` exactly.
    pub fn by_category(&self, name: &str) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == name)
            .cloned()
            .collect()
    }

    /// The first `n` items in catalog order.
    pub fn first(&self, n: usize) -> Vec<CatalogItem> {
        self.items.iter().take(n).cloned().collect()
    }

    /// Items shown in the "frequently searched" strip.
    pub fn frequently_searched(&self) -> Vec<CatalogItem> {
        self.first(FREQUENTLY_SEARCHED_LEN)
    }

    /// Items shown as the default recommended listing.
    pub fn recommended(&self) -> Vec<CatalogItem> {
        self.items
            .iter()
            .skip(FREQUENTLY_SEARCHED_LEN)
            .take(FREQUENTLY_SEARCHED_LEN)
            .cloned()
            .collect()
    }

    /// Items for the given ids, in catalog order; unknown ids are ignored.
    pub fn select(&self, ids: &[ProductId]) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect()
    }

    /// Currency the catalog is priced in; an empty catalog reports the default.
    pub fn currency(&self) -> Currency {
        self.items
            .first()
            .map(|item| item.price.currency)
            .unwrap_or_default()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_builtin_assortment() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.categories().len(), 8);

        let watch = catalog.get(&ProductId::new("p1")).unwrap();
        assert_eq!(watch.price, Money::from_major(5_500, Currency::BDT));
        assert_eq!(watch.moq.as_deref(), Some("5 pieces"));
        assert_eq!(catalog.currency(), Currency::BDT);
        assert_eq!(Catalog::new(Vec::new(), Vec::new()).currency(), Currency::BDT);
    }

    #[test]
    fn test_canned_listings() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.frequently_searched()), vec!["p1", "p2", "p3"]);
        assert_eq!(ids(&catalog.recommended()), vec!["p4", "p5", "p6"]);
    }

    #[test]
    fn test_by_category_exact_match() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.by_category("Consumer Electronics")), vec!["p1", "p3"]);
        assert!(catalog.by_category("consumer electronics").is_empty());
        assert!(catalog.by_category("Home & Garden").is_empty());
        assert!(catalog.category("Home & Garden").is_some());
    }

    #[test]
    fn test_select_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let picked = catalog.select(&[
            ProductId::new("p5"),
            ProductId::new("nope"),
            ProductId::new("p2"),
        ]);
        assert_eq!(ids(&picked), vec!["p2", "p5"]);
    }

    #[test]
    fn test_require_missing() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.require(&ProductId::new("p9")),
            Err(CommerceError::ProductNotFound(id)) if id == "p9"
        ));
    }
}
