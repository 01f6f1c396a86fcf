//! Catalog model - the menu as a tree of items, sized items, and categories.
//!
//! [`CatalogItem`] is a closed set of three node kinds. Only [`SimpleItem`] is
//! purchasable; a [`MultiVariantItem`] resolves to one `SimpleItem` per size and a
//! [`CategoryGroup`] flattens to the items beneath it. Nothing in this module
//! touches the database: the tree is built by [`crate::core::menu::load_catalog`].

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Size labels shown first, in this order. Other labels follow alphabetically.
pub const STANDARD_SIZES: [&str; 3] = ["Small", "Medium", "Large"];

static NEXT_UNSAVED_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity used for equality and hashing of [`SimpleItem`]s.
///
/// Persisted items are identified by their catalog id. Items with id 0 have not
/// been persisted; each construction gets its own token, so two such items are
/// only equal when one is a clone of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemIdentity {
    /// Backed by a `food_items` row
    Catalog(i64),
    /// Not backed by any row (e.g., a resolved size variant)
    Unsaved(u64),
}

/// A concrete, priced, purchasable menu item.
#[derive(Debug, Clone)]
pub struct SimpleItem {
    identity: ItemIdentity,
    name: String,
    price: f64,
    description: String,
    category_name: String,
    category_id: i64,
}

impl SimpleItem {
    /// Creates an item. An `id` of 0 marks it as not persisted.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category_name: impl Into<String>,
        category_id: i64,
    ) -> Self {
        let identity = if id == 0 {
            ItemIdentity::Unsaved(NEXT_UNSAVED_TOKEN.fetch_add(1, Ordering::Relaxed))
        } else {
            ItemIdentity::Catalog(id)
        };

        Self {
            identity,
            name: name.into(),
            price,
            description: description.into(),
            category_name: category_name.into(),
            category_id,
        }
    }

    /// Creates an item with no catalog id and no category id.
    #[must_use]
    pub fn unsaved(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self::new(0, name, price, description, category_name, 0)
    }

    /// Catalog id, or 0 when the item is not persisted.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self.identity {
            ItemIdentity::Catalog(id) => id,
            ItemIdentity::Unsaved(_) => 0,
        }
    }

    #[must_use]
    pub const fn identity(&self) -> ItemIdentity {
        self.identity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    #[must_use]
    pub const fn category_id(&self) -> i64 {
        self.category_id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lowercase(&self.name, needle)
            || contains_lowercase(&self.description, needle)
            || contains_lowercase(&self.category_name, needle)
    }
}

impl PartialEq for SimpleItem {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for SimpleItem {}

impl Hash for SimpleItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

/// A menu entry sold in several sizes, each with its own price.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiVariantItem {
    base_name: String,
    description: String,
    category_name: String,
    category_id: i64,
    sizes: BTreeMap<String, f64>,
}

impl MultiVariantItem {
    #[must_use]
    pub fn new(
        base_name: impl Into<String>,
        description: impl Into<String>,
        category_name: impl Into<String>,
        category_id: i64,
        sizes: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            description: description.into(),
            category_name: category_name.into(),
            category_id,
            sizes,
        }
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    /// Size labels with prices in display order: Small, Medium, Large, then the
    /// remaining labels alphabetically.
    #[must_use]
    pub fn sizes(&self) -> Vec<(&str, f64)> {
        // BTreeMap iterates alphabetically; the stable sort keeps that order
        // among non-standard labels.
        let mut sizes: Vec<(&str, f64)> = self
            .sizes
            .iter()
            .map(|(label, price)| (label.as_str(), *price))
            .collect();
        sizes.sort_by_key(|(label, _)| size_rank(label));
        sizes
    }

    /// Representative price for summary display: the cheapest size, or 0.0 with
    /// no sizes defined.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.sizes.values().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Combined name for one size, e.g. "Pepperoni (Large)".
    #[must_use]
    pub fn variant_name(&self, label: &str) -> String {
        format!("{} ({label})", self.base_name)
    }

    /// Resolves one size into an unsaved purchasable item.
    #[must_use]
    pub fn variant(&self, label: &str) -> Option<SimpleItem> {
        self.sizes
            .get(label)
            .map(|price| self.build_variant(label, *price))
    }

    /// Resolves every size, in display order.
    #[must_use]
    pub fn variants(&self) -> Vec<SimpleItem> {
        self.sizes()
            .into_iter()
            .map(|(label, price)| self.build_variant(label, price))
            .collect()
    }

    fn build_variant(&self, label: &str, price: f64) -> SimpleItem {
        SimpleItem::new(
            0,
            self.variant_name(label),
            price,
            format!("{} ({label} size)", self.description),
            self.category_name.clone(),
            self.category_id,
        )
    }

    fn matches(&self, needle: &str) -> bool {
        contains_lowercase(&self.base_name, needle)
            || contains_lowercase(&self.description, needle)
            || contains_lowercase(&self.category_name, needle)
            || self
                .sizes
                .keys()
                .any(|label| contains_lowercase(&self.variant_name(label), needle))
    }
}

/// A named grouping of catalog nodes. Children keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    name: String,
    category_id: i64,
    children: Vec<CatalogItem>,
}

impl CategoryGroup {
    #[must_use]
    pub fn new(name: impl Into<String>, category_id: i64) -> Self {
        Self {
            name: name.into(),
            category_id,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn category_id(&self) -> i64 {
        self.category_id
    }

    #[must_use]
    pub fn children(&self) -> &[CatalogItem] {
        &self.children
    }

    /// Appends a child node.
    pub fn add(&mut self, item: impl Into<CatalogItem>) {
        self.children.push(item.into());
    }

    /// Finds a direct child category by name (case-insensitive).
    #[must_use]
    pub fn find_category(&self, name: &str) -> Option<&Self> {
        self.children.iter().find_map(|child| match child {
            CatalogItem::Category(group) if group.name.eq_ignore_ascii_case(name) => Some(group),
            _ => None,
        })
    }
}

/// Any node of the menu tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    /// A fixed-price item
    Simple(SimpleItem),
    /// An item sold in several sizes
    MultiVariant(MultiVariantItem),
    /// A grouping of other nodes
    Category(CategoryGroup),
}

impl CatalogItem {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(item) => item.name(),
            Self::MultiVariant(item) => item.base_name(),
            Self::Category(group) => group.name(),
        }
    }

    /// Unit price for a simple item, cheapest size for a sized item, and 0.0
    /// for a category (categories are never summed).
    #[must_use]
    pub fn price(&self) -> f64 {
        match self {
            Self::Simple(item) => item.price(),
            Self::MultiVariant(item) => item.price(),
            Self::Category(_) => 0.0,
        }
    }

    /// Case-insensitive substring match against every text reachable from this
    /// node, including synthesized size names and, for categories, all
    /// descendants.
    #[must_use]
    pub fn search(&self, text: &str) -> bool {
        self.matches(&text.to_lowercase())
    }

    fn matches(&self, needle: &str) -> bool {
        match self {
            Self::Simple(item) => item.matches(needle),
            Self::MultiVariant(item) => item.matches(needle),
            Self::Category(group) => {
                contains_lowercase(&group.name, needle)
                    || group.children.iter().any(|child| child.matches(needle))
            }
        }
    }

    /// Every purchasable unit under this node, in tree order.
    #[must_use]
    pub fn flatten(&self) -> Vec<SimpleItem> {
        match self {
            Self::Simple(item) => vec![item.clone()],
            Self::MultiVariant(item) => item.variants(),
            Self::Category(group) => group.children.iter().flat_map(Self::flatten).collect(),
        }
    }
}

impl From<SimpleItem> for CatalogItem {
    fn from(item: SimpleItem) -> Self {
        Self::Simple(item)
    }
}

impl From<MultiVariantItem> for CatalogItem {
    fn from(item: MultiVariantItem) -> Self {
        Self::MultiVariant(item)
    }
}

impl From<CategoryGroup> for CatalogItem {
    fn from(group: CategoryGroup) -> Self {
        Self::Category(group)
    }
}

fn size_rank(label: &str) -> usize {
    STANDARD_SIZES
        .iter()
        .position(|standard| *standard == label)
        .unwrap_or(STANDARD_SIZES.len())
}

fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn burger_sizes() -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("Small".to_string(), 5.00),
            ("Medium".to_string(), 6.50),
            ("Large".to_string(), 8.00),
        ])
    }

    fn combo() -> MultiVariantItem {
        MultiVariantItem::new("Combo", "Burger with fries", "Burgers", 1, burger_sizes())
    }

    #[test]
    fn test_same_catalog_id_is_same_item() {
        let a = SimpleItem::new(7, "Margherita", 9.5, "Classic", "Pizzas", 2);
        let b = SimpleItem::new(7, "Margherita Deluxe", 11.0, "Renamed", "Pizzas", 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsaved_items_are_distinct_unless_cloned() {
        let a = SimpleItem::unsaved("Lemonade", 2.0, "Fresh", "Cold Drinks");
        let b = SimpleItem::unsaved("Lemonade", 2.0, "Fresh", "Cold Drinks");
        assert_ne!(a, b);
        assert_eq!(a.id(), 0);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_variants_resolve_in_size_order() {
        let variants = MultiVariantItem::new("X", "Thing", "Burgers", 1, burger_sizes()).variants();

        let names: Vec<&str> = variants.iter().map(SimpleItem::name).collect();
        assert_eq!(names, ["X (Small)", "X (Medium)", "X (Large)"]);
        let prices: Vec<f64> = variants.iter().map(SimpleItem::price).collect();
        assert_eq!(prices, [5.00, 6.50, 8.00]);
        assert!(variants.iter().all(|v| v.id() == 0));
        assert_eq!(variants[0].description(), "Thing (Small size)");
    }

    #[test]
    fn test_multi_variant_price_is_cheapest_size() {
        let item = MultiVariantItem::new("X", "Thing", "Burgers", 1, burger_sizes());
        assert_eq!(item.price(), 5.00);
        assert_eq!(CatalogItem::from(item).price(), 5.00);

        let empty = MultiVariantItem::new("Y", "", "Burgers", 1, BTreeMap::new());
        assert_eq!(empty.price(), 0.0);
    }

    #[test]
    fn test_extra_sizes_follow_standard_sizes_alphabetically() {
        let mut sizes = burger_sizes();
        sizes.insert("Family".to_string(), 15.0);
        sizes.insert("Extra Large".to_string(), 10.0);
        let item = MultiVariantItem::new("Pizza", "", "Pizzas", 1, sizes);

        let labels: Vec<&str> = item.sizes().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, ["Small", "Medium", "Large", "Extra Large", "Family"]);
    }

    #[test]
    fn test_variant_lookup_by_label() {
        let item = combo();
        let large = item.variant("Large").unwrap();
        assert_eq!(large.name(), "Combo (Large)");
        assert_eq!(large.price(), 8.00);
        assert!(item.variant("Jumbo").is_none());
    }

    #[test]
    fn test_category_search_matches_synthesized_variant_name() {
        let mut group = CategoryGroup::new("Burgers", 1);
        group.add(combo());
        let catalog = CatalogItem::from(group);

        assert!(catalog.search("Large"));
        assert!(catalog.search("combo (medium)"));
        assert!(!catalog.search("sushi"));
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_text() {
        let item = CatalogItem::from(SimpleItem::new(
            3,
            "Caesar Salad",
            7.25,
            "Romaine with parmesan",
            "Salads",
            4,
        ));
        assert!(item.search("caesar"));
        assert!(item.search("PARMESAN"));
        assert!(item.search("salads"));
        assert!(!item.search("burger"));
    }

    #[test]
    fn test_flatten_keeps_child_order_across_nesting() {
        let mut drinks = CategoryGroup::new("Cold Drinks", 2);
        drinks.add(SimpleItem::new(10, "Cola", 1.5, "", "Cold Drinks", 2));

        let mut root = CategoryGroup::new("Menu", 0);
        root.add(SimpleItem::new(1, "Fries", 2.5, "", "Fries", 1));
        root.add(combo());
        root.add(drinks);
        let root = CatalogItem::from(root);

        let names: Vec<String> = root
            .flatten()
            .iter()
            .map(|item| item.name().to_string())
            .collect();
        assert_eq!(
            names,
            ["Fries", "Combo (Small)", "Combo (Medium)", "Combo (Large)", "Cola"]
        );
        assert_eq!(root.price(), 0.0);
    }

    #[test]
    fn test_find_category_by_name() {
        let mut root = CategoryGroup::new("Menu", 0);
        root.add(CategoryGroup::new("Pizzas", 3));
        assert_eq!(root.find_category("pizzas").unwrap().category_id(), 3);
        assert!(root.find_category("Noodles").is_none());
    }
}
