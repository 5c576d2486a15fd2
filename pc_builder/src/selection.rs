//! The in-progress build: at most one product per category.
//!
//! Slots hold full copies of products, not ids, so a product deleted from the
//! catalog afterwards stays in the build until it is cleared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{category::Category, product::Product};

/// One optional slot per [`Category`].
///
/// Serialized as an object keyed by category label holding filled slots only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, Product>", into = "BTreeMap<Category, Product>")]
pub struct Build {
    slots: [Option<Product>; 8],
}

impl Build {
    /// Empty build.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a copy of `product` in its category's slot, returning the part it replaced.
    pub fn pick(&mut self, product: Product) -> Option<Product> {
        let idx = product.category.index();
        self.slots[idx].replace(product)
    }

    /// Empty one slot, returning what it held.
    pub fn clear(&mut self, category: Category) -> Option<Product> {
        self.slots[category.index()].take()
    }

    /// Empty every slot.
    pub fn reset(&mut self) {
        self.slots = Default::default();
    }

    /// Part chosen for `category`, if any.
    pub fn get(&self, category: Category) -> Option<&Product> {
        self.slots[category.index()].as_ref()
    }

    /// Filled slots in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Product)> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|p| (c, p)))
    }

    /// Categories with no part chosen yet.
    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when nothing is chosen.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the chosen parts' prices; `0.0` (never `-0.0`) when empty.
    pub fn total_price(&self) -> f64 {
        self.iter().fold(0.0, |acc, (_, p)| acc + p.price)
    }
}

impl From<BTreeMap<Category, Product>> for Build {
    // The map key decides the slot; a stored record whose own category
    // disagrees is re-tagged to the slot it was saved under.
    fn from(map: BTreeMap<Category, Product>) -> Self {
        let mut b = Build::default();
        for (cat, mut p) in map {
            p.category = cat;
            b.pick(p);
        }
        b
    }
}

impl From<Build> for BTreeMap<Category, Product> {
    fn from(b: Build) -> Self {
        Category::ALL
            .into_iter()
            .zip(b.slots)
            .filter_map(|(c, p)| p.map(|p| (c, p)))
            .collect()
    }
}
