//! Catalog subsystem.
//!
//! [`Catalog`] is the ordered, id-unique collection of products the user
//! edits and builds from. [`seed`] holds the built-in catalog used when no
//! saved one can be loaded. Persistence lives in [`crate::store`].

mod seed;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    category::Category,
    product::{EditorError, Product, ProductDraft, ProductId},
};

pub use seed::default_seed;

/// Errors from catalog mutations. The catalog is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has this id.
    #[error("no product with id {0}")]
    NotFound(ProductId),

    /// A product with this id already exists.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// Editor input failed validation.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Ordered product collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in sample catalog.
    pub fn default_seed() -> Self {
        Self {
            products: default_seed(),
        }
    }

    /// Catalog from products, rejecting duplicate ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut cat = Self::new();
        cat.extend(products)?;
        Ok(cat)
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Products of one category, in order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Look up by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    /// Append a product that already carries its id.
    pub fn add(&mut self, product: Product) -> Result<&Product, CatalogError> {
        if self.position(&product.id).is_some() {
            return Err(CatalogError::DuplicateId(product.id));
        }
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Validate editor input and append it under a fresh id.
    pub fn add_draft(&mut self, draft: ProductDraft) -> Result<&Product, CatalogError> {
        let product = draft.into_product(ProductId::generate())?;
        self.add(product)
    }

    /// Validate editor input and replace every field of `id` except the id.
    pub fn update_draft(
        &mut self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> Result<&Product, CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let updated = draft.into_product(id.clone())?;
        self.products[idx] = updated;
        Ok(&self.products[idx])
    }

    /// Remove by id.
    pub fn remove(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        Ok(self.products.remove(idx))
    }

    /// Append many products; all-or-nothing on duplicate ids.
    pub fn extend(&mut self, products: Vec<Product>) -> Result<usize, CatalogError> {
        let mut seen: std::collections::HashSet<&ProductId> =
            self.products.iter().map(|p| &p.id).collect();
        for p in &products {
            if !seen.insert(&p.id) {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
        }
        let n = products.len();
        self.products.extend(products);
        Ok(n)
    }

    /// Swap the whole content, rejecting duplicate ids.
    pub fn replace_all(&mut self, products: Vec<Product>) -> Result<usize, CatalogError> {
        let fresh = Self::from_products(products)?;
        let n = fresh.len();
        *self = fresh;
        Ok(n)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when there are no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
