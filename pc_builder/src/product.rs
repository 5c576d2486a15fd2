//! Product records and the editor draft that produces them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::category::Category;

/// Open, ordered attribute bag (`socket`, `tdp`, `formFactorSupport`, ...).
///
/// Order of insertion is kept so a saved product serializes back to the same
/// JSON text.
pub type Attributes = IndexMap<String, Value>;

/// Opaque product identifier (UUID v4 text), fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Immutable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Component kind.
    pub category: Category,
    /// Unit price, never negative.
    pub price: f64,
    /// Units on hand.
    pub stock: u32,
    /// Category-dependent properties read by the compatibility engine.
    #[serde(default)]
    pub attributes: Attributes,
}

impl Product {
    /// New product with a freshly generated id and no attributes.
    pub fn new(name: impl Into<String>, category: Category, price: f64, stock: u32) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            category,
            price: price.max(0.0),
            stock,
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter, mostly for seeds and tests.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Validation failures for editor input. The edit is not committed.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Name is blank after trimming.
    #[error("product name must not be empty")]
    EmptyName,

    /// Price is negative, NaN or infinite.
    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    /// Attribute text is not valid JSON.
    #[error("attributes are not valid JSON: {0}")]
    AttributesJson(#[from] serde_json::Error),

    /// Attribute text parsed, but is not a JSON object.
    #[error("attributes must be a JSON object")]
    AttributesNotObject,
}

/// Raw form input for creating or editing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Component kind.
    pub category: Category,
    /// Unit price.
    pub price: f64,
    /// Units on hand.
    pub stock: u32,
    /// Attributes as the user typed them; blank means none.
    pub attributes_json: String,
}

impl ProductDraft {
    /// Draft pre-filled from an existing product, as the edit form shows it.
    pub fn from_product(p: &Product) -> Self {
        let attributes_json = if p.attributes.is_empty() {
            String::new()
        } else {
            serde_json::to_string_pretty(&p.attributes).unwrap_or_default()
        };
        Self {
            name: p.name.clone(),
            category: p.category,
            price: p.price,
            stock: p.stock,
            attributes_json,
        }
    }

    /// Parse the attribute text into an ordered map.
    pub fn parse_attributes(&self) -> Result<Attributes, EditorError> {
        let text = self.attributes_json.trim();
        if text.is_empty() {
            return Ok(Attributes::new());
        }
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(EditorError::AttributesNotObject),
        }
    }

    /// Validate and turn the draft into a product carrying `id`.
    pub fn into_product(self, id: ProductId) -> Result<Product, EditorError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(EditorError::InvalidPrice(self.price));
        }
        let attributes = self.parse_attributes()?;
        Ok(Product {
            id,
            name: name.to_string(),
            category: self.category,
            price: self.price,
            stock: self.stock,
            attributes,
        })
    }
}
