//! Crate-level documentation for the pc_builder library.
//!
//! Parts catalog, single-slot-per-category build selection, a rule-based
//! compatibility checker, a spreadsheet importer and summary export.

#![deny(missing_docs)]

pub mod catalog;
pub mod category;
pub mod compat;
pub mod config;
pub mod db;
pub mod export;
pub mod import;
pub mod parts;
pub mod product;
pub mod schema;
pub mod selection;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use category::Category;
pub use compat::{Level, Note, Report, estimate_wattage, evaluate};
pub use product::{Attributes, Product, ProductDraft, ProductId};
pub use selection::Build;
