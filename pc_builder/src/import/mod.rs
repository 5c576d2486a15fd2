//! Spreadsheet-to-catalog import.
//!
//! Uploaded sheets come from people, not programs, so this module leans on
//! header aliasing and lenient coercion instead of a strict schema.
//!
//! Per row:
//! 1. Headers are normalized (lowercase, alphanumerics only) and indexed.
//! 2. `category` is resolved from its aliases. An unknown or missing value
//!    falls back to [`Category::DEFAULT`] or fails the import, depending on
//!    [`UnknownCategoryPolicy`].
//! 3. `name` is resolved, defaulting to [`PLACEHOLDER_NAME`].
//! 4. `price` and `stock` are coerced to numbers, defaulting to 0.
//! 5. Each known attribute key takes the first non-blank aliased cell;
//!    comma strings become lists, numeric strings become numbers.
//! 6. A JSON object in an `attributes` column is merged on top, overwriting
//!    same-named keys. A malformed one is skipped and counted.
//! 7. The product gets a fresh id.
//!
//! Entrypoints:
//! - [`normalize_rows`] for already-read rows
//! - [`import_file`] to read and normalize a file in one go
//! - [`reader::read_rows`] for the read step alone

mod coerce;
pub mod headers;
pub mod reader;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::{
    category::Category,
    product::{Attributes, Product, ProductId},
};

use headers::{HeaderLookup, is_blank};

pub use headers::normalize_header;
pub use reader::read_rows;

/// One source row: raw header text -> cell value.
pub type Row = IndexMap<String, Value>;

/// Name given to rows with no usable name cell.
pub const PLACEHOLDER_NAME: &str = "Unnamed product";

/// Errors that abort an import. Nothing is imported when one is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet container could not be parsed.
    #[error("failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The CSV text could not be parsed.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON text could not be parsed into rows.
    #[error("failed to parse JSON rows: {0}")]
    Json(#[from] serde_json::Error),

    /// The workbook contains no worksheet.
    #[error("workbook {0} has no worksheet")]
    NoWorksheet(PathBuf),

    /// The extension names no supported format.
    #[error("unsupported import format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Strict mode: a row names no known category.
    #[error("row {row}: unknown category '{value}'")]
    UnknownCategory {
        /// 1-based data row number (header row excluded).
        row: usize,
        /// Raw category cell, empty when the cell was missing.
        value: String,
    },
}

/// What to do with a row whose category is missing or unknown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownCategoryPolicy {
    /// Use [`Category::DEFAULT`] and count it in the report.
    #[default]
    Default,
    /// Fail the whole import.
    Error,
}

/// Summary of what normalization did. Counters are additive over the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows handed to the normalizer.
    pub rows_seen: usize,
    /// Rows with every cell blank, skipped.
    pub rows_skipped_blank: usize,
    /// Products produced.
    pub products: usize,
    /// Rows whose category fell back to the default.
    pub categories_defaulted: usize,
    /// Rows whose `attributes` JSON could not be merged.
    pub attribute_json_failures: usize,
}

/// Normalize rows into products.
///
/// Returns the products in row order and a report. Only
/// [`UnknownCategoryPolicy::Error`] can make this fail.
pub fn normalize_rows(
    rows: &[Row],
    policy: UnknownCategoryPolicy,
) -> Result<(Vec<Product>, ImportReport), ImportError> {
    let mut report = ImportReport::default();
    let mut products = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        report.rows_seen += 1;
        if row.values().all(is_blank) {
            report.rows_skipped_blank += 1;
            continue;
        }
        let product = normalize_row(row, i + 1, policy, &mut report)?;
        products.push(product);
    }

    report.products = products.len();
    tracing::info!(
        rows = report.rows_seen,
        products = report.products,
        defaulted = report.categories_defaulted,
        json_failures = report.attribute_json_failures,
        "import normalized"
    );
    Ok((products, report))
}

fn normalize_row(
    row: &Row,
    row_no: usize,
    policy: UnknownCategoryPolicy,
    report: &mut ImportReport,
) -> Result<Product, ImportError> {
    let lk = HeaderLookup::new(row);

    let raw_category = coerce::text(lk.first(&headers::CATEGORY));
    let category = match raw_category.as_deref().map(str::parse::<Category>) {
        Some(Ok(c)) => c,
        _ => match policy {
            UnknownCategoryPolicy::Default => {
                report.categories_defaulted += 1;
                tracing::debug!(row = row_no, value = ?raw_category, "category defaulted");
                Category::DEFAULT
            }
            UnknownCategoryPolicy::Error => {
                return Err(ImportError::UnknownCategory {
                    row: row_no,
                    value: raw_category.unwrap_or_default(),
                });
            }
        },
    };

    let name = coerce::text(lk.first(&headers::NAME)).unwrap_or_else(|| PLACEHOLDER_NAME.to_string());
    let price = coerce::price(lk.first(&headers::PRICE));
    let stock = coerce::stock(lk.first(&headers::STOCK));

    let mut attributes = Attributes::new();
    for (key, aliases) in headers::ATTRIBUTE_KEYS.iter() {
        if let Some(v) = lk.first(aliases) {
            attributes.insert((*key).to_string(), coerce::attribute_value(v));
        }
    }

    if let Some(extra) = lk.first(&headers::ATTRIBUTES) {
        match parse_attribute_object(extra) {
            Some(map) => {
                for (k, v) in map {
                    attributes.insert(k, v);
                }
            }
            None => {
                report.attribute_json_failures += 1;
                tracing::debug!(row = row_no, "attributes column is not a JSON object, skipped");
            }
        }
    }

    Ok(Product {
        id: ProductId::generate(),
        name,
        category,
        price,
        stock,
        attributes,
    })
}

fn parse_attribute_object(v: &Value) -> Option<serde_json::Map<String, Value>> {
    match v {
        Value::Object(map) => Some(map.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s.trim()) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Read `path` and normalize its rows.
pub fn import_file(
    path: &Path,
    policy: UnknownCategoryPolicy,
) -> Result<(Vec<Product>, ImportReport), ImportError> {
    let rows = read_rows(path)?;
    normalize_rows(&rows, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn category_is_case_insensitive() {
        let rows = vec![row(&[("Category", json!("gpu")), ("Name", json!("RTX 4060"))])];
        let (products, report) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        assert_eq!(products[0].category, Category::Gpu);
        assert_eq!(report.categories_defaulted, 0);
    }

    #[test]
    fn unknown_category_defaults_to_cpu() {
        let rows = vec![
            row(&[("Category", json!("Videocard")), ("Name", json!("X"))]),
            row(&[("Name", json!("No category at all"))]),
        ];
        let (products, report) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        assert!(products.iter().all(|p| p.category == Category::Cpu));
        assert_eq!(report.categories_defaulted, 2);
    }

    #[test]
    fn strict_policy_fails_with_row_and_value() {
        let rows = vec![
            row(&[("Category", json!("RAM")), ("Name", json!("ok"))]),
            row(&[("Category", json!("Videocard")), ("Name", json!("bad"))]),
        ];
        let err = normalize_rows(&rows, UnknownCategoryPolicy::Error).unwrap_err();
        match err {
            ImportError::UnknownCategory { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "Videocard");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn aliases_and_coercion() {
        let rows = vec![row(&[
            ("Категория", json!("Case")),
            ("Название", json!("Fractal North")),
            ("Цена", json!("139,90")),
            ("Qty", json!("4")),
            ("Form Factor Support", json!("ATX,mATX,ITX")),
            ("Supported form factors", json!("E-ATX")),
        ])];
        let (products, _) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        let p = &products[0];
        assert_eq!(p.category, Category::Case);
        assert_eq!(p.name, "Fractal North");
        assert_eq!(p.price, 139.9);
        assert_eq!(p.stock, 4);
        // first alias in table order wins
        assert_eq!(p.attributes["formFactorSupport"], json!(["ATX", "mATX", "ITX"]));
    }

    #[test]
    fn missing_name_price_stock_use_defaults() {
        let rows = vec![row(&[("Category", json!("PSU")), ("Wattage", json!("750"))])];
        let (products, _) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        let p = &products[0];
        assert_eq!(p.name, PLACEHOLDER_NAME);
        assert_eq!(p.price, 0.0);
        assert_eq!(p.stock, 0);
        assert_eq!(p.attributes["wattage"], json!(750));
    }

    #[test]
    fn json_attributes_override_aliases() {
        let rows = vec![row(&[
            ("category", json!("CPU")),
            ("socket", json!("AM4")),
            ("attributes", json!(r#"{"socket": "AM5", "cores": 8}"#)),
        ])];
        let (products, report) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        assert_eq!(products[0].attributes["socket"], json!("AM5"));
        assert_eq!(products[0].attributes["cores"], json!(8));
        assert_eq!(report.attribute_json_failures, 0);
    }

    #[test]
    fn bad_json_attributes_are_swallowed() {
        let rows = vec![row(&[
            ("category", json!("CPU")),
            ("socket", json!("AM5")),
            ("attributes", json!("{socket: AM4")),
        ])];
        let (products, report) = normalize_rows(&rows, UnknownCategoryPolicy::Default).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].attributes["socket"], json!("AM5"));
        assert_eq!(report.attribute_json_failures, 1);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let rows = vec![
            row(&[("category", json!("")), ("name", Value::Null)]),
            row(&[("category", json!("GPU")), ("name", json!("Arc B580"))]),
        ];
        let (products, report) = normalize_rows(&rows, UnknownCategoryPolicy::Error).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(report.rows_seen, 2);
        assert_eq!(report.rows_skipped_blank, 1);
    }

    #[test]
    fn each_row_gets_a_fresh_id() {
        let r = row(&[("category", json!("RAM")), ("name", json!("kit"))]);
        let (products, _) =
            normalize_rows(&[r.clone(), r], UnknownCategoryPolicy::Default).unwrap();
        assert_ne!(products[0].id, products[1].id);
    }
}
