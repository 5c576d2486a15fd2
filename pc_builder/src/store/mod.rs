//! Persistence of the catalog and the build selection.
//!
//! State is kept as two independent JSON blobs under fixed keys in a
//! [`KvStore`]. Loading never fails: a missing or malformed blob falls back to
//! the built-in catalog or an empty build. Saving is fire-and-forget; a failed
//! write is logged and the in-memory state stays authoritative.

mod memory;
mod sqlite;
mod workspace;

use thiserror::Error;

use crate::{catalog::Catalog, product::Product, selection::Build};

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;
pub use workspace::{ImportMode, Workspace};

/// Key of the catalog blob.
pub const CATALOG_KEY: &str = "pc_builder.catalog";
/// Key of the build selection blob.
pub const SELECTION_KEY: &str = "pc_builder.selection";

/// Errors from a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be opened or migrated.
    #[error("store setup failed: {0:#}")]
    Setup(#[from] anyhow::Error),

    /// A read or write query failed.
    #[error("store query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// String blob storage keyed by name.
pub trait KvStore {
    /// Value stored under `key`, if any.
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Saved catalog, or the built-in seed when nothing usable is stored.
pub fn load_catalog<K: KvStore + ?Sized>(kv: &mut K) -> Catalog {
    let text = match kv.get(CATALOG_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::info!("no saved catalog, using built-in catalog");
            return Catalog::default_seed();
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog read failed, using built-in catalog");
            return Catalog::default_seed();
        }
    };

    let products = match serde_json::from_str::<Vec<Product>>(&text) {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "saved catalog is malformed, using built-in catalog");
            return Catalog::default_seed();
        }
    };
    match Catalog::from_products(products) {
        Ok(cat) => cat,
        Err(e) => {
            tracing::warn!(error = %e, "saved catalog is inconsistent, using built-in catalog");
            Catalog::default_seed()
        }
    }
}

/// Saved build, or an empty one when nothing usable is stored.
pub fn load_build<K: KvStore + ?Sized>(kv: &mut K) -> Build {
    match kv.get(SELECTION_KEY) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "saved build is malformed, starting empty");
            Build::default()
        }),
        Ok(None) => Build::default(),
        Err(e) => {
            tracing::warn!(error = %e, "build read failed, starting empty");
            Build::default()
        }
    }
}

/// Write the catalog; failures are logged, not returned.
pub fn save_catalog<K: KvStore + ?Sized>(kv: &mut K, catalog: &Catalog) {
    save(kv, CATALOG_KEY, catalog);
}

/// Write the build; failures are logged, not returned.
pub fn save_build<K: KvStore + ?Sized>(kv: &mut K, build: &Build) {
    save(kv, SELECTION_KEY, build);
}

fn save<K: KvStore + ?Sized, T: serde::Serialize>(kv: &mut K, key: &str, value: &T) {
    let text = match serde_json::to_string(value) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(key, error = %e, "serialize failed, not saved");
            return;
        }
    };
    if let Err(e) = kv.set(key, &text) {
        tracing::warn!(key, error = %e, "save failed, keeping in-memory state");
    } else {
        tracing::debug!(key, bytes = text.len(), "saved");
    }
}
