//! Session state: catalog + build bound to a store, saved after every change.

use crate::{
    catalog::{Catalog, CatalogError},
    category::Category,
    compat::{self, Report},
    product::{Product, ProductDraft, ProductId},
    selection::Build,
};

use super::{KvStore, load_build, load_catalog, save_build, save_catalog};

/// How imported products land in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Add after the existing products.
    #[default]
    Append,
    /// Drop the existing products first.
    Replace,
}

/// Catalog and build of one user, persisted through `K`.
pub struct Workspace<K: KvStore> {
    kv: K,
    catalog: Catalog,
    build: Build,
}

impl<K: KvStore> Workspace<K> {
    /// Load both blobs from `kv`, falling back to defaults.
    pub fn open(mut kv: K) -> Self {
        let catalog = load_catalog(&mut kv);
        let build = load_build(&mut kv);
        tracing::debug!(products = catalog.len(), picked = build.len(), "workspace opened");
        Self { kv, catalog, build }
    }

    /// Current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current build.
    pub fn build(&self) -> &Build {
        &self.build
    }

    /// Compatibility of the current build.
    pub fn report(&self) -> Report {
        compat::evaluate(&self.build)
    }

    /// Give back the store (e.g. to reopen it).
    pub fn into_store(self) -> K {
        self.kv
    }

    /// Create a product from editor input.
    pub fn add_product(&mut self, draft: ProductDraft) -> Result<ProductId, CatalogError> {
        let id = self.catalog.add_draft(draft)?.id.clone();
        save_catalog(&mut self.kv, &self.catalog);
        Ok(id)
    }

    /// Replace a product's fields from editor input.
    pub fn update_product(&mut self, id: &ProductId, draft: ProductDraft) -> Result<(), CatalogError> {
        self.catalog.update_draft(id, draft)?;
        save_catalog(&mut self.kv, &self.catalog);
        Ok(())
    }

    /// Delete a product. A copy already in the build stays there.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let removed = self.catalog.remove(id)?;
        save_catalog(&mut self.kv, &self.catalog);
        Ok(removed)
    }

    /// Add imported products.
    pub fn import_products(
        &mut self,
        products: Vec<Product>,
        mode: ImportMode,
    ) -> Result<usize, CatalogError> {
        let n = match mode {
            ImportMode::Append => self.catalog.extend(products)?,
            ImportMode::Replace => self.catalog.replace_all(products)?,
        };
        save_catalog(&mut self.kv, &self.catalog);
        tracing::info!(added = n, ?mode, total = self.catalog.len(), "products imported");
        Ok(n)
    }

    /// Put a copy of catalog product `id` into its category slot.
    pub fn pick(&mut self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let product = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let replaced = self.build.pick(product);
        save_build(&mut self.kv, &self.build);
        Ok(replaced)
    }

    /// Empty one slot of the build.
    pub fn clear(&mut self, category: Category) -> Option<Product> {
        let removed = self.build.clear(category);
        save_build(&mut self.kv, &self.build);
        removed
    }

    /// Empty the whole build.
    pub fn reset_build(&mut self) {
        self.build.reset();
        save_build(&mut self.kv, &self.build);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compat::Level, store::MemoryKv};

    fn draft(name: &str, category: Category, attrs: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category,
            price: 100.0,
            stock: 1,
            attributes_json: attrs.into(),
        }
    }

    #[test]
    fn state_survives_reopen() {
        let mut ws = Workspace::open(MemoryKv::new());
        let cpu = ws
            .add_product(draft("7800X3D", Category::Cpu, r#"{"socket":"AM5","tdp":120}"#))
            .unwrap();
        ws.pick(&cpu).unwrap();

        let ws = Workspace::open(ws.into_store());
        assert!(ws.catalog().get(&cpu).is_some());
        assert_eq!(ws.build().get(Category::Cpu).unwrap().id, cpu);
    }

    #[test]
    fn removed_product_stays_in_build() {
        let mut ws = Workspace::open(MemoryKv::new());
        let id = ProductId::from("seed-gpu-4070");
        ws.pick(&id).unwrap();
        ws.remove_product(&id).unwrap();
        assert!(ws.catalog().get(&id).is_none());
        assert_eq!(ws.build().get(Category::Gpu).unwrap().id, id);
    }

    #[test]
    fn pick_unknown_id_is_not_found() {
        let mut ws = Workspace::open(MemoryKv::new());
        let err = ws.pick(&ProductId::from("nope")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(ws.build().is_empty());
    }

    #[test]
    fn seed_build_is_compatible() {
        let mut ws = Workspace::open(MemoryKv::new());
        for id in [
            "seed-cpu-r5-7600",
            "seed-mb-b650",
            "seed-gpu-4070",
            "seed-ram-ddr5-32",
            "seed-ssd-990",
            "seed-psu-650",
            "seed-case-4000d",
            "seed-cooler-ak400",
        ] {
            ws.pick(&ProductId::from(id)).unwrap();
        }
        let report = ws.report();
        assert_eq!(report.notes.len(), 7);
        assert_eq!(report.overall(), Some(Level::Ok));
        assert_eq!(report.required_watts, 365.0);

        ws.pick(&ProductId::from("seed-psu-250")).unwrap();
        assert_eq!(ws.report().overall(), Some(Level::Warn));

        ws.clear(Category::Psu);
        ws.reset_build();
        assert!(ws.report().is_pending());
    }

    #[test]
    fn import_replace_drops_existing() {
        let mut ws = Workspace::open(MemoryKv::new());
        let p = Product::new("Only", Category::Case, 60.0, 1);
        assert_eq!(ws.import_products(vec![p], ImportMode::Replace).unwrap(), 1);
        assert_eq!(ws.catalog().len(), 1);
    }
}
