mod common;

use common::{TestDb, assert_sqlite_pragmas, setup_db};
use pc_builder::{
    Catalog, CatalogError, Category, ProductDraft, ProductId,
    product::EditorError,
    store::{CATALOG_KEY, KvStore, SELECTION_KEY, Workspace},
};

#[test]
fn store_connection_applies_pragmas() {
    let (_db, mut conn) = setup_db();
    assert_sqlite_pragmas(&mut conn);
}

#[test]
fn fresh_database_starts_from_builtin_catalog() {
    let db = TestDb::new();
    let ws = Workspace::open(db.open_kv());
    assert_eq!(ws.catalog(), &Catalog::default_seed());
    assert!(ws.build().is_empty());
    assert!(ws.report().is_pending());
}

#[test]
fn editor_attributes_round_trip_byte_for_byte() {
    let db = TestDb::new();
    let attrs = r#"{"socket":"AM5","tdp":65,"pcieSlots":2,"storage":["NVMe","SATA"],"note":"béta","ratio":1.5}"#;

    let mut ws = Workspace::open(db.open_kv());
    let id = ws
        .add_product(ProductDraft {
            name: "  Custom board ".into(),
            category: Category::Motherboard,
            price: 180.0,
            stock: 4,
            attributes_json: attrs.into(),
        })
        .unwrap();
    let before = serde_json::to_string(&ws.catalog().get(&id).unwrap().attributes).unwrap();
    drop(ws);

    let ws = Workspace::open(db.open_kv());
    let p = ws.catalog().get(&id).unwrap();
    assert_eq!(p.name, "Custom board");
    let after = serde_json::to_string(&p.attributes).unwrap();
    assert_eq!(before, after);
    assert_eq!(
        after,
        r#"{"socket":"AM5","tdp":65,"pcieSlots":2,"storage":["NVMe","SATA"],"note":"béta","ratio":1.5}"#
    );
}

#[test]
fn invalid_editor_json_is_not_committed() {
    let db = TestDb::new();
    let mut ws = Workspace::open(db.open_kv());
    let id = ProductId::from("seed-psu-650");
    let mut draft = ProductDraft::from_product(ws.catalog().get(&id).unwrap());
    draft.attributes_json = "{\"wattage\": 650".into();

    let err = ws.update_product(&id, draft).unwrap_err();
    assert!(matches!(err, CatalogError::Editor(EditorError::AttributesJson(_))));
    drop(ws);

    let ws = Workspace::open(db.open_kv());
    assert_eq!(ws.catalog(), &Catalog::default_seed());
}

#[test]
fn build_survives_reopen_and_keeps_removed_copies() {
    let db = TestDb::new();
    let mut ws = Workspace::open(db.open_kv());
    for id in ["seed-cpu-r5-7600", "seed-mb-b650", "seed-psu-250"] {
        ws.pick(&ProductId::from(id)).unwrap();
    }
    ws.remove_product(&ProductId::from("seed-psu-250")).unwrap();
    drop(ws);

    let ws = Workspace::open(db.open_kv());
    assert_eq!(ws.build().len(), 3);
    assert_eq!(
        ws.build().get(Category::Psu).unwrap().id,
        ProductId::from("seed-psu-250")
    );
    assert!(ws.catalog().get(&ProductId::from("seed-psu-250")).is_none());
    assert_eq!(ws.report().required_watts, 165.0);
}

#[test]
fn malformed_blobs_fall_back_to_defaults() {
    let db = TestDb::new();
    let mut kv = db.open_kv();
    kv.set(CATALOG_KEY, "[{\"id\": 1").unwrap();
    kv.set(SELECTION_KEY, "\"CPU\"").unwrap();

    let ws = Workspace::open(kv);
    assert_eq!(ws.catalog(), &Catalog::default_seed());
    assert!(ws.build().is_empty());
}

#[test]
fn saves_land_under_fixed_keys() {
    let db = TestDb::new();
    let mut ws = Workspace::open(db.open_kv());
    ws.pick(&ProductId::from("seed-gpu-4070")).unwrap();
    ws.remove_product(&ProductId::from("seed-ssd-990")).unwrap();

    let mut kv = ws.into_store();
    assert_eq!(
        kv.keys().unwrap(),
        vec![CATALOG_KEY.to_string(), SELECTION_KEY.to_string()]
    );
    let selection: serde_json::Value =
        serde_json::from_str(&kv.get(SELECTION_KEY).unwrap().unwrap()).unwrap();
    let seed = Catalog::default_seed();
    let gpu = seed.get(&ProductId::from("seed-gpu-4070")).unwrap();
    assert_eq!(selection["GPU"]["name"], gpu.name.as_str());
}
