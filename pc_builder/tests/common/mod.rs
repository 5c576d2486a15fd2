#![allow(dead_code)]

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use pc_builder::{
    Category, Product,
    db::{connection, migrate},
    store::SqliteKv,
};
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct Synchronous {
    #[diesel(sql_type = Integer)]
    synchronous: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}

pub struct TestDb {
    pub dir: TempDir, // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let mut p = PathBuf::from(dir.path());
        p.push("test.db");
        let path = p.to_string_lossy().to_string();
        Self { dir, path }
    }

    pub fn open_kv(&self) -> SqliteKv {
        SqliteKv::open(&self.path).expect("open kv store")
    }

    /// Write `contents` to `<tmpdir>/<name>` and return the path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let db = TestDb::new();
    migrate::run_sqlite(&db.path).expect("migrations");
    let conn = connection::connect_sqlite(&db.path).expect("connect");
    (db, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal");

    // NORMAL
    let sync: Synchronous = sql_query("PRAGMA synchronous;").get_result(conn).unwrap();
    assert_eq!(sync.synchronous, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn cpu(socket: &str, tdp: i64) -> Product {
    Product::new(format!("{socket} CPU"), Category::Cpu, 200.0, 3)
        .with_attr("socket", socket)
        .with_attr("tdp", tdp)
}

pub fn board(socket: &str, ram: &str, form: &str, pcie: i64) -> Product {
    Product::new(format!("{socket} board"), Category::Motherboard, 150.0, 2)
        .with_attr("socket", socket)
        .with_attr("ramType", ram)
        .with_attr("formFactor", form)
        .with_attr("pcieSlots", pcie)
}
