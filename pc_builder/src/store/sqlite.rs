//! SQLite-backed blob store (one row per key).

use chrono::{SecondsFormat, Utc};
use diesel::{OptionalExtension, SqliteConnection, insert_into, prelude::*};

use super::{KvStore, StoreError};
use crate::{
    db::{connection::connect_sqlite, migrate},
    schema::kv_store,
};

/// Key-value store in a SQLite file, migrated on open.
pub struct SqliteKv {
    conn: SqliteConnection,
}

impl SqliteKv {
    /// Migrate `database_url` to the current schema and connect.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        migrate::run_sqlite(database_url)?;
        let conn = connect_sqlite(database_url)?;
        tracing::debug!(database_url, "sqlite store opened");
        Ok(Self { conn })
    }

    /// Keys currently stored, sorted.
    pub fn keys(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(kv_store::table
            .select(kv_store::k)
            .order(kv_store::k.asc())
            .load(&mut self.conn)?)
    }
}

impl KvStore for SqliteKv {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(kv_store::table
            .filter(kv_store::k.eq(key))
            .select(kv_store::v)
            .first::<String>(&mut self.conn)
            .optional()?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        insert_into(kv_store::table)
            .values((
                kv_store::k.eq(key),
                kv_store::v.eq(value),
                kv_store::updated_at.eq(now.as_str()),
            ))
            .on_conflict(kv_store::k)
            .do_update()
            .set((kv_store::v.eq(value), kv_store::updated_at.eq(now.as_str())))
            .execute(&mut self.conn)?;
        Ok(())
    }
}
