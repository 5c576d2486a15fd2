//! SQLite connection helpers.
//!
//! [`connect_sqlite`] opens a connection tuned for the single-table blob
//! store: WAL journaling, `synchronous=NORMAL` (safe under WAL) and a 5000ms
//! busy_timeout so a second `pc-builder` process waits instead of failing.

use anyhow::Context;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};

/// PRAGMAs applied to every store connection.
pub const STORE_PRAGMAS: &str =
    "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA busy_timeout=5000;";

/// Open a SQLite connection and apply [`STORE_PRAGMAS`].
pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)
        .with_context(|| format!("open sqlite database {database_url}"))?;
    conn.batch_execute(STORE_PRAGMAS)
        .with_context(|| format!("configure sqlite database {database_url}"))?;
    Ok(conn)
}
