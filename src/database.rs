use crate::store::KeyValueStore;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed key-value medium: one `kv` table, keys and values both
/// text. The schema is ensured on open so a fresh file works on first run.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display();
        let conn =
            Connection::open(path).with_context(|| format!("Opening SQLite DB: {display}"))?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Opening in-memory SQLite DB")?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS kv (
          key   text PRIMARY KEY,
          value text NOT NULL
        );
        ",
    )
    .context("Creating kv table")?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Reading kv entry: {key}"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .with_context(|| format!("Writing kv entry: {key}"))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .with_context(|| format!("Deleting kv entry: {key}"))?;
        Ok(())
    }
}
