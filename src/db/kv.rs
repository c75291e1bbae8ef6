use super::db::Db;
use crate::libs::error::StoreResult;
use crate::libs::storage::KeyValueStore;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_VALUE: &str = "DELETE FROM kv WHERE key = ?1";

/// Key-value storage in a single SQLite table, used by the command-line
/// application so tasks survive between runs.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new() -> StoreResult<Self> {
        Ok(SqliteStorage { conn: Db::new()?.conn })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(SqliteStorage {
            conn: Db::open_in_memory()?.conn,
        })
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = self.conn.query_row(SELECT_VALUE, params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn.execute(DELETE_VALUE, params![key])?;
        Ok(())
    }
}
