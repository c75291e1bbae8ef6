use crate::libs::data_storage::DataStorage;
use crate::libs::error::{StoreError, StoreResult};
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "duckdone.db";

const SCHEMA_KV: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens `duckdone.db` in the application data directory.
    pub fn new() -> StoreResult<Db> {
        let db_file_path = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let conn = Connection::open(db_file_path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Db> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Db> {
        conn.execute(SCHEMA_KV, [])?;
        Ok(Db { conn })
    }
}
