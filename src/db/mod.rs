//! SQLite persistence for the command-line application.
//!
//! The database holds a single `kv` table of text keys and text values,
//! which [`kv::SqliteStorage`] exposes as a
//! [`KeyValueStore`](crate::libs::storage::KeyValueStore).
//!
//! ```rust,no_run
//! use duckdone::db::kv::SqliteStorage;
//! use duckdone::libs::store::TaskStore;
//!
//! let store = TaskStore::new(SqliteStorage::new()?);
//! let tasks = store.get_all()?;
//! # Ok::<(), duckdone::libs::error::StoreError>(())
//! ```

/// Connection management and schema.
pub mod db;

/// Key-value table access.
pub mod kv;
