use thiserror::Error;

/// Failures surfaced by the task store and its key-value backends.
///
/// Corrupt stored text is deliberately absent here: it degrades to an empty
/// collection tagged [`LoadSource::Corrupted`](crate::libs::store::LoadSource).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("task with id {0} already exists")]
    DuplicateId(String),

    #[error("logging {minutes} more minutes on task {id} exceeds the time limit")]
    TimeOverflow { id: String, minutes: u32 },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
