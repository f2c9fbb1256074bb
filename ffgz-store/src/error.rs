//! Error types for the store crate.

use ffgz_core::RecordId;

/// Errors that can occur while reading or writing records.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No row with this id exists in the table.
    #[error("{table} row {id} not found")]
    NotFound { table: &'static str, id: RecordId },

    /// The connection mutex was poisoned by a panicking writer.
    #[error("store connection lock poisoned")]
    Poisoned,

    /// The blocking task running the query panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),

    /// Underlying SQLite error.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// `true` when the error means the target row does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
