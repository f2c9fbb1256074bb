//! Record store abstraction trait.
//!
//! Handlers depend on this trait, not on SQLite, so the gateway can be
//! exercised against any backend.

use async_trait::async_trait;
use ffgz_core::{DataItem, DataPatch, LogItem, NewData, NewType, RecordId, TypeItem, TypePatch};

use crate::StoreError;

/// Maximum number of audit entries returned by [`RecordStore::recent_logs`].
pub const LOG_PAGE_LIMIT: usize = 100;

/// Persistent storage for type records, data records and the audit log.
///
/// Every mutating call on type and data records appends exactly one audit
/// entry together with the write. Implementations must make the pair
/// atomic: if the audit entry cannot be written, the record write is not
/// kept either.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List type records, newest first. `filter` is a case-sensitive
    /// substring matched against `model`.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the query fails.
    async fn list_types(&self, filter: Option<String>) -> Result<Vec<TypeItem>, StoreError>;

    /// Insert a type record and log `create type {model}`. Returns the new id.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if either insert fails.
    async fn create_type(&self, fields: NewType) -> Result<RecordId, StoreError>;

    /// Apply a partial update and log `update type {model}`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no row has this id.
    async fn update_type(&self, id: RecordId, patch: TypePatch) -> Result<(), StoreError>;

    /// Delete every type record whose id is listed. Returns the number of
    /// rows removed. An empty list is a no-op and writes no audit entry.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the delete fails.
    async fn delete_types(&self, ids: Vec<RecordId>) -> Result<usize, StoreError>;

    /// List data records, newest first. `filter` is matched against either
    /// model name.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the query fails.
    async fn list_data(&self, filter: Option<String>) -> Result<Vec<DataItem>, StoreError>;

    /// Insert a data record and log `create data {upper}/{lower}`.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if either insert fails.
    async fn create_data(&self, fields: NewData) -> Result<RecordId, StoreError>;

    /// Apply a partial update and log `update data {upper}/{lower}`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no row has this id.
    async fn update_data(&self, id: RecordId, patch: DataPatch) -> Result<(), StoreError>;

    /// Delete every data record whose id is listed. Same contract as
    /// [`RecordStore::delete_types`].
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the delete fails.
    async fn delete_data(&self, ids: Vec<RecordId>) -> Result<usize, StoreError>;

    /// The [`LOG_PAGE_LIMIT`] most recent audit entries, newest first.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the query fails.
    async fn recent_logs(&self) -> Result<Vec<LogItem>, StoreError>;

    /// Append a free-text audit entry stamped with the server clock.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the insert fails.
    async fn append_log(&self, action: String) -> Result<(), StoreError>;
}
