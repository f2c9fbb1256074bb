//! Record storage for the FFGZ record service.
//!
//! Persists isolator type records, paired data records and the audit log in
//! SQLite, behind the [`RecordStore`] trait the HTTP layer depends on.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod config;
pub mod error;
mod schema;
pub mod sqlite;

pub use backend::{RecordStore, LOG_PAGE_LIMIT};
pub use config::StoreConfig;
pub use error::StoreError;
pub use sqlite::SqliteStore;
