//! Store configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default time SQLite waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives and how long writers wait for the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct StoreConfig {
    /// Database file. `None` opens a private in-memory database.
    pub path: Option<PathBuf>,

    /// SQLite busy timeout.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    /// A file-backed store at `path` with the default busy timeout.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), busy_timeout: DEFAULT_BUSY_TIMEOUT }
    }

    /// An in-memory store, discarded when the last handle drops.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { path: None, busy_timeout: DEFAULT_BUSY_TIMEOUT }
    }

    /// Override the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}
