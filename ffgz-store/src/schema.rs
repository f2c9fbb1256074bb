//! Table definitions, applied idempotently when a store is opened.

use rusqlite::Connection;

pub(crate) const TYPE_TABLE: &str = "type_items";
pub(crate) const DATA_TABLE: &str = "data_items";
pub(crate) const LOG_TABLE: &str = "log_items";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS type_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    model       TEXT NOT NULL,
    load        REAL,
    damp        REAL,
    kx          REAL,
    ky          REAL,
    kz          REAL,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS ix_type_items_model ON type_items(model);

CREATE TABLE IF NOT EXISTS data_items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    upper_model  TEXT NOT NULL,
    lower_model  TEXT NOT NULL,
    freq_min     INTEGER,
    freq_max     INTEGER,
    max_excit    REAL,
    created_at   TEXT NOT NULL,
    CHECK ((freq_min IS NULL) = (freq_max IS NULL))
);
CREATE INDEX IF NOT EXISTS ix_data_items_upper_model ON data_items(upper_model);
CREATE INDEX IF NOT EXISTS ix_data_items_lower_model ON data_items(lower_model);

CREATE TABLE IF NOT EXISTS log_items (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    ts      TEXT NOT NULL,
    action  TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS ix_log_items_ts ON log_items(ts);
";

/// Create any missing tables and indexes.
pub(crate) fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
