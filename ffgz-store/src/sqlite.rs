//! SQLite record store.
//!
//! One connection guarded by a mutex. Every call runs on tokio's blocking
//! pool so request handlers never stall the runtime on disk I/O. Record
//! writes and their audit entries share one transaction.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use ffgz_core::{
    DataItem, DataPatch, FreqRange, LogItem, NewData, NewType, RecordId, TypeItem, TypePatch,
};
use rusqlite::{params, params_from_iter, types::Type, Connection, OptionalExtension, Row};

use crate::backend::{RecordStore, LOG_PAGE_LIMIT};
use crate::schema::{self, DATA_TABLE, LOG_TABLE, TYPE_TABLE};
use crate::{StoreConfig, StoreError};

/// Stored timestamp layout. Fixed width, so text order is time order.
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Ids bound per `DELETE ... IN (...)` statement.
const DELETE_CHUNK: usize = 500;

/// [`RecordStore`] backed by a single SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database described by `config` and apply the
    /// schema.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the file cannot be opened or the
    /// schema cannot be applied.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = match &config.path {
            Some(path) => {
                let conn = Connection::open(path)?;
                conn.pragma_update_and_check(None, "journal_mode", "wal", |row| {
                    row.get::<_, String>(0)
                })?;
                tracing::info!(path = %path.display(), "opened record store");
                conn
            }
            None => {
                tracing::info!("opened in-memory record store");
                Connection::open_in_memory()?
            }
        };
        conn.busy_timeout(config.busy_timeout)?;
        schema::apply(&conn)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Open a private in-memory store.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the schema cannot be applied.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Run `op` against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            op(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_types(&self, filter: Option<String>) -> Result<Vec<TypeItem>, StoreError> {
        self.run(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, model, load, damp, kx, ky, kz, created_at FROM type_items
                 WHERE ?1 IS NULL OR instr(model, ?1) > 0
                 ORDER BY id DESC",
            )?;
            let rows = stmt.query_map(params![filter], type_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn create_type(&self, fields: NewType) -> Result<RecordId, StoreError> {
        self.run(move |conn| {
            let now = Utc::now();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO type_items (model, load, damp, kx, ky, kz, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    fields.model,
                    fields.load,
                    fields.damp,
                    fields.kx,
                    fields.ky,
                    fields.kz,
                    ts_to_text(now)
                ],
            )?;
            let id = tx.last_insert_rowid();
            append_entry(&tx, &format!("create type {}", fields.model), now)?;
            tx.commit()?;
            tracing::debug!(id, model = %fields.model, "created type record");
            Ok(id)
        })
        .await
    }

    async fn update_type(&self, id: RecordId, patch: TypePatch) -> Result<(), StoreError> {
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let mut item = tx
                .query_row(
                    "SELECT id, model, load, damp, kx, ky, kz, created_at FROM type_items
                     WHERE id = ?1",
                    params![id],
                    type_from_row,
                )
                .optional()?
                .ok_or(StoreError::NotFound { table: TYPE_TABLE, id })?;
            item.apply(patch);
            tx.execute(
                "UPDATE type_items SET model = ?2, load = ?3, damp = ?4, kx = ?5, ky = ?6, kz = ?7
                 WHERE id = ?1",
                params![id, item.model, item.load, item.damp, item.kx, item.ky, item.kz],
            )?;
            append_entry(&tx, &format!("update type {}", item.model), Utc::now())?;
            tx.commit()?;
            tracing::debug!(id, model = %item.model, "updated type record");
            Ok(())
        })
        .await
    }

    async fn delete_types(&self, ids: Vec<RecordId>) -> Result<usize, StoreError> {
        self.run(move |conn| delete_logged(conn, TYPE_TABLE, "types", &ids)).await
    }

    async fn list_data(&self, filter: Option<String>) -> Result<Vec<DataItem>, StoreError> {
        self.run(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, upper_model, lower_model, freq_min, freq_max, max_excit, created_at
                 FROM data_items
                 WHERE ?1 IS NULL OR instr(upper_model, ?1) > 0 OR instr(lower_model, ?1) > 0
                 ORDER BY id DESC",
            )?;
            let rows = stmt.query_map(params![filter], data_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn create_data(&self, fields: NewData) -> Result<RecordId, StoreError> {
        self.run(move |conn| {
            let now = Utc::now();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO data_items
                 (upper_model, lower_model, freq_min, freq_max, max_excit, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    fields.upper_model,
                    fields.lower_model,
                    fields.freq.min(),
                    fields.freq.max(),
                    fields.max_excit,
                    ts_to_text(now)
                ],
            )?;
            let id = tx.last_insert_rowid();
            let action =
                format!("create data {}/{}", fields.upper_model, fields.lower_model);
            append_entry(&tx, &action, now)?;
            tx.commit()?;
            tracing::debug!(id, %action, "created data record");
            Ok(id)
        })
        .await
    }

    async fn update_data(&self, id: RecordId, patch: DataPatch) -> Result<(), StoreError> {
        self.run(move |conn| {
            let tx = conn.transaction()?;
            let mut item = tx
                .query_row(
                    "SELECT id, upper_model, lower_model, freq_min, freq_max, max_excit, created_at
                     FROM data_items WHERE id = ?1",
                    params![id],
                    data_from_row,
                )
                .optional()?
                .ok_or(StoreError::NotFound { table: DATA_TABLE, id })?;
            item.apply(patch);
            tx.execute(
                "UPDATE data_items
                 SET upper_model = ?2, lower_model = ?3, freq_min = ?4, freq_max = ?5,
                     max_excit = ?6
                 WHERE id = ?1",
                params![
                    id,
                    item.upper_model,
                    item.lower_model,
                    item.freq.min(),
                    item.freq.max(),
                    item.max_excit
                ],
            )?;
            append_entry(&tx, &format!("update data {}", item.pair_label()), Utc::now())?;
            tx.commit()?;
            tracing::debug!(id, pair = %item.pair_label(), "updated data record");
            Ok(())
        })
        .await
    }

    async fn delete_data(&self, ids: Vec<RecordId>) -> Result<usize, StoreError> {
        self.run(move |conn| delete_logged(conn, DATA_TABLE, "data", &ids)).await
    }

    async fn recent_logs(&self) -> Result<Vec<LogItem>, StoreError> {
        self.run(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, ts, action FROM log_items ORDER BY ts DESC, id DESC LIMIT ?1",
            )?;
            let limit = i64::try_from(LOG_PAGE_LIMIT).unwrap_or(i64::MAX);
            let rows = stmt.query_map(params![limit], |row| {
                Ok(LogItem::new(row.get(0)?, ts_column(row, 1)?, row.get(2)?))
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await
    }

    async fn append_log(&self, action: String) -> Result<(), StoreError> {
        self.run(move |conn| append_entry(conn, &action, Utc::now())).await
    }
}

// ── Row helpers ──────────────────────────────────────────────────────────────

fn append_entry(conn: &Connection, action: &str, ts: DateTime<Utc>) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO log_items (ts, action) VALUES (?1, ?2)",
        params![ts_to_text(ts), action],
    )?;
    tracing::info!(table = LOG_TABLE, %action, "audit entry appended");
    Ok(())
}

/// Delete `ids` from `table` and log `delete {noun} count={n}`, all in one
/// transaction. An empty id list touches nothing.
fn delete_logged(
    conn: &mut Connection,
    table: &'static str,
    noun: &str,
    ids: &[RecordId],
) -> Result<usize, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let tx = conn.transaction()?;
    let mut deleted = 0;
    for chunk in ids.chunks(DELETE_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM {table} WHERE id IN ({placeholders})");
        deleted += tx.execute(&sql, params_from_iter(chunk))?;
    }
    append_entry(&tx, &format!("delete {noun} count={deleted}"), Utc::now())?;
    tx.commit()?;
    tracing::debug!(table, requested = ids.len(), deleted, "bulk delete");
    Ok(deleted)
}

fn type_from_row(row: &Row<'_>) -> rusqlite::Result<TypeItem> {
    let mut fields = NewType::named(row.get::<_, String>(1)?);
    fields.load = row.get(2)?;
    fields.damp = row.get(3)?;
    fields.kx = row.get(4)?;
    fields.ky = row.get(5)?;
    fields.kz = row.get(6)?;
    Ok(TypeItem::new(row.get(0)?, fields, ts_column(row, 7)?))
}

fn data_from_row(row: &Row<'_>) -> rusqlite::Result<DataItem> {
    let mut fields = NewData::pair(row.get::<_, String>(1)?, row.get::<_, String>(2)?);
    fields.freq = FreqRange::from_columns(row.get(3)?, row.get(4)?);
    fields.max_excit = row.get(5)?;
    Ok(DataItem::new(row.get(0)?, fields, ts_column(row, 6)?))
}

fn ts_to_text(ts: DateTime<Utc>) -> String {
    ts.format(TS_FORMAT).to_string()
}

fn ts_from_text(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").map(|naive| naive.and_utc())
}

fn ts_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    ts_from_text(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
