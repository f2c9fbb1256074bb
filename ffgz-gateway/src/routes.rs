//! Axum route handlers for the FFGZ record API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use ffgz_core::{
    preview, AppendLogBody, BulkDeleteBody, CreateDataBody, CreateTypeBody, DataItem, LogItem,
    RecordId, TypeItem, UpdateDataBody, UpdateTypeBody,
};
use ffgz_store::RecordStore;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::GatewayError,
    extract::{ApiJson, ApiPath, ApiQuery},
};

/// Largest band the preview endpoint will render.
pub const MAX_PREVIEW_POINTS: u64 = 100_000;

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<dyn RecordStore>;

// ── Request / response types ──────────────────────────────────────────────────

/// `?q=` search parameter shared by both list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed keyword, or `None` when blank.
    #[must_use]
    pub fn keyword(&self) -> Option<String> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()).map(str::to_owned)
    }
}

/// `?min=&max=` for the preview endpoint. Kept as text so that a malformed
/// bound falls back to its default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

impl PreviewQuery {
    /// The requested band with defaults filled in.
    #[must_use]
    pub fn band(&self) -> (i64, i64) {
        let bound = |text: &Option<String>, default: i64| {
            text.as_deref().and_then(|t| t.trim().parse().ok()).unwrap_or(default)
        };
        (bound(&self.min, preview::DEFAULT_MIN), bound(&self.max, preview::DEFAULT_MAX))
    }
}

/// One row of `GET /api/types`.
#[derive(Debug, Serialize)]
pub struct TypeRow {
    pub id: RecordId,
    pub model: String,
    pub load: Option<f64>,
    pub damp: Option<f64>,
    pub kx: Option<f64>,
    pub ky: Option<f64>,
    pub kz: Option<f64>,
}

impl From<TypeItem> for TypeRow {
    fn from(item: TypeItem) -> Self {
        Self {
            id: item.id,
            model: item.model,
            load: item.load,
            damp: item.damp,
            kx: item.kx,
            ky: item.ky,
            kz: item.kz,
        }
    }
}

/// One row of `GET /api/data`. The band is rendered as `"min-max"` text.
#[derive(Debug, Serialize)]
pub struct DataRow {
    pub id: RecordId,
    pub upper_model: String,
    pub lower_model: String,
    pub freq_range: String,
    pub max_excit: Option<f64>,
}

impl From<DataItem> for DataRow {
    fn from(item: DataItem) -> Self {
        Self {
            id: item.id,
            freq_range: item.freq.to_string(),
            upper_model: item.upper_model,
            lower_model: item.lower_model,
            max_excit: item.max_excit,
        }
    }
}

/// One entry of `GET /api/logs`.
#[derive(Debug, Serialize)]
pub struct LogRow {
    pub ts: String,
    pub action: String,
}

impl From<LogItem> for LogRow {
    fn from(item: LogItem) -> Self {
        Self { ts: item.ts_text(), action: item.action }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub ok: bool,
    pub deleted: usize,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given record store.
pub fn create_router(store: Store) -> Router {
    let api = Router::new()
        .route("/types", get(list_types).post(create_type))
        .route("/types/bulk_delete", post(delete_types))
        .route("/types/{id}", put(update_type))
        .route("/data", get(list_data).post(create_data))
        .route("/data/bulk_delete", post(delete_data))
        .route("/data/{id}", put(update_data))
        .route("/logs", get(list_logs).post(append_log))
        .route("/preview", get(preview_curve));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /api/types?q=`: list type records, newest first.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the query fails.
pub async fn list_types(
    State(store): State<Store>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<TypeRow>>, GatewayError> {
    let rows = store.list_types(query.keyword()).await?;
    Ok(Json(rows.into_iter().map(TypeRow::from).collect()))
}

/// `POST /api/types`: add a type record.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if `model` is missing or blank.
pub async fn create_type(
    State(store): State<Store>,
    ApiJson(body): ApiJson<CreateTypeBody>,
) -> Result<impl IntoResponse, GatewayError> {
    let fields = body.validate()?;
    let id = store.create_type(fields).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { ok: true, id })))
}

/// `PUT /api/types/{id}`: overwrite the fields present in the body.
///
/// # Errors
/// Returns [`GatewayError::Store`] with a not-found cause (404) if no type
/// record has this id.
pub async fn update_type(
    State(store): State<Store>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(body): ApiJson<UpdateTypeBody>,
) -> Result<Json<OkResponse>, GatewayError> {
    store.update_type(id, body.into_patch()).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// `POST /api/types/bulk_delete`: delete every listed type record.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the delete fails.
pub async fn delete_types(
    State(store): State<Store>,
    ApiJson(body): ApiJson<BulkDeleteBody>,
) -> Result<Json<DeletedResponse>, GatewayError> {
    let deleted = store.delete_types(body.ids).await?;
    Ok(Json(DeletedResponse { ok: true, deleted }))
}

/// `GET /api/data?q=`: list data records, newest first.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the query fails.
pub async fn list_data(
    State(store): State<Store>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<DataRow>>, GatewayError> {
    let rows = store.list_data(query.keyword()).await?;
    Ok(Json(rows.into_iter().map(DataRow::from).collect()))
}

/// `POST /api/data`: add a data record.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if either model name is missing.
pub async fn create_data(
    State(store): State<Store>,
    ApiJson(body): ApiJson<CreateDataBody>,
) -> Result<impl IntoResponse, GatewayError> {
    let fields = body.validate()?;
    let id = store.create_data(fields).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { ok: true, id })))
}

/// `PUT /api/data/{id}`: overwrite the fields present in the body.
///
/// # Errors
/// Returns [`GatewayError::Store`] with a not-found cause (404) if no data
/// record has this id.
pub async fn update_data(
    State(store): State<Store>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(body): ApiJson<UpdateDataBody>,
) -> Result<Json<OkResponse>, GatewayError> {
    store.update_data(id, body.into_patch()).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// `POST /api/data/bulk_delete`: delete every listed data record.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the delete fails.
pub async fn delete_data(
    State(store): State<Store>,
    ApiJson(body): ApiJson<BulkDeleteBody>,
) -> Result<Json<DeletedResponse>, GatewayError> {
    let deleted = store.delete_data(body.ids).await?;
    Ok(Json(DeletedResponse { ok: true, deleted }))
}

/// `GET /api/logs`: the most recent audit entries, newest first.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the query fails.
pub async fn list_logs(State(store): State<Store>) -> Result<Json<Vec<LogRow>>, GatewayError> {
    let rows = store.recent_logs().await?;
    Ok(Json(rows.into_iter().map(LogRow::from).collect()))
}

/// `POST /api/logs`: append a free-text audit entry.
///
/// An empty body, a `null` body and a body without `action` all append an
/// empty entry.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is not a JSON object
/// of the expected shape.
pub async fn append_log(
    State(store): State<Store>,
    body: Bytes,
) -> Result<Json<OkResponse>, GatewayError> {
    let action = parse_log_body(&body)?.into_action();
    store.append_log(action).await?;
    Ok(Json(OkResponse { ok: true }))
}

fn parse_log_body(body: &[u8]) -> Result<AppendLogBody, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AppendLogBody::default());
    }
    serde_json::from_slice::<Option<AppendLogBody>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| GatewayError::InvalidRequest(format!("malformed log body: {e}")))
}

/// `GET /api/preview?min=&max=`: placeholder response curve.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the band exceeds
/// [`MAX_PREVIEW_POINTS`].
pub async fn preview_curve(
    ApiQuery(query): ApiQuery<PreviewQuery>,
) -> Result<Json<preview::PreviewCurve>, GatewayError> {
    let (min, max) = query.band();
    let points = preview::point_count(min, max);
    if points > MAX_PREVIEW_POINTS {
        return Err(GatewayError::InvalidRequest(format!(
            "preview band {min}-{max} has {points} points; limit is {MAX_PREVIEW_POINTS}"
        )));
    }
    Ok(Json(preview::preview(min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use ffgz_store::SqliteStore;
    use tower::ServiceExt;

    fn test_store() -> Store {
        match SqliteStore::in_memory() {
            Ok(s) => Arc::new(s),
            Err(e) => panic!("failed to open store: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let app = create_router(test_store());
        let req = match Request::builder().uri("/health").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn search_query_blank_keyword_means_no_filter() {
        let query = SearchQuery { q: Some("   ".to_owned()) };
        assert_eq!(query.keyword(), None);
        let query = SearchQuery { q: Some(" GZ ".to_owned()) };
        assert_eq!(query.keyword().as_deref(), Some("GZ"));
    }

    #[test]
    fn preview_query_malformed_bounds_use_defaults() {
        let query = PreviewQuery { min: Some("abc".to_owned()), max: Some(String::new()) };
        assert_eq!(query.band(), (preview::DEFAULT_MIN, preview::DEFAULT_MAX));
        let query = PreviewQuery { min: Some("20".to_owned()), max: None };
        assert_eq!(query.band(), (20, preview::DEFAULT_MAX));
    }

    #[test]
    fn log_body_variants_default_to_empty_action() {
        for body in [&b""[..], &b"  "[..], &b"null"[..], &b"{}"[..]] {
            let parsed = match parse_log_body(body) {
                Ok(p) => p,
                Err(e) => panic!("body {body:?} should parse: {e}"),
            };
            assert_eq!(parsed.into_action(), "");
        }
        assert!(parse_log_body(b"[1, 2]").is_err(), "non-object body must be rejected");
    }

    #[test]
    fn data_row_serializes_band_as_text() {
        let mut fields = ffgz_core::NewData::pair("U", "L");
        fields.freq = ffgz_core::FreqRange::new(10, 20);
        let row = DataRow::from(DataItem::new(1, fields, chrono::Utc::now()));
        let json = match serde_json::to_value(&row) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json["freq_range"], "10-20");
        assert!(json.get("freq_min").is_none(), "stored bounds must not leak");
        assert!(json.get("created_at").is_none(), "created_at is not part of the row");
    }
}
