//! Error types for the gateway crate.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ffgz_core::CoreError;
use ffgz_store::StoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the store layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A required field was missing or blank.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The request body, path or query is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            GatewayError::Store(e) => {
                tracing::error!(error = %e, "store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Validation(_) | GatewayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn gateway_error_status_codes_map_correctly() {
        let not_found = GatewayError::Store(StoreError::NotFound { table: "type_items", id: 3 });
        let resp = not_found.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bad_req = GatewayError::Validation(CoreError::MissingField { field: "model" });
        let resp = bad_req.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let malformed = GatewayError::InvalidRequest("expected an object".to_owned());
        assert_eq!(malformed.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn gateway_error_store_failure_returns_500() {
        let gw_err = GatewayError::Store(StoreError::Poisoned);
        let resp = gw_err.into_response();
        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "store failures other than not-found must map to 500"
        );
    }

    #[test]
    fn gateway_error_display_includes_message() {
        let err = GatewayError::Validation(CoreError::MissingField { field: "upper_model" });
        let msg = err.to_string();
        assert!(msg.contains("upper_model"), "Display must include the field name");
    }
}
