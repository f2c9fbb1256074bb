//! Extractors that report malformed input as [`GatewayError`], so every
//! client error carries the same JSON body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::GatewayError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(GatewayError))]
pub struct ApiQuery<T>(pub T);
