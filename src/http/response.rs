//! Response construction.
//!
//! # Design Decisions
//! - Matched bodies are re-serialized from the stored JSON value
//! - Misses always get the same fixed JSON diagnostic

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::definitions::ResponseSpec;

/// The fixed 404 returned when no definition matches.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

/// Render a matched spec: configured status, body as JSON.
pub fn from_spec(spec: &ResponseSpec) -> Response {
    (spec.status, Json(&spec.body)).into_response()
}
