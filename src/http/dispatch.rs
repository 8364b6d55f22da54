//! Request dispatch against the route index.
//!
//! # Responsibilities
//! - Resolve every inbound (method, path) against the live index
//! - Apply the configured delay to the matched request only
//! - Emit the configured status and body, or the fixed 404
//!
//! # Design Decisions
//! - The index lock is released before any delay (specs are Arc-shared)
//! - The query string is not part of the match key
//! - Paths are matched percent-decoded; undecodable paths match as sent

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
};

use crate::http::response;
use crate::observability::metrics;
use crate::routing::RouteIndex;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub index: Arc<RouteIndex>,
}

impl AppState {
    pub fn new(index: Arc<RouteIndex>) -> Self {
        Self { index }
    }
}

/// Catch-all handler serving mock definitions.
pub async fn mock_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let start = Instant::now();
    let path = decode_path(uri.path());
    let path = path.as_ref();

    let Some(spec) = state.index.resolve(method.as_str(), path) else {
        tracing::debug!(method = %method, path = %path, "No definition matched");
        metrics::record_request(&method, 404, false, start);
        return response::not_found();
    };

    if !spec.delay.is_zero() {
        tracing::debug!(method = %method, path = %path, delay = ?spec.delay, "Delaying response");
        tokio::time::sleep(spec.delay).await;
    }

    metrics::record_request(&method, spec.status.as_u16(), true, start);
    response::from_spec(&spec)
}

/// Percent-decode a request path, keeping the raw form if the result is
/// not valid UTF-8.
fn decode_path(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
