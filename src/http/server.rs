//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all mock handler
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;

use axum::{body::Body, http::Request, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::dispatch::{mock_handler, AppState};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::routing::RouteIndex;

/// HTTP server for the mock definitions.
pub struct MockServer {
    router: Router,
}

impl MockServer {
    /// Create a server reading from `index`.
    pub fn new(index: Arc<RouteIndex>) -> Self {
        let router = Self::build_router(AppState::new(index));
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(mock_handler))
            .route("/{*path}", any(mock_handler))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id(req),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::X_REQUEST_ID;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_generated() {
        let server = MockServer::new(Arc::new(RouteIndex::new()));
        let res = server
            .router()
            .oneshot(Request::builder().uri("/x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = res.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let server = MockServer::new(Arc::new(RouteIndex::new()));
        let res = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/x")
                    .header(X_REQUEST_ID, "client-id-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.headers().get(X_REQUEST_ID).unwrap(), "client-id-1");
    }
}
