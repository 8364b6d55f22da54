//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID assigned or propagated)
//!     → dispatch.rs (index lookup, per-request delay)
//!     → response.rs (status + JSON body, or 404)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;

pub use dispatch::AppState;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::MockServer;
