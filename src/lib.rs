//! JSON-driven mock HTTP server library.
//!
//! Definition files in one directory are parsed into per-file route
//! tables, merged into a [`RouteIndex`] with filename-based precedence, and
//! kept live by a debounced directory watcher.

pub mod cli;
pub mod config;
pub mod definitions;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod watcher;

pub use config::MockConfig;
pub use http::MockServer;
pub use lifecycle::{Application, Shutdown};
pub use routing::RouteIndex;
