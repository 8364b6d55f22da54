//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (file, method, path) instead of formatted strings
//! - Request ID attached to every response for correlation
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
