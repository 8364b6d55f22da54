//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.toml (optional)
//!     → loader.rs (read & deserialize, defaults when absent)
//!     → validation.rs (semantic checks)
//!     → CLI overrides (main.rs)
//!     → MockConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; only definitions hot-reload
//! - All fields have defaults so an empty or missing file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ListenerConfig, LogFormat, MockConfig, ObservabilityConfig, WatcherConfig};
pub use validation::{validate_config, ValidationError};
