//! Hot reload of definition files.
//!
//! # Data Flow
//! ```text
//! notify backend thread
//!     → fs.rs (filter create/modify/delete, forward paths)
//!     → debounce.rs (coalesce until the directory is quiet)
//!     → reload.rs (stat, re-parse, put/remove per file)
//!     → RouteIndex
//! ```
//!
//! # Design Decisions
//! - Pure debounce: a steady stream of events postpones the flush
//! - One batch is applied at a time, on the blocking pool
//! - Failing to attach the watcher is fatal; per-event errors are logged

pub mod debounce;
pub mod fs;
pub mod reload;

use std::path::PathBuf;

use thiserror::Error;

pub use debounce::{BatchHandler, Debouncer};
pub use fs::DirectoryWatcher;
pub use reload::{load_directory, ReloadHandler, ReloadSummary, ScanError};

/// The definitions directory could not be watched.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to watch {}: {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}
