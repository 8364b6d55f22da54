//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → index.rs (read lock, scan files highest-precedence first)
//!     → precedence.rs (FileId ordering decides who wins)
//!     → Return: Arc<ResponseSpec> or None
//!
//! Reloads:
//!     FileRouteTable (parsed outside the lock)
//!     → index.rs put/remove (write lock, single entry swap)
//! ```
//!
//! # Design Decisions
//! - One RwLock over the whole file map; readers never see a torn table
//! - Collisions resolved by file ordering only, never by update recency
//! - Exact matching: no patterns, no trailing-slash normalization
//! - O(files) per lookup (acceptable for hand-maintained definition sets)

pub mod index;
pub mod precedence;

pub use index::RouteIndex;
pub use precedence::FileId;
