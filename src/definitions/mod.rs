//! Mock definition subsystem.
//!
//! # Data Flow
//! ```text
//! *.json file bytes
//!     → parser.rs (deserialize records, normalize methods, validate codes)
//!     → table.rs (FileRouteTable: METHOD → path → ResponseSpec)
//!     → handed off to the route index
//! ```
//!
//! # Design Decisions
//! - Parsing holds no shared state; one call produces one complete table
//! - A failed parse yields an error, never a partial table
//! - Response specs are immutable and shared via Arc

pub mod parser;
pub mod table;

pub use parser::{is_definition_file, parse_definitions, parse_file, DefinitionError};
pub use table::{FileRouteTable, ResponseSpec};
