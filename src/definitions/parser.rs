//! Definition file parsing.
//!
//! # Responsibilities
//! - Deserialize a JSON array of request/response records
//! - Normalize methods to uppercase, keep URLs verbatim
//! - Convert millisecond delays into durations
//! - Reject status codes that cannot be sent as a final response
//!
//! # Design Decisions
//! - Within one file the last record for a (method, url) pair wins
//! - `delay` and `body` may be omitted (0 and `null`)
//! - A record with a blank method is skipped, not fatal to the file
//! - No I/O happens outside `parse_file`, so parsing never runs under a lock

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::definitions::table::{FileRouteTable, ResponseSpec};

/// Extension that marks a file as a definition file.
pub const DEFINITION_EXTENSION: &str = "json";

/// A definition file could not be turned into a route table.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed definition: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record {index}: invalid status code {code}")]
    InvalidStatus { index: usize, code: u16 },
}

#[derive(Debug, Deserialize)]
struct DefinitionRecord {
    request: RequestDef,
    response: ResponseDef,
}

#[derive(Debug, Deserialize)]
struct RequestDef {
    url: String,
    method: String,
}

#[derive(Debug, Deserialize)]
struct ResponseDef {
    code: u16,
    #[serde(default)]
    delay: u64,
    #[serde(default)]
    body: Value,
}

/// Parse the contents of one definition file.
pub fn parse_definitions(bytes: &[u8]) -> Result<FileRouteTable, DefinitionError> {
    let records: Vec<DefinitionRecord> = serde_json::from_slice(bytes)?;

    let mut table = FileRouteTable::new();
    for (index, record) in records.into_iter().enumerate() {
        let status = final_status(record.response.code)
            .ok_or(DefinitionError::InvalidStatus {
                index,
                code: record.response.code,
            })?;

        let method = record.request.method.trim();
        if method.is_empty() {
            tracing::warn!(index, url = %record.request.url, "Skipping record with empty method");
            continue;
        }

        table.insert(
            method,
            record.request.url,
            ResponseSpec::new(
                status,
                Duration::from_millis(record.response.delay),
                record.response.body,
            ),
        );
    }

    Ok(table)
}

/// Status codes a server may answer with; 1xx codes are interim only.
fn final_status(code: u16) -> Option<StatusCode> {
    StatusCode::from_u16(code)
        .ok()
        .filter(|status| !status.is_informational())
}

/// Read and parse a definition file from disk.
pub fn parse_file(path: &Path) -> Result<FileRouteTable, DefinitionError> {
    let bytes = std::fs::read(path).map_err(|source| DefinitionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definitions(&bytes)
}

/// Whether `path` names a definition file (by extension only).
pub fn is_definition_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == DEFINITION_EXTENSION)
        .unwrap_or(false)
}
