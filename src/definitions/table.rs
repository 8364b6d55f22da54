//! Per-file route tables.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

/// A canned response for one (method, path) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    /// Status code emitted to the client.
    pub status: StatusCode,
    /// Artificial latency applied before responding.
    pub delay: Duration,
    /// Body echoed back as JSON, verbatim.
    pub body: Value,
}

impl ResponseSpec {
    pub fn new(status: StatusCode, delay: Duration, body: Value) -> Self {
        Self { status, delay, body }
    }
}

/// All routes contributed by a single definition file.
///
/// Keyed by uppercased method, then by exact URL path. A reload always
/// replaces the whole table; entries are never merged across loads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRouteTable {
    routes: HashMap<String, HashMap<String, Arc<ResponseSpec>>>,
}

impl FileRouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any previous spec for the same pair.
    ///
    /// The method is uppercased; the path is stored as-is.
    pub fn insert(&mut self, method: &str, path: impl Into<String>, spec: ResponseSpec) {
        self.routes
            .entry(method.to_ascii_uppercase())
            .or_default()
            .insert(path.into(), Arc::new(spec));
    }

    /// Look up a route. `method` must already be uppercase.
    pub fn get(&self, method: &str, path: &str) -> Option<&Arc<ResponseSpec>> {
        self.routes.get(method)?.get(path)
    }

    /// Number of (method, path) pairs in this table.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(method, path, spec)` triples in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Arc<ResponseSpec>)> {
        self.routes.iter().flat_map(|(method, paths)| {
            paths
                .iter()
                .map(move |(path, spec)| (method.as_str(), path.as_str(), spec))
        })
    }
}
