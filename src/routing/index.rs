//! The live route index.
//!
//! # Responsibilities
//! - Hold the current route table of every loaded definition file
//! - Swap or drop one file's table without touching the others
//! - Resolve (method, path) across files by precedence
//!
//! # Design Decisions
//! - BTreeMap keyed by FileId, so iteration order is precedence order
//! - Writers take the exclusive lock only for the entry swap
//! - Resolved specs are handed out as Arc so callers can sleep on the
//!   configured delay without holding the lock

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::definitions::{FileRouteTable, ResponseSpec};
use crate::routing::precedence::FileId;

/// Concurrency-safe aggregate of all loaded per-file route tables.
#[derive(Debug, Default)]
pub struct RouteIndex {
    files: RwLock<BTreeMap<FileId, FileRouteTable>>,
}

impl RouteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table contributed by `file`.
    pub fn put(&self, file: FileId, table: FileRouteTable) {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.insert(file, table);
    }

    /// Drop everything contributed by `file`. Returns false if it had nothing.
    pub fn remove(&self, file: &FileId) -> bool {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.remove(file).is_some()
    }

    /// Find the response for an exact (method, path) pair.
    ///
    /// Files are scanned from the greatest `FileId` down; the first file
    /// defining the pair wins. `method` is matched case-insensitively.
    pub fn resolve(&self, method: &str, path: &str) -> Option<Arc<ResponseSpec>> {
        let method = method.to_ascii_uppercase();
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);

        let spec = files
            .values()
            .rev()
            .find_map(|table| table.get(&method, path))
            .cloned();
        spec
    }

    /// Number of files currently contributing a table.
    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered files in ascending precedence.
    pub fn files(&self) -> Vec<FileId> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Total routes across all files, counting overridden ones.
    pub fn route_count(&self) -> usize {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(FileRouteTable::len)
            .sum()
    }
}
