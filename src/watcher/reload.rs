//! Applying definition files to the route index.
//!
//! # Responsibilities
//! - Initial scan of the definitions directory, in file-name order
//! - Per-batch reload policy for debounced change events
//!
//! # Design Decisions
//! - Existence is checked at flush time, not event time, so a file created
//!   and deleted inside one window resolves to a removal
//! - A file that fails to parse keeps whatever table it contributed before
//! - Failed files are only retried when an event targets them again

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::definitions::{is_definition_file, parse_file, FileRouteTable};
use crate::observability::metrics;
use crate::routing::{FileId, RouteIndex};
use crate::watcher::debounce::BatchHandler;

/// The definitions directory could not be listed.
#[derive(Debug, Error)]
#[error("failed to read definitions directory {}: {source}", .path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// What happened to the files of one scan or batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Files whose table was put into the index.
    pub updated: usize,
    /// Files whose table was dropped because the file is gone.
    pub removed: usize,
    /// Files that failed to read or parse; their old table is kept.
    pub failed: usize,
    /// Paths that are not definition files.
    pub skipped: usize,
}

/// Load every definition file in `dir` into `index`.
///
/// Files are parsed in ascending file-name order. Parse failures are logged
/// and skipped; only failing to list the directory is an error.
pub fn load_directory(dir: &Path, index: &RouteIndex) -> Result<ReloadSummary, ScanError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ScanError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut summary = ReloadSummary::default();
    for path in paths {
        if !path.is_file() || !is_definition_file(&path) {
            summary.skipped += 1;
            continue;
        }

        match parse_file(&path) {
            Ok(table) => {
                tracing::info!(file = %path.display(), routes = table.len(), "Loaded definitions");
                log_routes(&path, &table);
                index.put(FileId::new(path), table);
                summary.updated += 1;
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping definition file");
                summary.failed += 1;
            }
        }
    }

    metrics::record_definition_files(index.len());
    Ok(summary)
}

fn log_routes(path: &Path, table: &FileRouteTable) {
    for (method, url, spec) in table.iter() {
        tracing::debug!(
            file = %path.display(),
            method,
            url,
            status = spec.status.as_u16(),
            "Route loaded"
        );
    }
}

/// Batch handler that re-parses changed files into the index.
#[derive(Debug, Clone)]
pub struct ReloadHandler {
    index: Arc<RouteIndex>,
}

impl ReloadHandler {
    pub fn new(index: Arc<RouteIndex>) -> Self {
        Self { index }
    }

    /// Apply one batch of changed paths.
    pub fn apply(&self, batch: &[PathBuf]) -> ReloadSummary {
        let mut summary = ReloadSummary::default();

        for path in batch {
            if !path.exists() {
                if self.index.remove(&FileId::from(path.as_path())) {
                    tracing::info!(file = %path.display(), "Removed routes for deleted file");
                }
                metrics::record_reload("removed");
                summary.removed += 1;
                continue;
            }

            if !path.is_file() || !is_definition_file(path) {
                metrics::record_reload("skipped");
                summary.skipped += 1;
                continue;
            }

            match parse_file(path) {
                Ok(table) => {
                    let routes = table.len();
                    log_routes(path, &table);
                    self.index.put(FileId::from(path.as_path()), table);
                    tracing::info!(file = %path.display(), routes, "Updated routes");
                    metrics::record_reload("updated");
                    summary.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        file = %path.display(),
                        error = %e,
                        "Error reloading definitions; keeping previous routes"
                    );
                    metrics::record_reload("failed");
                    summary.failed += 1;
                }
            }
        }

        metrics::record_definition_files(self.index.len());
        summary
    }
}

impl BatchHandler for ReloadHandler {
    fn handle(&self, batch: Vec<PathBuf>) {
        let summary = self.apply(&batch);
        tracing::debug!(
            updated = summary.updated,
            removed = summary.removed,
            failed = summary.failed,
            skipped = summary.skipped,
            files = self.index.len(),
            "Reload batch applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn record(method: &str, url: &str, code: u16, body: serde_json::Value) -> String {
        json!([{
            "request": {"url": url, "method": method},
            "response": {"code": code, "delay": 0, "body": body}
        }])
        .to_string()
    }

    #[test]
    fn test_load_directory_sorted_precedence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("02.json"), record("GET", "/users", 404, json!(null))).unwrap();
        fs::write(dir.path().join("01.json"), record("GET", "/users", 200, json!({"id": 1}))).unwrap();

        let index = RouteIndex::new();
        let summary = load_directory(dir.path(), &index).unwrap();

        assert_eq!(summary.updated, 2);
        let spec = index.resolve("GET", "/users").unwrap();
        assert_eq!(spec.status, StatusCode::NOT_FOUND);
        assert_eq!(spec.body, json!(null));
    }

    #[test]
    fn test_load_directory_skips_bad_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.json"), record("GET", "/ok", 200, json!("ok"))).unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        fs::write(dir.path().join("readme.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let index = RouteIndex::new();
        let summary = load_directory(dir.path(), &index).unwrap();

        assert_eq!(
            summary,
            ReloadSummary {
                updated: 1,
                removed: 0,
                failed: 1,
                skipped: 2
            }
        );
        assert_eq!(index.len(), 1);
        assert!(index.resolve("GET", "/ok").is_some());
    }

    #[test]
    fn test_load_directory_missing_dir() {
        let index = RouteIndex::new();
        let err = load_directory(Path::new("/definitely/not/a/dir"), &index).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/definitely/not/a/dir"));
    }

    #[test]
    fn test_apply_updates_changed_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.json");
        fs::write(&file, record("GET", "/v", 200, json!(1))).unwrap();

        let index = Arc::new(RouteIndex::new());
        load_directory(dir.path(), &index).unwrap();

        fs::write(&file, record("GET", "/v", 200, json!(2))).unwrap();
        let summary = ReloadHandler::new(index.clone()).apply(&[file]);

        assert_eq!(summary.updated, 1);
        assert_eq!(index.resolve("GET", "/v").unwrap().body, json!(2));
    }

    #[test]
    fn test_apply_removes_deleted_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("items.json");
        fs::write(&file, record("DELETE", "/items/1", 204, json!(null))).unwrap();

        let index = Arc::new(RouteIndex::new());
        load_directory(dir.path(), &index).unwrap();
        assert!(index.resolve("DELETE", "/items/1").is_some());

        fs::remove_file(&file).unwrap();
        let summary = ReloadHandler::new(index.clone()).apply(&[file]);

        assert_eq!(summary.removed, 1);
        assert!(index.resolve("DELETE", "/items/1").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_apply_keeps_old_table_on_parse_failure() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.json");
        fs::write(&file, record("GET", "/v", 200, json!("old"))).unwrap();

        let index = Arc::new(RouteIndex::new());
        load_directory(dir.path(), &index).unwrap();

        fs::write(&file, "[{\"request\":").unwrap();
        let summary = ReloadHandler::new(index.clone()).apply(&[file]);

        assert_eq!(summary.failed, 1);
        assert_eq!(index.resolve("GET", "/v").unwrap().body, json!("old"));
    }

    #[test]
    fn test_apply_ignores_non_definition_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "[]").unwrap();

        let index = Arc::new(RouteIndex::new());
        let summary = ReloadHandler::new(index.clone()).apply(&[file]);

        assert_eq!(summary.skipped, 1);
        assert!(index.is_empty());
    }

    #[test]
    fn test_apply_created_then_deleted_is_removal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ephemeral.json");

        let index = Arc::new(RouteIndex::new());
        let summary = ReloadHandler::new(index.clone()).apply(&[file]);

        assert_eq!(summary.removed, 1);
        assert!(index.is_empty());
    }

    #[test]
    fn test_failed_file_retried_on_own_event() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("b.json");
        let other = dir.path().join("a.json");
        fs::write(&broken, "oops").unwrap();
        fs::write(&other, record("GET", "/a", 200, json!("a"))).unwrap();

        let index = Arc::new(RouteIndex::new());
        load_directory(dir.path(), &index).unwrap();
        assert!(index.resolve("GET", "/b").is_none());

        // Fixing the file on disk is not enough; an unrelated event does
        // not rescan it.
        fs::write(&broken, record("GET", "/b", 200, json!("b"))).unwrap();
        let handler = ReloadHandler::new(index.clone());
        handler.apply(&[other]);
        assert!(index.resolve("GET", "/b").is_none());

        handler.apply(&[broken]);
        assert_eq!(index.resolve("GET", "/b").unwrap().body, json!("b"));
    }
}
