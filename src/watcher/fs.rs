//! Directory watcher feeding the debouncer.

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::watcher::debounce::Debouncer;
use crate::watcher::WatchError;

/// A live watch on the definitions directory.
///
/// Dropping this stops the underlying notify watcher.
pub struct DirectoryWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    /// Attach to `dir` (non-recursively) and forward create/modify/delete
    /// events to `debouncer`.
    pub fn start(dir: &Path, debouncer: Debouncer) -> Result<Self, WatchError> {
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if !is_change(&event.kind) {
                        return;
                    }
                    for path in event.paths {
                        tracing::trace!(path = %path.display(), kind = ?event.kind, "Change event");
                        if !debouncer.add_event(path) {
                            tracing::warn!("Debouncer stopped; dropping change event");
                        }
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            }
        })
        .map_err(|source| WatchError::Setup {
            path: dir.to_path_buf(),
            source,
        })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Setup {
                path: dir.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %dir.display(), "Definitions watcher started");
        Ok(Self {
            path: dir.to_path_buf(),
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether an event kind should trigger a reload of the affected paths.
///
/// Creates, removals, content writes and renames count. Metadata-only
/// changes and access notifications do not.
pub fn is_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{
        AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode,
    };

    #[test]
    fn test_change_kinds() {
        assert!(is_change(&EventKind::Create(CreateKind::File)));
        assert!(is_change(&EventKind::Remove(RemoveKind::File)));
        assert!(is_change(&EventKind::Modify(ModifyKind::Data(DataChange::Content))));
        assert!(is_change(&EventKind::Modify(ModifyKind::Name(RenameMode::To))));
        assert!(is_change(&EventKind::Modify(ModifyKind::Any)));
    }

    #[test]
    fn test_ignored_kinds() {
        assert!(!is_change(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Permissions
        ))));
        assert!(!is_change(&EventKind::Access(AccessKind::Any)));
        assert!(!is_change(&EventKind::Any));
        assert!(!is_change(&EventKind::Other));
    }

    #[tokio::test]
    async fn test_start_missing_directory_fails() {
        let (debouncer, _task) = Debouncer::spawn(std::time::Duration::from_millis(10), |_: Vec<PathBuf>| {});
        let result = DirectoryWatcher::start(Path::new("/definitely/not/a/dir"), debouncer);
        assert!(matches!(result, Err(WatchError::Setup { .. })));
    }
}
