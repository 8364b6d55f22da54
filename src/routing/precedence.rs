//! Precedence between definition files.
//!
//! When several files define the same (method, path), the file with the
//! greatest [`FileId`] wins. `FileId` ordering is a plain byte-wise
//! comparison of the path, so `99-override.json` beats `01-base.json` and
//! `B.json` loses to `a.json` (uppercase sorts first).

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies a definition file and orders it for conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(PathBuf);

impl FileId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Ord for FileId {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl PartialOrd for FileId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for FileId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for FileId {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

/// The precedence comparator: `Greater` means `a` overrides `b`.
///
/// Compares the raw OS strings rather than path components, so the result
/// is the same lexicographic order used to sort the directory at startup.
pub fn compare(a: &Path, b: &Path) -> Ordering {
    a.as_os_str().cmp(b.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_name_sorts_higher() {
        let base = FileId::new("/api/01-base.json");
        let over = FileId::new("/api/99-override.json");
        assert!(over > base);
    }

    #[test]
    fn test_numeric_prefixes_compare_lexicographically() {
        // "10" < "9" byte-wise; no natural sorting.
        assert!(FileId::new("/api/9.json") > FileId::new("/api/10.json"));
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        assert_eq!(
            compare(Path::new("/api/B.json"), Path::new("/api/a.json")),
            Ordering::Less
        );
    }

    #[test]
    fn test_byte_order_not_component_order() {
        // Component-wise ordering would put "a" before "a.b"; byte order
        // compares '/' (0x2f) against '.' (0x2e).
        assert_eq!(
            compare(Path::new("/api/a/x.json"), Path::new("/api/a.b.json")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sorting_ids() {
        let mut ids = vec![
            FileId::new("/api/02.json"),
            FileId::new("/api/01.json"),
            FileId::new("/api/10.json"),
        ];
        ids.sort();
        let names: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["/api/01.json", "/api/02.json", "/api/10.json"]);
    }
}
