//! npm-shrinkwrap.json reader
//!
//! The lock file is optional. Anything that prevents reading it yields an
//! empty set of lock entries so dependencies resolve freely.

use serde_json::{Map, Value};
use std::path::Path;

/// Lock filename looked up in the project directory and written to sandboxes
pub const SHRINKWRAP_JSON: &str = "npm-shrinkwrap.json";

/// Per-dependency lock descriptors taken from the project's lock file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockEntries {
    entries: Map<String, Value>,
}

impl LockEntries {
    /// Creates an empty set of lock entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds lock entries from parsed lock file content
    pub fn from_lockfile(json: &Value) -> Self {
        let entries = json
            .get("dependencies")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();
        Self { entries }
    }

    /// Reads lock entries from `dir`, or returns none when disabled or unusable
    pub fn read(dir: &Path, enabled: bool) -> Self {
        if !enabled {
            tracing::debug!("lock file ignored");
            return Self::new();
        }

        let path = dir.join(SHRINKWRAP_JSON);
        if !path.is_file() {
            return Self::new();
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(json) => {
                let entries = Self::from_lockfile(&json);
                tracing::debug!(
                    path = %path.display(),
                    entries = entries.len(),
                    "lock file loaded"
                );
                entries
            }
            Err(message) => {
                tracing::warn!(path = %path.display(), %message, "ignoring unreadable lock file");
                Self::new()
            }
        }
    }

    /// Returns the lock descriptor recorded for a dependency
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_shrinkwrap(dir: &Path, content: &str) {
        fs::write(dir.join(SHRINKWRAP_JSON), content).unwrap();
    }

    #[test]
    fn test_from_lockfile() {
        let lock = json!({
            "name": "app",
            "dependencies": {
                "lodash": { "version": "4.17.21", "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz" }
            }
        });
        let entries = LockEntries::from_lockfile(&lock);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("lodash").unwrap()["version"], "4.17.21");
        assert!(entries.get("express").is_none());
    }

    #[test]
    fn test_from_lockfile_without_dependencies() {
        let entries = LockEntries::from_lockfile(&json!({ "lockfileVersion": 3 }));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(LockEntries::read(dir.path(), true).is_empty());
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = TempDir::new().unwrap();
        write_shrinkwrap(dir.path(), "{ broken");
        assert!(LockEntries::read(dir.path(), true).is_empty());
    }

    #[test]
    fn test_read_disabled() {
        let dir = TempDir::new().unwrap();
        write_shrinkwrap(dir.path(), r#"{ "dependencies": { "a": { "version": "1.0.0" } } }"#);

        assert!(LockEntries::read(dir.path(), false).is_empty());
        assert_eq!(LockEntries::read(dir.path(), true).len(), 1);
    }

    #[test]
    fn test_read_directory_named_like_lockfile() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(SHRINKWRAP_JSON)).unwrap();
        assert!(LockEntries::read(dir.path(), true).is_empty());
    }
}
