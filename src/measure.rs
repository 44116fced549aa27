//! Installed footprint measurement
//!
//! Runs only after a successful install. Size is the sum of the `lstat`
//! lengths of every entry under `node_modules`, the root and the directories
//! included (symlinks are not followed); the sub-dependency count is the
//! number of top-level entries minus the measured dependency itself.

use crate::error::MeasurementError;
use std::path::Path;
use walkdir::WalkDir;

/// Size and fan-out of an installed dependency tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Total bytes on disk
    pub size: u64,
    /// Additional packages installed next to the dependency
    pub sub_dependencies: usize,
}

/// Measure the tree rooted at `node_modules`
pub fn measure(node_modules: &Path) -> Result<Footprint, MeasurementError> {
    let size = dir_size(node_modules)?;
    let sub_dependencies = count_entries(node_modules)?.saturating_sub(1);

    tracing::debug!(
        path = %node_modules.display(),
        size,
        sub_dependencies,
        "measured install"
    );
    Ok(Footprint {
        size,
        sub_dependencies,
    })
}

/// Recursive byte size of a directory, counting directory entries too
pub fn dir_size(path: &Path) -> Result<u64, MeasurementError> {
    let mut total = 0;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            MeasurementError::io(at, e.into())
        })?;
        let metadata = entry
            .metadata()
            .map_err(|e| MeasurementError::io(entry.path(), e.into()))?;
        total += metadata.len();
    }
    Ok(total)
}

fn count_entries(path: &Path) -> Result<usize, MeasurementError> {
    let entries = std::fs::read_dir(path).map_err(|e| MeasurementError::io(path, e))?;
    let mut count = 0;
    for entry in entries {
        entry.map_err(|e| MeasurementError::io(path, e))?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(path: &Path, bytes: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; bytes]).unwrap();
    }

    /// Sum of the lstat lengths of the given directories
    fn dir_entries_len(dirs: &[std::path::PathBuf]) -> u64 {
        dirs.iter()
            .map(|dir| fs::symlink_metadata(dir).unwrap().len())
            .sum()
    }

    #[test]
    fn test_dir_size_sums_nested_files() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("a/index.js"), 100);
        write_file(&dir.path().join("a/lib/util.js"), 250);
        write_file(&dir.path().join("b/package.json"), 50);

        let dirs = [
            dir.path().to_path_buf(),
            dir.path().join("a"),
            dir.path().join("a/lib"),
            dir.path().join("b"),
        ];
        assert_eq!(dir_size(dir.path()).unwrap(), 400 + dir_entries_len(&dirs));
    }

    #[test]
    fn test_dir_size_counts_directory_entries() {
        let dir = TempDir::new().unwrap();
        let mut dirs = vec![dir.path().to_path_buf()];
        for name in ["a", "b", "c"] {
            write_file(&dir.path().join(name).join("lib/index.js"), 1);
            dirs.push(dir.path().join(name));
            dirs.push(dir.path().join(name).join("lib"));
        }

        let size = dir_size(dir.path()).unwrap();
        assert_eq!(size, 3 + dir_entries_len(&dirs));
    }

    #[test]
    fn test_measure_counts_sub_dependencies() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write_file(&node_modules.join("express/index.js"), 10);
        write_file(&node_modules.join("body-parser/index.js"), 20);
        write_file(&node_modules.join("debug/index.js"), 30);

        let footprint = measure(&node_modules).unwrap();
        let dirs = [
            node_modules.clone(),
            node_modules.join("express"),
            node_modules.join("body-parser"),
            node_modules.join("debug"),
        ];
        assert_eq!(footprint.size, 60 + dir_entries_len(&dirs));
        assert_eq!(footprint.sub_dependencies, 2);
    }

    #[test]
    fn test_measure_single_package() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write_file(&node_modules.join("lodash/lodash.js"), 5);

        let footprint = measure(&node_modules).unwrap();
        assert_eq!(footprint.sub_dependencies, 0);
    }

    #[test]
    fn test_measure_empty_directory_does_not_underflow() {
        let dir = TempDir::new().unwrap();
        let footprint = measure(dir.path()).unwrap();
        assert_eq!(footprint.size, dir_entries_len(&[dir.path().to_path_buf()]));
        assert_eq!(footprint.sub_dependencies, 0);
    }

    #[test]
    fn test_measure_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = measure(&dir.path().join("node_modules")).unwrap_err();
        assert!(matches!(err, MeasurementError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write_file(&node_modules.join("tool/cli.js"), 1000);
        fs::create_dir_all(node_modules.join(".bin")).unwrap();
        std::os::unix::fs::symlink("../tool/cli.js", node_modules.join(".bin/tool")).unwrap();

        let size = dir_size(&node_modules).unwrap();
        let link_len = "../tool/cli.js".len() as u64;
        let dirs = [
            node_modules.clone(),
            node_modules.join("tool"),
            node_modules.join(".bin"),
        ];
        assert_eq!(size, 1000 + link_len + dir_entries_len(&dirs));
    }
}
