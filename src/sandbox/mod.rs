//! Isolated install sandboxes
//!
//! Every dependency is installed into its own freshly created temporary
//! directory with a private `.npmrc` and npm cache, so no install shares
//! configuration or cache state with the host or with another sandbox.
//!
//! Sandboxes are owned by a [`SandboxRegistry`]. Dropping the registry removes
//! every sandbox it created, on success, on error and on interrupt alike,
//! unless it was asked to keep them for inspection.

mod npmrc;
mod synthesize;

pub use npmrc::{seed_npmrc, NPMRC};
pub use synthesize::write_manifest;

use crate::error::SandboxError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of every sandbox directory name
const SANDBOX_PREFIX: &str = "cost-of-modules-";

/// A directory holding exactly one dependency's install attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Wraps an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sandbox root, used as the working directory of the install
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Private npm configuration file
    pub fn npmrc_path(&self) -> PathBuf {
        self.root.join(NPMRC)
    }

    /// Private npm cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(".cache")
    }

    /// Directory the install populates
    pub fn node_modules(&self) -> PathBuf {
        self.root.join("node_modules")
    }
}

/// Owner of every sandbox allocated during a run
#[derive(Debug)]
pub struct SandboxRegistry {
    /// Directories created so far, in allocation order
    dirs: Vec<TempDir>,
    /// Persist directories instead of removing them on drop
    keep: bool,
}

impl SandboxRegistry {
    /// Create an empty registry
    pub fn new(keep: bool) -> Self {
        Self {
            dirs: Vec::new(),
            keep,
        }
    }

    /// Allocate a new, empty, uniquely named sandbox and seed its configuration
    ///
    /// The project's `.npmrc` is copied when present; otherwise the sandbox
    /// gets an empty one. Either way the cache is pointed into the sandbox.
    pub fn provision(&mut self, project_dir: &Path) -> Result<Sandbox, SandboxError> {
        let dir = tempfile::Builder::new()
            .prefix(SANDBOX_PREFIX)
            .tempdir()
            .map_err(|source| SandboxError::Create { source })?;
        let sandbox = Sandbox::new(dir.path());
        self.dirs.push(dir);

        tracing::debug!(root = %sandbox.root().display(), "sandbox created");
        seed_npmrc(project_dir, &sandbox)?;

        Ok(sandbox)
    }

    /// Paths of all sandboxes allocated so far
    pub fn paths(&self) -> Vec<PathBuf> {
        self.dirs.iter().map(|d| d.path().to_path_buf()).collect()
    }

    /// Number of sandboxes allocated so far
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Returns true if no sandbox was allocated
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Remove (or persist, when keeping) every sandbox allocated so far
    pub fn release(&mut self) {
        for dir in self.dirs.drain(..) {
            if self.keep {
                let path = dir.keep();
                tracing::info!(path = %path.display(), "sandbox kept");
            } else {
                let path = dir.path().to_path_buf();
                if let Err(e) = dir.close() {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove sandbox");
                }
            }
        }
    }
}

impl Drop for SandboxRegistry {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sandbox_paths() {
        let sandbox = Sandbox::new("/tmp/cost-of-modules-abc");
        assert_eq!(
            sandbox.npmrc_path(),
            PathBuf::from("/tmp/cost-of-modules-abc/.npmrc")
        );
        assert_eq!(
            sandbox.cache_dir(),
            PathBuf::from("/tmp/cost-of-modules-abc/.cache")
        );
        assert_eq!(
            sandbox.node_modules(),
            PathBuf::from("/tmp/cost-of-modules-abc/node_modules")
        );
    }

    #[test]
    fn test_provision_creates_distinct_directories() {
        let project = TempDir::new().unwrap();
        let mut registry = SandboxRegistry::new(false);

        let roots: Vec<PathBuf> = (0..5)
            .map(|_| registry.provision(project.path()).unwrap().root().to_path_buf())
            .collect();

        let unique: HashSet<&PathBuf> = roots.iter().collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(registry.len(), 5);
        for root in &roots {
            assert!(root.is_dir());
            let name = root.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with(SANDBOX_PREFIX));
        }
    }

    #[test]
    fn test_provision_seeds_npmrc() {
        let project = TempDir::new().unwrap();
        let mut registry = SandboxRegistry::new(false);

        let sandbox = registry.provision(project.path()).unwrap();
        assert!(sandbox.npmrc_path().is_file());
    }

    #[test]
    fn test_drop_removes_sandboxes() {
        let project = TempDir::new().unwrap();
        let mut registry = SandboxRegistry::new(false);
        let root = registry.provision(project.path()).unwrap().root().to_path_buf();
        assert!(root.exists());

        drop(registry);
        assert!(!root.exists());
    }

    #[test]
    fn test_keep_persists_sandboxes() {
        let project = TempDir::new().unwrap();
        let mut registry = SandboxRegistry::new(true);
        let root = registry.provision(project.path()).unwrap().root().to_path_buf();

        drop(registry);
        assert!(root.exists());
        std::fs::remove_dir_all(&root).unwrap();
    }
}
