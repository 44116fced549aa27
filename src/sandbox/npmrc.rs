//! Sandbox `.npmrc` seeding

use super::Sandbox;
use crate::error::SandboxError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// npm configuration filename
pub const NPMRC: &str = ".npmrc";

/// Give the sandbox its own `.npmrc` with a sandbox-local cache
///
/// A missing or uncopyable project `.npmrc` is never fatal: the sandbox falls
/// back to an empty file before the cache line is appended.
pub fn seed_npmrc(project_dir: &Path, sandbox: &Sandbox) -> Result<(), SandboxError> {
    seed_npmrc_with(project_dir, sandbox, |from, to| fs::copy(from, to))
}

fn seed_npmrc_with<C>(project_dir: &Path, sandbox: &Sandbox, copy: C) -> Result<(), SandboxError>
where
    C: FnOnce(&Path, &Path) -> io::Result<u64>,
{
    let source = project_dir.join(NPMRC);
    let target = sandbox.npmrc_path();

    let copied = source.is_file()
        && match copy(&source, &target) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    source = %source.display(),
                    error = %e,
                    "failed to copy .npmrc, using an empty one"
                );
                false
            }
        };

    if !copied {
        fs::write(&target, "").map_err(|e| SandboxError::write(&target, e))?;
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(&target)
        .map_err(|e| SandboxError::write(&target, e))?;
    write!(file, "\ncache={}", sandbox.cache_dir().display())
        .map_err(|e| SandboxError::write(&target, e))?;

    Ok(())
}
