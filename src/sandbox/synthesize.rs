//! Single-dependency manifest synthesis
//!
//! The sandbox's package.json declares exactly one dependency and nothing
//! else. When the project's lock file pins that dependency, its descriptor is
//! written verbatim as the sandbox's npm-shrinkwrap.json.

use super::Sandbox;
use crate::error::SandboxError;
use crate::manifest::{PACKAGE_JSON, SHRINKWRAP_JSON};
use serde_json::{json, Value};
use std::fs;

/// Write the sandbox manifest and, if a lock descriptor is given, its lock file
pub fn write_manifest(
    sandbox: &Sandbox,
    name: &str,
    version: &str,
    lock: Option<&Value>,
) -> Result<(), SandboxError> {
    if let Some(descriptor) = lock {
        let path = sandbox.root().join(SHRINKWRAP_JSON);
        let content = serde_json::to_string(descriptor).map_err(|source| {
            SandboxError::Serialize {
                dependency: name.to_string(),
                source,
            }
        })?;
        fs::write(&path, content).map_err(|e| SandboxError::write(&path, e))?;
    }

    let path = sandbox.root().join(PACKAGE_JSON);
    let manifest = json!({ "dependencies": { name: version } });
    fs::write(&path, manifest.to_string()).map_err(|e| SandboxError::write(&path, e))?;

    Ok(())
}
