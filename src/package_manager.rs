//! Package manager integration for running sandboxed installs
//!
//! This module provides:
//! - The `InstallRunner` seam the scheduler drives
//! - `NpmRunner`, which runs `npm install` inside a sandbox and times it

use crate::error::InstallError;
use crate::sandbox::Sandbox;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Default package manager executable
pub const DEFAULT_NPM: &str = "npm";

/// Result of a successful install
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// Time between spawning the package manager and its exit
    pub duration: Duration,
}

impl InstallOutcome {
    /// Create an outcome for an install that took `duration`
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

/// Trait for running a package manager install inside a sandbox
#[async_trait]
pub trait InstallRunner: Send + Sync {
    /// Install the sandbox's single dependency
    ///
    /// `dependency` is only used for diagnostics; the sandbox manifest decides
    /// what gets installed.
    async fn install(
        &self,
        dependency: &str,
        sandbox: &Sandbox,
    ) -> Result<InstallOutcome, InstallError>;
}

/// Runner that executes the real npm binary
#[derive(Debug, Clone)]
pub struct NpmRunner {
    /// Executable name or path
    program: String,
}

impl NpmRunner {
    /// Create a runner for the given npm executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments passed to the executable
    fn install_args(&self) -> [&'static str; 1] {
        ["install"]
    }

    /// Build the install command for a sandbox
    ///
    /// Arguments are passed as an array, never through a shell, and the
    /// environment is inherited so registry credentials and proxies apply.
    fn command(&self, sandbox: &Sandbox) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(self.install_args())
            .current_dir(sandbox.root())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl InstallRunner for NpmRunner {
    async fn install(
        &self,
        dependency: &str,
        sandbox: &Sandbox,
    ) -> Result<InstallOutcome, InstallError> {
        let mut command = self.command(sandbox);
        tracing::debug!(
            dependency,
            program = %self.program,
            cwd = %sandbox.root().display(),
            "running install"
        );

        let start = Instant::now();
        let output = command
            .output()
            .await
            .map_err(|e| InstallError::spawn(&self.program, e))?;
        let duration = start.elapsed();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(InstallError::failed(dependency, output.status, stderr));
        }

        tracing::debug!(dependency, elapsed_ms = duration.as_millis() as u64, "install finished");
        Ok(InstallOutcome::new(duration))
    }
}
