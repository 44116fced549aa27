//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading or parsing the project's package.json
//! - SandboxError: Issues creating or populating a sandbox directory
//! - InstallError: The package manager could not be run or exited non-zero
//! - MeasurementError: The installed tree could not be sized

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Sandbox provisioning errors
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// Package manager install errors
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Footprint measurement errors
    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    /// The run was interrupted by the operator
    #[error("interrupted{}", format_interrupted(.dependency))]
    Interrupted { dependency: Option<String> },
}

impl AppError {
    /// Creates a new Interrupted error
    pub fn interrupted(dependency: Option<&str>) -> Self {
        AppError::Interrupted {
            dependency: dependency.map(str::to_string),
        }
    }

    /// Exit code the process should terminate with for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}

/// Errors related to the project manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// package.json not found
    #[error("No package.json in {}", .dir.display())]
    NotFound { dir: PathBuf },

    /// Failed to read package.json
    #[error("failed to read manifest file {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {}: {message}", .path.display())]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors raised while preparing a sandbox
#[derive(Error, Debug)]
pub enum SandboxError {
    /// Temporary directory could not be created
    #[error("failed to create sandbox directory: {source}")]
    Create {
        #[source]
        source: std::io::Error,
    },

    /// A file inside the sandbox could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lock descriptor could not be serialized
    #[error("failed to serialize lock entry for '{dependency}': {source}")]
    Serialize {
        dependency: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the install step
#[derive(Error, Debug)]
pub enum InstallError {
    /// The package manager could not be started
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager exited unsuccessfully
    #[error("install of '{dependency}' failed ({status}){}", format_stderr(.stderr))]
    Failed {
        dependency: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Errors raised while sizing an installed tree
#[derive(Error, Debug)]
pub enum MeasurementError {
    /// A directory could not be walked or listed
    #[error("failed to measure {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_interrupted(dependency: &Option<String>) -> String {
    match dependency {
        Some(name) => format!(" while measuring '{}'", name),
        None => String::new(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(dir: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { dir: dir.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl SandboxError {
    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SandboxError::Write {
            path: path.into(),
            source,
        }
    }
}

impl InstallError {
    /// Creates a new Spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        InstallError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(
        dependency: impl Into<String>,
        status: ExitStatus,
        stderr: impl Into<String>,
    ) -> Self {
        InstallError::Failed {
            dependency: dependency.into(),
            status,
            stderr: stderr.into(),
        }
    }
}

impl MeasurementError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeasurementError::Io {
            path: path.into(),
            source,
        }
    }
}
