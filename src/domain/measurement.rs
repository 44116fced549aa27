//! Per-dependency measurement record

use std::time::Duration;

/// Result of benchmarking one dependency's isolated install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    /// Dependency name
    pub name: String,
    /// Wall-clock duration of the install command
    pub duration: Duration,
    /// Recursive byte size of the installed node_modules tree
    pub size: u64,
    /// Entries in node_modules other than the dependency itself
    pub sub_dependencies: usize,
}

impl MeasurementRecord {
    /// Creates a new record
    pub fn new(
        name: impl Into<String>,
        duration: Duration,
        size: u64,
        sub_dependencies: usize,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            size,
            sub_dependencies,
        }
    }
}
