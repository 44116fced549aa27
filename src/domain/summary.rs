//! Aggregate report over all measurement records
//!
//! Totals are plain sums: each dependency's transitive closure was installed
//! on its own, so overlapping packages are counted once per dependency.

use super::MeasurementRecord;
use std::time::Duration;

/// Records ranked by install time plus summed totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    /// Records sorted by duration, slowest first
    pub records: Vec<MeasurementRecord>,
    /// Sum of all install durations
    pub total_duration: Duration,
    /// Sum of all installed sizes in bytes
    pub total_size: u64,
}

impl AggregateReport {
    /// Builds the report from records in enumeration order
    pub fn new(mut records: Vec<MeasurementRecord>) -> Self {
        // stable: equal durations keep enumeration order
        records.sort_by(|a, b| b.duration.cmp(&a.duration));

        let total_duration = records.iter().map(|r| r.duration).sum();
        let total_size = records.iter().map(|r| r.size).sum();

        Self {
            records,
            total_duration,
            total_size,
        }
    }

    /// Returns the number of measured dependencies
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was measured
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
