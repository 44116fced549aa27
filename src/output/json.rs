//! JSON output formatter for machine processing

use crate::domain::{AggregateReport, MeasurementRecord};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput {
    /// Measurements, slowest first
    dependencies: Vec<JsonMeasurement>,
    /// Totals over all measurements
    #[serde(flatten)]
    totals: JsonTotals,
}

/// JSON representation of one measurement
#[derive(Serialize)]
struct JsonMeasurement {
    /// Dependency name
    name: String,
    /// Install time in milliseconds
    time_ms: u64,
    /// Installed size in bytes
    size: u64,
    /// Additional packages installed
    sub_dependencies: usize,
}

/// JSON representation of the totals
#[derive(Serialize)]
struct JsonTotals {
    /// Sum of install times in milliseconds
    total_time_ms: u64,
    /// Sum of installed sizes in bytes
    total_size: u64,
    /// Always false: shared packages are counted once per dependency
    deduplicated: bool,
}

impl From<&MeasurementRecord> for JsonMeasurement {
    fn from(record: &MeasurementRecord) -> Self {
        Self {
            name: record.name.clone(),
            time_ms: record.duration.as_millis() as u64,
            size: record.size,
            sub_dependencies: record.sub_dependencies,
        }
    }
}

impl From<&AggregateReport> for JsonTotals {
    fn from(report: &AggregateReport) -> Self {
        Self {
            total_time_ms: report.total_duration.as_millis() as u64,
            total_size: report.total_size,
            deduplicated: false,
        }
    }
}

fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &AggregateReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dependencies: report.records.iter().map(JsonMeasurement::from).collect(),
            totals: JsonTotals::from(report),
        };
        write_json(&output, writer)
    }
}
