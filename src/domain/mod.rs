//! Core domain models for cost-of-modules
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency sets selected from the project manifest
//! - Per-dependency measurement records
//! - The aggregate report handed to the formatters

mod dependency;
mod measurement;
mod summary;

pub use dependency::{DependencySelection, DependencySet};
pub use measurement::MeasurementRecord;
pub use summary::AggregateReport;
