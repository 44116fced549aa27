//! Project input files
//!
//! This module provides functionality to:
//! - Read package.json and select dependencies per the CLI flags
//! - Read per-dependency lock descriptors from npm-shrinkwrap.json

mod lockfile;
mod package_json;

pub use lockfile::{LockEntries, SHRINKWRAP_JSON};
pub use package_json::{read_dependencies, select_dependencies, SelectionOptions, PACKAGE_JSON};
