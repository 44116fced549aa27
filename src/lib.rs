//! cost-of-modules - isolated install cost measurement library
//!
//! This library installs each top-level dependency of a project on its own,
//! in a fresh sandbox, and measures:
//! - Install time
//! - Installed size on disk
//! - Number of transitively installed packages

pub mod cli;
pub mod domain;
pub mod error;
pub mod interrupt;
pub mod manifest;
pub mod measure;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod sandbox;
pub mod scheduler;
