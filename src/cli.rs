//! CLI argument parsing module for cost-of-modules

use crate::manifest::SelectionOptions;
use crate::package_manager::DEFAULT_NPM;
use clap::Parser;
use std::path::PathBuf;

/// Measure the isolated install cost of each dependency
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cost-of-modules",
    version,
    about = "Measure the isolated install time and size of each npm dependency",
    after_help = "Examples:\n  cost-of-modules                            measure all deps in the current project\n  cost-of-modules --production --no-optional skip both optional and dev dependencies"
)]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Dependency selection
    /// Skip devDependencies
    #[arg(long, visible_alias = "prod")]
    pub production: bool,

    /// Skip optionalDependencies
    #[arg(long)]
    pub no_optional: bool,

    /// Ignore npm-shrinkwrap.json
    #[arg(long)]
    pub no_shrinkwrap: bool,

    // Install options
    /// npm executable used for installs
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_NPM)]
    pub npm: String,

    /// Keep sandbox directories after the run for inspection
    #[arg(long)]
    pub keep_sandboxes: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - only the report is printed
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Dependency categories selected by the flags
    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            production: self.production,
            no_optional: self.no_optional,
        }
    }

    /// Whether the lock file should be consulted
    pub fn use_shrinkwrap(&self) -> bool {
        !self.no_shrinkwrap
    }

    /// Whether the progress bar and startup line are shown
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
