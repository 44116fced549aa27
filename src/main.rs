//! cost-of-modules - find out which dependencies are slow or heavy to install
//!
//! Every dependency declared in package.json is installed alone in a fresh
//! sandbox, then ranked by install time in a table with size and
//! sub-dependency counts.

use clap::Parser;
use cost_of_modules::cli::CliArgs;
use cost_of_modules::domain::AggregateReport;
use cost_of_modules::error::AppError;
use cost_of_modules::interrupt::Interrupt;
use cost_of_modules::manifest::{read_dependencies, LockEntries};
use cost_of_modules::output::{create_formatter, OutputConfig};
use cost_of_modules::package_manager::NpmRunner;
use cost_of_modules::sandbox::SandboxRegistry;
use cost_of_modules::scheduler::Scheduler;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<AppError>()
                .map(AppError::exit_code)
                .unwrap_or(1);
            eprintln!("Error: {:?}", e);
            ExitCode::from(code)
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the level picked by --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut interrupt = Interrupt::listen();

    if args.verbose {
        eprintln!("cost-of-modules v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Project: {}", args.path.display());
        eprintln!("npm: {}", args.npm);
    }

    let selection =
        read_dependencies(&args.path, args.selection_options()).map_err(AppError::from)?;

    if !args.quiet {
        if args.json {
            eprintln!("{}", selection.start_message());
        } else {
            println!("{}", selection.start_message());
        }
    }

    let locks = LockEntries::read(&args.path, args.use_shrinkwrap());

    // Sandboxes are released when the registry drops, whichever way run() exits
    let mut sandboxes = SandboxRegistry::new(args.keep_sandboxes);
    let runner = NpmRunner::new(&args.npm);
    let mut scheduler = Scheduler::new(&runner, &args.path, args.show_progress());

    let records = scheduler
        .run(&selection.dependencies, &locks, &mut sandboxes, &mut interrupt)
        .await?;
    interrupt.check(None)?;
    let report = AggregateReport::new(records);

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.no_color));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
