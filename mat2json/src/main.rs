//! mat2json - Dump MATLAB .mat file variables as JSON.
//!
//! This tool decodes v7.3 (HDF5) and Level 5 MAT files, including structs,
//! cell arrays and character arrays, and prints the result as a JSON object
//! keyed by variable name.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::Args;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(&args);

    // Run the appropriate command
    if let Err(e) = run(args) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` directives refine the level from -v/-q.
fn init_logging(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Main dispatch function.
fn run(args: Args) -> Result<()> {
    // Validate arguments
    args.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    // Dispatch to appropriate command
    if args.list {
        commands::list::run(&args)
    } else {
        commands::dump::run(&args)
    }
}
