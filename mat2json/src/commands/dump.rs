//! Main dump command.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use mat73_rs::load_variables_with;

use crate::cli::Args;
use crate::output;

/// Run the dump command.
pub fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();
    let selection = args.selection();

    info!(input = %args.input.display(), "decoding MAT file");

    let vars = load_variables_with(&args.input, selection.as_deref(), &args.decode_options())
        .with_context(|| format!("Failed to decode MAT file: {}", args.input.display()))?;

    if vars.is_empty() && !args.quiet {
        output::print_warning("No matching variables found in MAT file");
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&vars)
    } else {
        serde_json::to_string(&vars)
    }
    .context("Failed to serialize variables")?;

    match args.output {
        Some(ref path) => {
            fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;

            if !args.quiet {
                output::print_success(
                    &format!("Wrote {} to {}", args.input.display(), path.display()),
                    false,
                );
                output::print_kv("Variables", &output::format_number(vars.len()), 2);
                output::print_kv("JSON size", &output::format_size(json.len() as u64), 2);
                output::print_kv(
                    "Processing time",
                    &format!("{:.2?}", start_time.elapsed()),
                    2,
                );
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}
