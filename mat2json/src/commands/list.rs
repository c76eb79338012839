//! List variables command (--list mode).

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use mat73_rs::{list_variable_names, MatFormat};

use crate::cli::Args;
use crate::output;

/// Run the list command.
pub fn run(args: &Args) -> Result<()> {
    let format = MatFormat::detect(&args.input)
        .with_context(|| format!("Failed to read MAT header: {}", args.input.display()))?;
    info!(input = %args.input.display(), ?format, "listing variables");

    let names = list_variable_names(&args.input)
        .with_context(|| format!("Failed to open MAT file: {}", args.input.display()))?;

    if names.is_empty() {
        output::print_warning("No variables found in MAT file");
        return Ok(());
    }

    let encoding = match format {
        MatFormat::Level5 => "Level 5",
        MatFormat::V73 => "v7.3",
    };
    println!(
        "{}",
        format!("Variables in '{}' ({}):", args.input.display(), encoding).bold()
    );
    println!();

    for name in &names {
        println!("  {}", name);
    }

    // Print summary
    println!();
    println!("{} variables found", output::format_number(names.len()));

    Ok(())
}
