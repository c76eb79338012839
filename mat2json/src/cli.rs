//! Command-line argument definitions using clap derive macros.

use clap::Parser;
use std::path::PathBuf;

use mat73_rs::{DecodeOptions, DEFAULT_MAX_DEPTH};

/// Dump MATLAB .mat file variables as JSON.
///
/// mat2json decodes numeric arrays, character arrays, structs and cell
/// arrays from v7.3 (HDF5) MAT files, and numeric arrays from Level 5 MAT
/// files, and writes them as one JSON object keyed by variable name.
#[derive(Parser, Debug)]
#[command(name = "mat2json")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    /// Input .mat file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output .json file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    // ========================================================================
    // Mode Selection
    // ========================================================================
    /// List variables in the MAT file and exit
    #[arg(short, long)]
    pub list: bool,

    // ========================================================================
    // Variable Selection
    // ========================================================================
    /// Variable to dump (repeatable; default: all variables)
    ///
    /// Names not present in the file are ignored.
    #[arg(short = 'n', long = "var", value_name = "NAME")]
    pub vars: Vec<String>,

    // ========================================================================
    // Decoding
    // ========================================================================
    /// Maximum nesting depth of structs and cell arrays
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    // ========================================================================
    // Output Control
    // ========================================================================
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Show detailed progress and information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force overwrite of existing output file
    #[arg(long)]
    pub force: bool,
}

impl Args {
    /// Validate argument combinations.
    pub fn validate(&self) -> Result<(), String> {
        // Quiet and verbose are mutually exclusive
        if self.quiet && self.verbose {
            return Err("Cannot use both --quiet and --verbose".to_string());
        }

        // Check input file exists
        if !self.input.exists() {
            return Err(format!("Input file not found: {}", self.input.display()));
        }

        if self.max_depth == 0 {
            return Err("--max-depth must be at least 1".to_string());
        }

        // List mode doesn't write output
        if self.list {
            return Ok(());
        }

        // Check output doesn't exist (unless --force)
        if let Some(ref output) = self.output {
            if output.exists() && !self.force {
                return Err(format!(
                    "Output file already exists: {} (use --force to overwrite)",
                    output.display()
                ));
            }
        }

        Ok(())
    }

    /// Selected variable names, or `None` for all of them.
    pub fn selection(&self) -> Option<Vec<&str>> {
        if self.vars.is_empty() {
            None
        } else {
            Some(self.vars.iter().map(String::as_str).collect())
        }
    }

    /// Decode options from the command line.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::new().max_depth(self.max_depth)
    }
}

/// Example usage shown in --help.
const EXAMPLES: &str = r#"
EXAMPLES:
    # List variables in a MAT file
    mat2json --list session.mat

    # Dump every variable to stdout
    mat2json session.mat

    # Dump selected variables, pretty-printed, to a file
    mat2json session.mat -n spikes -n meta --pretty -o session.json

    # Show decode progress
    mat2json -v session.mat

    # Fine-grained logging
    RUST_LOG=mat73_rs=trace mat2json session.mat
"#;
