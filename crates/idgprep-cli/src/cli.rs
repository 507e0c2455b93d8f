//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Consolidate IDG target lists into one sorted, deduplicated TSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "idgprep", version)]
pub struct Cli {
    /// Input files to load, in order. When empty, inputs are discovered in
    /// the input directory.
    pub inputs: Vec<PathBuf>,

    /// Configuration file (TOML).
    #[arg(short, long, env = "IDGPREP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory searched for input files.
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Regex an input file name must fully match.
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Output file. Defaults to idg_target_list.tsv next to the executable.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write to a temporary file and rename it into place.
    #[arg(long)]
    pub atomic: bool,

    /// Load and consolidate, but do not write the output.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON instead of the console report.
    #[arg(long)]
    pub json: bool,

    /// Debug level logging.
    #[arg(short, long)]
    pub verbose: bool,
}
