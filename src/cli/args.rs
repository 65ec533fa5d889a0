//! Command line argument parsing for the Simdex CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simdex - a data-parallel similarity search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "simdex")]
#[command(about = "A data-parallel similarity search engine over inverted indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Simdex Contributors")]
#[command(long_about = None)]
pub struct SimdexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SimdexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Match queries against a record corpus
    Search(SearchArgs),

    /// Show statistics for a record corpus
    Stats(StatsArgs),

    /// Validate a policy configuration descriptor
    Validate(ValidateArgs),

    /// Generate a synthetic corpus or query file
    Generate(GenerateArgs),
}

/// Arguments for the search command
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Path to the record corpus file
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Path to the query file
    #[arg(value_name = "QUERY_FILE")]
    pub queries: PathBuf,

    /// Maximum allowed distance per candidate
    #[arg(short, long, default_value_t = 0)]
    pub radius: u32,

    /// Maximum number of results per query
    #[arg(short = 'k', long, default_value_t = 10)]
    pub top_k: usize,

    /// Pruning hint in [0, 1]
    #[arg(short, long, default_value_t = 0.0)]
    pub selectivity: f32,

    /// Scan window width for the single-range policy
    #[arg(long, default_value_t = 64)]
    pub query_range: u32,

    /// Policy descriptor file (JSON); overrides the policy flags
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Thread pool size (defaults to the number of CPU cores)
    #[arg(long, env = "SIMDEX_THREADS")]
    pub threads: Option<usize>,

    /// Read at most this many records from the corpus
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Read at most this many queries
    #[arg(long)]
    pub max_queries: Option<usize>,
}

/// Arguments for the stats command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the record corpus file
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Read at most this many records
    #[arg(long)]
    pub max_records: Option<usize>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Policy descriptor file (JSON)
    #[arg(value_name = "CONFIG_FILE")]
    pub config: PathBuf,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Output file path
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Number of records to generate
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub records: usize,

    /// Dimension values per record
    #[arg(short, long, default_value_t = 8)]
    pub dims: usize,

    /// Dimension values are drawn from [0, max_value)
    #[arg(long, default_value_t = 1024)]
    pub max_value: u32,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
