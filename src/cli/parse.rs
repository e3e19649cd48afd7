//! CLI parse: clap types for cosmos-emulator. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cosmos-emulator - ephemeral Azure Cosmos DB emulator containers
#[derive(Parser)]
#[command(name = "cosmos-emulator")]
#[command(about = "Start and inspect ephemeral Azure Cosmos DB emulator containers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (settings are read from <workspace>/config)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file path (overrides default settings loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved launch request as JSON without starting anything
    Plan {
        #[command(flatten)]
        overrides: BuilderOverrides,
    },
    /// Start an emulator, wait for readiness and print its connection string
    Up {
        #[command(flatten)]
        overrides: BuilderOverrides,

        /// Leave the container running and exit once it is ready
        #[arg(long)]
        detach: bool,
    },
    /// Print the resolved settings as TOML
    Config,
}

/// Builder overrides applied after settings
#[derive(Args, Debug, Clone, Default)]
pub struct BuilderOverrides {
    /// Database name
    #[arg(long)]
    pub database: Option<String>,

    /// Emulator port (also published on the host)
    #[arg(long)]
    pub port: Option<u16>,

    /// Number of partitions
    #[arg(long)]
    pub partition_count: Option<u32>,

    /// Container name
    #[arg(long)]
    pub name: Option<String>,

    /// Readiness timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}
