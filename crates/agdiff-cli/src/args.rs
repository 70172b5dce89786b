use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agdiff")]
#[command(about = "Compare a candidate agent run against a reference run", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $AGDIFF_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two execution summaries of the same use case
    Compare(CompareArgs),

    /// Compare every <case>/candidate.json + reference.json pair under a directory
    Batch(BatchArgs),

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args)]
pub struct CompareArgs {
    pub candidate: PathBuf,

    pub reference: PathBuf,

    /// Name of the use case (defaults to the candidate file's directory name)
    #[arg(long)]
    pub use_case: Option<String>,

    /// Also write the markdown report to this path
    #[arg(long)]
    pub markdown: Option<PathBuf>,

    /// Ask the reasoning service for a root cause when the candidate lacks tools
    #[arg(long)]
    pub analyze: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    pub dir: PathBuf,

    /// Write one markdown report per case into this directory
    #[arg(long)]
    pub markdown_dir: Option<PathBuf>,

    /// Run one batch root-cause analysis over all cases with tool gaps
    #[arg(long)]
    pub analyze: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        #[arg(long)]
        force: bool,
    },
}
