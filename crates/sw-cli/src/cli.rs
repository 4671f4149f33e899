//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sw_core::ScriptGroupKind;
use sw_db::ScriptEncoding;

/// Seedway - baseline and seed scripts for versioned database migrations
#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the baseline version and list the scripts of every group
    Plan(PlanArgs),

    /// Execute one script group against a DuckDB database
    Run(RunArgs),
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: PlanOutput,
}

/// Plan output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script group: default, default-data, baseline or baseline-data
    pub group: ScriptGroupKind,

    /// Override the DuckDB database path from the config
    #[arg(short, long)]
    pub database: Option<String>,

    /// Log failing statements and keep going
    #[arg(long)]
    pub continue_on_error: bool,

    /// Script file encoding
    #[arg(short, long, value_enum, default_value = "utf8")]
    pub encoding: EncodingArg,
}

/// Script encodings accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingArg {
    Utf8,
    Latin1,
}

impl From<EncodingArg> for ScriptEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => ScriptEncoding::Utf8,
            EncodingArg::Latin1 => ScriptEncoding::Latin1,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
