//! Seedway CLI - inspect and run database initialization scripts

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{plan, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Plan(args) => plan::execute(args, &cli.global),
        cli::Commands::Run(args) => run::execute(args, &cli.global),
    }
}
