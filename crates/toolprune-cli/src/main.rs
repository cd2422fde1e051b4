//! toolprune CLI
//!
//! Comments out MCP tool registrations that are not on an allow-list.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use commands::FilterOptions;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(?cli, "parsed arguments");

    let options = FilterOptions {
        source: cli.source,
        allow_list: cli.allow_list,
        dry_run: cli.dry_run,
        strict: cli.strict,
        json: cli.json,
    };
    commands::run_filter(&options)?;
    Ok(())
}
