//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Source file rewritten when `--source` is not given.
pub const DEFAULT_SOURCE: &str = "src/index.ts";

/// Comment out MCP tool registrations that are not on the allow-list
///
/// Scans the source for `server.tool(...)` blocks, keeps those whose name is
/// allowed, and comments out the rest in place. The original file is saved
/// next to it with a `.backup` suffix before it is rewritten.
#[derive(Parser, Debug)]
#[command(name = "toolprune")]
#[command(author, version, about)]
pub struct Cli {
    /// Source file to filter in place
    #[arg(short, long, env = "TOOLPRUNE_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// TOML, JSON or YAML file with a `keep` array replacing the built-in allow-list
    #[arg(short, long, value_name = "FILE")]
    pub allow_list: Option<PathBuf>,

    /// Show the resulting diff without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Fail instead of dropping a block that is never closed
    #[arg(long)]
    pub strict: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_fixed_layout() {
        let cli = Cli::try_parse_from(["toolprune"]).unwrap();
        if std::env::var_os("TOOLPRUNE_SOURCE").is_none() {
            assert_eq!(cli.source, PathBuf::from("src/index.ts"));
        }
        assert!(cli.allow_list.is_none());
        assert!(!cli.dry_run && !cli.strict && !cli.json && !cli.verbose);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "toolprune",
            "--source",
            "server/main.ts",
            "--allow-list",
            "keep.toml",
            "--dry-run",
            "--strict",
            "--json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.source, PathBuf::from("server/main.ts"));
        assert_eq!(cli.allow_list, Some(PathBuf::from("keep.toml")));
        assert!(cli.dry_run && cli.strict && cli.json && cli.verbose);
    }
}
