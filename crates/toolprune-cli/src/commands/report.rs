//! Console progress and the final summary

use colored::Colorize;
use serde::Serialize;
use similar::TextDiff;

use toolprune_blocks::{BlockAction, BlockDecision, FilterOutcome, UnterminatedBlock};
use toolprune_fs::NormalizedPath;

/// Everything a run produced, printed as the summary or as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub source: String,
    pub backup: Option<String>,
    pub dry_run: bool,
    pub kept: usize,
    pub filtered: usize,
    pub total: usize,
    pub decisions: Vec<BlockDecision>,
    pub unterminated: Option<UnterminatedBlock>,
    /// Allow-list names that no block in the source carries.
    pub unmatched: Vec<String>,
}

impl FilterReport {
    pub fn new(
        source: &NormalizedPath,
        backup: Option<&NormalizedPath>,
        dry_run: bool,
        outcome: &FilterOutcome,
        unmatched: Vec<String>,
    ) -> Self {
        Self {
            source: source.to_string(),
            backup: backup.map(ToString::to_string),
            dry_run,
            kept: outcome.summary.kept,
            filtered: outcome.summary.filtered,
            total: outcome.summary.total(),
            decisions: outcome.decisions.clone(),
            unterminated: outcome.unterminated.clone(),
            unmatched,
        }
    }
}

/// Human-readable progress on stdout. Silent in `--json` mode.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn step(&self, message: &str) {
        if self.enabled {
            println!("{message}");
        }
    }

    pub fn decision(&self, decision: &BlockDecision) {
        if !self.enabled {
            return;
        }
        match decision.action {
            BlockAction::Keep => println!("{} Keeping: {}", "✓".green(), decision.name),
            BlockAction::Filter => println!("{} Filtering: {}", "✗".red(), decision.name),
        }
    }

    pub fn unterminated(&self, block: &UnterminatedBlock) {
        if self.enabled {
            println!(
                "{} Block '{}' opened at line {} is never closed; {} line(s) dropped",
                "!".yellow().bold(),
                block.name,
                block.start_line,
                block.line_count
            );
        }
    }

    pub fn diff(&self, source: &NormalizedPath, old: &str, new: &str) {
        if !self.enabled {
            return;
        }
        if old == new {
            println!("{} No changes.", "OK".green().bold());
            return;
        }
        let diff = TextDiff::from_lines(old, new);
        let original = format!("a/{source}");
        let filtered = format!("b/{source}");
        print!(
            "{}",
            diff.unified_diff()
                .context_radius(2)
                .header(&original, &filtered)
        );
    }

    pub fn summary(&self, report: &FilterReport) {
        if !self.enabled {
            return;
        }
        println!();
        println!("{}", "=== SUMMARY ===".bold());
        println!("Tools kept: {}", report.kept);
        println!("Tools filtered: {}", report.filtered);
        println!("Total tools: {}", report.total);
        match &report.backup {
            Some(backup) => println!("Backup saved to: {backup}"),
            None => println!("Dry run: no files written"),
        }
        println!("{}", "Done!".green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolprune_blocks::{AllowList, BlockFilter};

    #[test]
    fn report_serializes_counts_and_actions() {
        let outcome = BlockFilter::new(AllowList::new(["keep"]))
            .filter_content("server.tool(\"keep\",\n)\n\nserver.tool(\"drop\",\n)\n\n")
            .unwrap();
        let report = FilterReport::new(
            &NormalizedPath::new("src/index.ts"),
            Some(&NormalizedPath::new("src/index.ts.backup")),
            false,
            &outcome,
            vec![],
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kept"], 1);
        assert_eq!(json["filtered"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["backup"], "src/index.ts.backup");
        assert_eq!(json["decisions"][0]["action"], "keep");
        assert_eq!(json["decisions"][1]["action"], "filter");
        assert_eq!(json["decisions"][1]["start_line"], 4);
        assert!(json["unterminated"].is_null());
    }
}
