//! The filter command: read, filter, back up, rewrite.

use std::path::PathBuf;

use toolprune_blocks::{AllowList, BlockFilter, UnterminatedPolicy};
use toolprune_fs::{ConfigStore, NormalizedPath, create_backup, io};

use super::report::{FilterReport, Progress};
use crate::error::{CliError, Result};

#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub source: PathBuf,
    pub allow_list: Option<PathBuf>,
    pub dry_run: bool,
    pub strict: bool,
    pub json: bool,
}

/// Load the allow-list file if one was given, otherwise the built-in list.
fn load_allow_list(path: Option<&PathBuf>) -> Result<AllowList> {
    let Some(path) = path else {
        return Ok(AllowList::builtin());
    };

    let path = NormalizedPath::new(path);
    let config = ConfigStore::new().load_allow_list(&path)?;
    let allow_list = AllowList::new(config.keep);
    if allow_list.is_empty() {
        return Err(CliError::user(format!(
            "Allow-list {path} has no `keep` entries; every tool would be filtered"
        )));
    }
    tracing::debug!(path = %path, names = allow_list.len(), "loaded allow-list");
    Ok(allow_list)
}

/// Run the filter over `options.source`.
///
/// The whole pass runs before anything touches the disk, so a failure while
/// filtering (e.g. an unterminated block with `strict`) leaves no backup and
/// an unchanged source. The backup is durable before the source is replaced.
pub fn run_filter(options: &FilterOptions) -> Result<FilterReport> {
    let progress = Progress::new(!options.json);
    let source = NormalizedPath::new(&options.source);
    let allow_list = load_allow_list(options.allow_list.as_ref())?;
    let policy = if options.strict {
        UnterminatedPolicy::Fail
    } else {
        UnterminatedPolicy::Drop
    };

    progress.step("Reading source file...");
    let content = io::read_text(&source)?;

    progress.step("Filtering tools...");
    let filter = BlockFilter::new(allow_list).unterminated_policy(policy);
    let outcome = filter.filter_content(&content)?;
    for decision in &outcome.decisions {
        progress.decision(decision);
    }
    if let Some(block) = &outcome.unterminated {
        progress.unterminated(block);
    }

    let unmatched: Vec<String> = filter
        .allow_list()
        .unmatched(outcome.decisions.iter().map(|d| d.name.as_str()))
        .into_iter()
        .map(String::from)
        .collect();
    if !unmatched.is_empty() {
        tracing::debug!(names = ?unmatched, "allow-listed tools not found in source");
    }

    let filtered_content = outcome.content();
    let backup = if options.dry_run {
        progress.diff(&source, &content, &filtered_content);
        None
    } else {
        progress.step("Creating backup...");
        let backup = create_backup(&source)?;

        progress.step("\nWriting filtered file...");
        io::write_text(&source, &filtered_content)?;
        Some(backup)
    };

    let report = FilterReport::new(
        &source,
        backup.as_ref(),
        options.dry_run,
        &outcome,
        unmatched,
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress.summary(&report);
    }

    tracing::info!(
        source = %source,
        kept = report.kept,
        filtered = report.filtered,
        dry_run = options.dry_run,
        "filter finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "server.tool(\n  \"crm_get_company\",\n  {},\n)\n\nserver.tool(\n  \"crm_list_emails\",\n  {},\n)\n\n";

    fn options(source: PathBuf) -> FilterOptions {
        FilterOptions {
            source,
            allow_list: None,
            dry_run: false,
            strict: false,
            json: true,
        }
    }

    #[test]
    fn rewrites_source_and_keeps_backup() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.ts");
        fs::write(&source, SOURCE).unwrap();

        let report = run_filter(&options(source.clone())).unwrap();

        assert_eq!((report.kept, report.filtered, report.total), (1, 1, 2));
        assert_eq!(
            fs::read_to_string(temp.path().join("index.ts.backup")).unwrap(),
            SOURCE
        );
        let rewritten = fs::read_to_string(&source).unwrap();
        assert!(rewritten.contains("  // [FILTERED] crm_list_emails\n  // server.tool(\n"));
        assert!(rewritten.starts_with("server.tool(\n  \"crm_get_company\",\n"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.ts");
        fs::write(&source, SOURCE).unwrap();

        let report = run_filter(&FilterOptions {
            dry_run: true,
            ..options(source.clone())
        })
        .unwrap();

        assert_eq!(report.backup, None);
        assert_eq!(report.filtered, 1);
        assert_eq!(fs::read_to_string(&source).unwrap(), SOURCE);
        assert!(!temp.path().join("index.ts.backup").exists());
    }

    #[test]
    fn strict_failure_leaves_no_backup() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.ts");
        fs::write(&source, "server.tool(\n  \"crm_get_company\",\n)").unwrap();

        let result = run_filter(&FilterOptions {
            strict: true,
            ..options(source.clone())
        });

        assert!(matches!(
            result,
            Err(CliError::Blocks(toolprune_blocks::Error::UnterminatedBlock { .. }))
        ));
        assert!(!temp.path().join("index.ts.backup").exists());
    }

    #[test]
    fn allow_list_file_replaces_builtin() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.ts");
        let keep = temp.path().join("keep.json");
        fs::write(&source, SOURCE).unwrap();
        fs::write(&keep, r#"{"keep": ["crm_list_emails", "unused_tool"]}"#).unwrap();

        let report = run_filter(&FilterOptions {
            allow_list: Some(keep),
            ..options(source)
        })
        .unwrap();

        let names: Vec<_> = report
            .decisions
            .iter()
            .map(|d| (d.name.as_str(), d.action))
            .collect();
        assert_eq!(
            names,
            vec![
                ("crm_get_company", toolprune_blocks::BlockAction::Filter),
                ("crm_list_emails", toolprune_blocks::BlockAction::Keep),
            ]
        );
        assert_eq!(report.unmatched, vec!["unused_tool".to_string()]);
    }

    #[test]
    fn empty_allow_list_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let keep = temp.path().join("keep.toml");
        fs::write(&keep, "keep = []\n").unwrap();

        let result = load_allow_list(Some(&keep));

        assert!(matches!(result, Err(CliError::User { .. })));
    }

    #[test]
    fn allow_list_file_deduplicates_names() {
        let temp = TempDir::new().unwrap();
        let keep = temp.path().join("keep.yaml");
        fs::write(&keep, "keep:\n  - notes_get\n  - notes_get\n  - tasks_get\n").unwrap();

        let allow_list = load_allow_list(Some(&keep)).unwrap();

        assert_eq!(allow_list.len(), 2);
        assert!(allow_list.contains("notes_get"));
    }

    #[test]
    fn missing_source_is_an_fs_error() {
        let temp = TempDir::new().unwrap();
        let result = run_filter(&options(temp.path().join("index.ts")));
        assert!(matches!(result, Err(CliError::Fs(toolprune_fs::Error::Io { .. }))));
    }
}
