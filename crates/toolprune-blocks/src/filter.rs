//! The single-pass block filter.
//!
//! [`BlockFilter`] walks the lines of a document once with a two-state
//! scanner. While outside a block it asks the [`BlockBoundary`] whether the
//! current line opens one; while inside it accumulates lines until the
//! boundary reports the end, then decides keep or filter by allow-list
//! membership and emits the block.

use serde::Serialize;

use crate::allow_list::AllowList;
use crate::boundary::{BlockBoundary, CallBoundary};
use crate::comment::comment_block;
use crate::error::{Error, Result};

/// What happens to a block whose start is seen but whose end never is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnterminatedPolicy {
    /// Drop the open block's lines from the output and report it in
    /// [`FilterOutcome::unterminated`].
    #[default]
    Drop,
    /// Fail with [`Error::UnterminatedBlock`].
    Fail,
}

/// A recognized block: its name and its lines, start line included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub name: String,
    pub lines: Vec<&'a str>,
    /// 1-based line number of the start marker.
    pub start_line: usize,
    /// 1-based line number of the end marker.
    pub end_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAction {
    Keep,
    Filter,
}

/// The decision taken for one block, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDecision {
    pub name: String,
    pub action: BlockAction,
    pub start_line: usize,
    pub end_line: usize,
}

/// Counts of kept and filtered blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub kept: usize,
    pub filtered: usize,
}

impl FilterSummary {
    pub fn total(&self) -> usize {
        self.kept + self.filtered
    }
}

/// A block still open at end of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnterminatedBlock {
    pub name: String,
    pub start_line: usize,
    /// Number of lines dropped from the output.
    pub line_count: usize,
}

/// Result of one pass over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub lines: Vec<String>,
    pub decisions: Vec<BlockDecision>,
    pub summary: FilterSummary,
    pub unterminated: Option<UnterminatedBlock>,
}

impl FilterOutcome {
    /// The output lines joined with `\n`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

enum ScanState<'a> {
    Outside,
    Inside {
        name: String,
        start_line: usize,
        lines: Vec<&'a str>,
    },
}

/// Filters blocks against an allow-list.
///
/// ```
/// use toolprune_blocks::{AllowList, BlockFilter};
///
/// let filter = BlockFilter::new(AllowList::new(["crm_get_company"]));
/// let outcome = filter
///     .filter_content("server.tool(\"crm_list_emails\", {})\n)\n")
///     .unwrap();
///
/// assert_eq!(outcome.summary.filtered, 1);
/// assert!(outcome.content().starts_with("  // [FILTERED] crm_list_emails\n"));
/// ```
#[derive(Debug, Clone)]
pub struct BlockFilter<B = CallBoundary> {
    allow_list: AllowList,
    boundary: B,
    unterminated: UnterminatedPolicy,
}

impl BlockFilter<CallBoundary> {
    /// Filter for `server.tool(...)` blocks.
    pub fn new(allow_list: AllowList) -> Self {
        Self::with_boundary(allow_list, CallBoundary::server_tool())
    }
}

impl<B: BlockBoundary> BlockFilter<B> {
    pub fn with_boundary(allow_list: AllowList, boundary: B) -> Self {
        Self {
            allow_list,
            boundary,
            unterminated: UnterminatedPolicy::default(),
        }
    }

    pub fn unterminated_policy(mut self, policy: UnterminatedPolicy) -> Self {
        self.unterminated = policy;
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Split `content` on `\n` and filter it.
    ///
    /// A trailing newline yields a trailing empty line, so joining the output
    /// with `\n` reproduces it.
    pub fn filter_content(&self, content: &str) -> Result<FilterOutcome> {
        let lines: Vec<&str> = content.split('\n').collect();
        self.filter_lines(&lines)
    }

    /// Run the scanner over `lines`.
    pub fn filter_lines(&self, lines: &[&str]) -> Result<FilterOutcome> {
        let mut output = Vec::with_capacity(lines.len());
        let mut decisions = Vec::new();
        let mut summary = FilterSummary::default();
        let mut state = ScanState::Outside;

        for (index, &line) in lines.iter().enumerate() {
            state = match state {
                ScanState::Outside => match self.boundary.match_start(lines, index) {
                    Some(name) => {
                        tracing::debug!(name = %name, line = index + 1, "block opened");
                        ScanState::Inside {
                            name,
                            start_line: index + 1,
                            lines: vec![line],
                        }
                    }
                    None => {
                        output.push(line.to_string());
                        ScanState::Outside
                    }
                },
                ScanState::Inside {
                    name,
                    start_line,
                    lines: mut block_lines,
                } => {
                    block_lines.push(line);
                    if self.boundary.is_end(lines, index) {
                        let block = Block {
                            name,
                            lines: block_lines,
                            start_line,
                            end_line: index + 1,
                        };
                        let decision = self.emit(block, &mut output);
                        match decision.action {
                            BlockAction::Keep => summary.kept += 1,
                            BlockAction::Filter => summary.filtered += 1,
                        }
                        decisions.push(decision);
                        ScanState::Outside
                    } else {
                        ScanState::Inside {
                            name,
                            start_line,
                            lines: block_lines,
                        }
                    }
                }
            };
        }

        let unterminated = match state {
            ScanState::Outside => None,
            ScanState::Inside {
                name,
                start_line,
                lines: block_lines,
            } => match self.unterminated {
                UnterminatedPolicy::Fail => {
                    return Err(Error::UnterminatedBlock { name, start_line });
                }
                UnterminatedPolicy::Drop => {
                    tracing::warn!(
                        name = %name,
                        start_line,
                        dropped = block_lines.len(),
                        "block never closed, dropping its lines"
                    );
                    Some(UnterminatedBlock {
                        name,
                        start_line,
                        line_count: block_lines.len(),
                    })
                }
            },
        };

        Ok(FilterOutcome {
            lines: output,
            decisions,
            summary,
            unterminated,
        })
    }

    fn emit(&self, block: Block<'_>, output: &mut Vec<String>) -> BlockDecision {
        let action = if self.allow_list.contains(&block.name) {
            output.extend(block.lines.iter().map(|line| line.to_string()));
            BlockAction::Keep
        } else {
            output.extend(comment_block(&block.name, block.lines.iter().copied()));
            BlockAction::Filter
        };

        tracing::debug!(
            name = %block.name,
            action = ?action,
            start_line = block.start_line,
            end_line = block.end_line,
            "block closed"
        );

        BlockDecision {
            name: block.name,
            action,
            start_line: block.start_line,
            end_line: block.end_line,
        }
    }
}
