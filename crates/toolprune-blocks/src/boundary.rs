//! Predicates that decide where a block starts and ends.

use regex::Regex;
use std::sync::LazyLock;

use crate::Result;

/// A leading quoted string, single or double quotes, capturing its content.
static QUOTED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*["']([^"']+)["']"#).expect("Invalid quoted name regex")
});

/// Decides block boundaries for the scanner.
///
/// Both methods receive the whole document so that implementations may look
/// ahead of the current line.
pub trait BlockBoundary {
    /// If `lines[index]` opens a block, return the block's name.
    fn match_start(&self, lines: &[&str], index: usize) -> Option<String>;

    /// Whether `lines[index]` closes the currently open block.
    fn is_end(&self, lines: &[&str], index: usize) -> bool;
}

/// Boundary for blocks shaped as a call whose first argument is a quoted name:
///
/// ```text
///   server.tool(
///     "crm_get_company",
///     ...
///   )
///
/// ```
///
/// A block starts on any line containing `<callee>(` followed by a quoted
/// string, with only whitespace in between. That whitespace may run past the
/// end of the line, in which case the next non-blank line must begin with the
/// quoted name. The call is not anchored to line start, so a commented-out
/// call (`  // server.tool(`) still opens a block.
///
/// A block ends on a line whose trimmed content is exactly the close token
/// (`)` by default) when the following line exists and is blank.
///
/// No parenthesis balancing is done: a close-token line followed by a blank
/// line inside the call's own arguments ends the block early.
#[derive(Debug, Clone)]
pub struct CallBoundary {
    call: Regex,
    close: String,
}

impl CallBoundary {
    /// Boundary for calls to `callee`, e.g. `"server.tool"`.
    pub fn new(callee: &str) -> Result<Self> {
        let call = Regex::new(&format!(r"{}\(", regex::escape(callee)))?;
        Ok(Self {
            call,
            close: ")".to_string(),
        })
    }

    /// Boundary for `server.tool(...)` registrations.
    pub fn server_tool() -> Self {
        static SERVER_TOOL: LazyLock<CallBoundary> = LazyLock::new(|| {
            CallBoundary::new("server.tool").expect("Invalid server.tool regex")
        });
        SERVER_TOOL.clone()
    }

    /// Use a different close token, e.g. `");"`.
    pub fn with_close(mut self, close: impl Into<String>) -> Self {
        self.close = close.into();
        self
    }
}

impl Default for CallBoundary {
    fn default() -> Self {
        Self::server_tool()
    }
}

impl BlockBoundary for CallBoundary {
    fn match_start(&self, lines: &[&str], index: usize) -> Option<String> {
        let line = lines.get(index)?;

        for call in self.call.find_iter(line) {
            let rest = &line[call.end()..];
            if let Some(caps) = QUOTED_NAME_REGEX.captures(rest) {
                return Some(caps[1].to_string());
            }
            if rest.trim().is_empty() {
                // The name sits on the next non-blank line
                return lines[index + 1..]
                    .iter()
                    .find(|next| !next.trim().is_empty())
                    .and_then(|next| QUOTED_NAME_REGEX.captures(next))
                    .map(|caps| caps[1].to_string());
            }
        }

        None
    }

    fn is_end(&self, lines: &[&str], index: usize) -> bool {
        let Some(line) = lines.get(index) else {
            return false;
        };
        line.trim() == self.close
            && lines
                .get(index + 1)
                .is_some_and(|next| next.trim().is_empty())
    }
}
