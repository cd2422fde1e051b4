//! Rendering of filtered blocks as commented-out text

/// Prefix placed before every non-blank line of a filtered block.
pub const COMMENT_PREFIX: &str = "  // ";

/// Prefix of the marker line inserted ahead of a filtered block.
pub const FILTERED_MARKER: &str = "  // [FILTERED] ";

/// The marker line for a filtered block. The name is inserted as-is.
pub fn marker_line(name: &str) -> String {
    format!("{FILTERED_MARKER}{name}")
}

/// Comment out one line. Lines that are blank after trimming become empty.
pub fn comment_line(line: &str) -> String {
    if line.trim().is_empty() {
        String::new()
    } else {
        format!("{COMMENT_PREFIX}{line}")
    }
}

/// Marker line followed by every line of the block commented out.
pub fn comment_block<'a, I>(name: &str, lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    std::iter::once(marker_line(name))
        .chain(lines.into_iter().map(comment_line))
        .collect()
}
