//! License Formatter
//!
//! Turns raw license prose into lines that sit inside the banner's `/** ... */`
//! block.

use crate::filter::split_lines;

/// Marker that opens every license line inside the banner comment.
pub const COMMENT_CONTINUATION: &str = " *";

/// Prefix each line with ` * ` and strip trailing whitespace from the result.
///
/// Lines are joined with `\n` and no blank line is added at either end, so an
/// empty license yields an empty block. A blank license line becomes ` *`.
pub fn format_license(text: &str) -> String {
    split_lines(text)
        .map(|line| format!("{} {}", COMMENT_CONTINUATION, line).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
