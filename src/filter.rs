//! Implementation Filter
//!
//! The implementation source includes its own header for standalone builds.
//! Once both live in one artifact that include would be circular, so every
//! line mentioning the header name is dropped. This is a plain substring
//! match: a comment or string literal naming the header goes too.

use serde::{Deserialize, Serialize};

/// A line removed from the implementation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedLine {
    /// 1-based line number in the original implementation text.
    pub line: usize,
    pub text: String,
}

impl DroppedLine {
    /// Whether the dropped line looks like an `#include` directive.
    pub fn is_include(&self) -> bool {
        self.text
            .trim_start()
            .strip_prefix('#')
            .is_some_and(|rest| rest.trim_start().starts_with("include"))
    }
}

/// Split on `\r\n`, `\n` or a lone `\r`, without the terminators.
///
/// Like `str::lines`, a trailing terminator does not produce a final empty
/// line and empty text yields nothing.
pub fn split_lines<'a>(text: &'a str) -> impl Iterator<Item = &'a str> {
    let mut rest = Some(text).filter(|t| !t.is_empty());
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(|c: char| c == '\n' || c == '\r') {
            Some(idx) => {
                let end = if current[idx..].starts_with("\r\n") { idx + 2 } else { idx + 1 };
                rest = Some(&current[end..]).filter(|t| !t.is_empty());
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Drops implementation lines that reference the declarations header.
#[derive(Debug, Clone)]
pub struct ImplementationFilter<'a> {
    name: &'a str,
}

impl<'a> ImplementationFilter<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn keeps(&self, line: &str) -> bool {
        !line.contains(self.name)
    }

    /// Lines that survive, in original order, joined with `\n`.
    pub fn apply(&self, text: &str) -> String {
        split_lines(text)
            .filter(|line| self.keeps(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn dropped(&self, text: &str) -> Vec<DroppedLine> {
        split_lines(text)
            .enumerate()
            .filter(|(_, line)| !self.keeps(line))
            .map(|(idx, line)| DroppedLine {
                line: idx + 1,
                text: line.to_string(),
            })
            .collect()
    }
}

pub fn filter_implementation(text: &str, name: &str) -> String {
    ImplementationFilter::new(name).apply(text)
}

pub fn dropped_lines(text: &str, name: &str) -> Vec<DroppedLine> {
    ImplementationFilter::new(name).dropped(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_self_include() {
        let text = "#include \"x.h\"\nvoid foo(void){}";
        assert_eq!(filter_implementation(text, "x.h"), "void foo(void){}");
    }

    #[test]
    fn test_keeps_blank_lines_and_comments() {
        let text = "#include <stdlib.h>\n\n// helpers\n#include \"embedded_cli.h\"\n\nstatic int x;";
        assert_eq!(
            filter_implementation(text, "embedded_cli.h"),
            "#include <stdlib.h>\n\n// helpers\n\nstatic int x;"
        );
    }

    #[test]
    fn test_mentions_in_comments_are_dropped_too() {
        let text = "/* see embedded_cli.h for docs */\nint a;";
        assert_eq!(filter_implementation(text, "embedded_cli.h"), "int a;");
    }

    #[test]
    fn test_no_match_is_unchanged() {
        let text = "int a;\n\nint b;";
        assert_eq!(filter_implementation(text, "x.h"), text);
    }

    #[test]
    fn test_empty_implementation() {
        assert_eq!(filter_implementation("", "x.h"), "");
        assert!(dropped_lines("", "x.h").is_empty());
    }

    #[test]
    fn test_dropped_lines_are_numbered() {
        let text = "a\n#include \"x.h\"\nb\n// x.h\n";
        let dropped = dropped_lines(text, "x.h");
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[0].line, 2);
        assert!(dropped[0].is_include());
        assert_eq!(dropped[1].line, 4);
        assert!(!dropped[1].is_include());
    }

    #[test]
    fn test_split_lines_terminators() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd\n").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);

        let lines: Vec<_> = split_lines("\r\r\n\n").collect();
        assert_eq!(lines, ["", "", ""]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("no break").collect::<Vec<_>>(), ["no break"]);
    }

    #[test]
    fn test_bare_carriage_return_separates_lines() {
        let text = "int keep;\r#include \"x.h\"\rint also;";
        assert_eq!(filter_implementation(text, "x.h"), "int keep;\nint also;");

        let dropped = dropped_lines(text, "x.h");
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].line, 2);
    }

    #[test]
    fn test_include_detection_tolerates_spacing() {
        let line = DroppedLine { line: 1, text: "  #  include \"x.h\"".to_string() };
        assert!(line.is_include());
    }
}
