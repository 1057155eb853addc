//! Property tests for license block formatting.

use proptest::prelude::*;

use shlforge_core::format_license;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every block line is prefixed and carries no trailing whitespace.
    #[test]
    fn property_lines_prefixed_and_trimmed(
        lines in proptest::collection::vec("[ -~\t]{0,40}", 0..=12),
    ) {
        let block = format_license(&lines.join("\n"));

        for line in block.lines() {
            prop_assert!(line.starts_with(" *"), "unprefixed line: {:?}", line);
            prop_assert_eq!(line, line.trim_end());
        }
    }

    /// PROPERTY: One block line per input line, none added at the edges.
    #[test]
    fn property_line_count_preserved(
        lines in proptest::collection::vec("[A-Za-z0-9 .,()]{0,40}", 1..=12),
    ) {
        let text = lines.join("\n");
        let block = format_license(&text);
        prop_assert_eq!(block.lines().count(), text.lines().count());
    }
}
