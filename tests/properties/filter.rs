//! Property tests for the implementation line filter.

use proptest::prelude::*;

use shlforge_core::filter_implementation;

const NAME: &str = "lib.h";

fn impl_line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[A-Za-z0-9 _;(){}*/#<>.\"]{0,40}",
        1 => Just("#include \"lib.h\"".to_string()),
        1 => "[a-z ]{0,10}".prop_map(|s| format!("// {} lib.h", s)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: No surviving line mentions the header.
    #[test]
    fn property_no_line_contains_name(
        lines in proptest::collection::vec(impl_line(), 0..=16),
    ) {
        let filtered = filter_implementation(&lines.join("\n"), NAME);
        for line in filtered.lines() {
            prop_assert!(!line.contains(NAME));
        }
    }

    /// PROPERTY: Output is exactly the non-matching lines, in order.
    #[test]
    fn property_order_preserving_subsequence(
        lines in proptest::collection::vec(impl_line(), 0..=16),
    ) {
        let text = lines.join("\n");
        let filtered = filter_implementation(&text, NAME);
        let expected: Vec<&str> = text
            .lines()
            .filter(|l| !l.contains(NAME))
            .collect();
        prop_assert_eq!(filtered, expected.join("\n"));
    }

    /// PROPERTY: Filtering twice changes nothing.
    #[test]
    fn property_idempotent(
        lines in proptest::collection::vec(impl_line(), 0..=16),
    ) {
        let once = filter_implementation(&lines.join("\n"), NAME);
        let twice = filter_implementation(&once, NAME);
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Text that never mentions the header passes through unchanged.
    #[test]
    fn property_unrelated_text_unchanged(
        lines in proptest::collection::vec("[A-Za-z0-9 _;(){}]{1,40}", 1..=16),
    ) {
        let text = lines.join("\n");
        prop_assert_eq!(filter_implementation(&text, NAME), text);
    }
}
