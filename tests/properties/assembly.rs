//! Property tests for the assembled artifact.

use proptest::prelude::*;

use shlforge_core::{amalgamate, BuildDate, HeaderTemplate, SourceSet};

fn text_block() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ -~]{0,30}", 0..=8).prop_map(|lines| lines.join("\n"))
}

fn build_date() -> impl Strategy<Value = BuildDate> {
    (1970i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| BuildDate::from_ymd(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Declarations appear as one contiguous, unmodified substring.
    #[test]
    fn property_declarations_contained(
        declarations in text_block(),
        implementation in text_block(),
        license in text_block(),
        date in build_date(),
    ) {
        let sources = SourceSet::new(declarations.clone(), implementation, license);
        let text = amalgamate(&sources, &HeaderTemplate::default(), date);
        prop_assert!(text.contains(&declarations));
    }

    /// PROPERTY: Same inputs and date give byte-identical output.
    #[test]
    fn property_deterministic(
        declarations in text_block(),
        implementation in text_block(),
        license in text_block(),
        date in build_date(),
    ) {
        let sources = SourceSet::new(declarations, implementation, license);
        let template = HeaderTemplate::for_header("lib.h", "lib.c");
        prop_assert_eq!(
            amalgamate(&sources, &template, date),
            amalgamate(&sources, &template, date)
        );
    }

    /// PROPERTY: The artifact always ends by closing the activation guard.
    #[test]
    fn property_ends_with_activation_close(
        implementation in text_block(),
        date in build_date(),
    ) {
        let template = HeaderTemplate::for_header("lib.h", "lib.c");
        let sources = SourceSet::new("int f(void);", implementation, "MIT");
        let text = amalgamate(&sources, &template, date);
        prop_assert!(text.ends_with("#endif // LIB_IMPL_GUARD\n#endif // LIB_IMPL\n"));
        let banner_date = format!(" * @date {}\n", date);
        prop_assert!(text.contains(&banner_date));
    }
}
