// crates/scribe-core/tests/proptest_version.rs
// ============================================================================
// Module: Version Property-Based Tests
// Description: Property tests for version ordering and parsing stability.
// Purpose: Detect ordering-law violations across wide component ranges.
// ============================================================================

//! Property-based tests for version ordering, release matching, and the
//! display/parse round trip.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use scribe_core::ReleaseKind;
use scribe_core::Version;
use scribe_core::VersionSource;
use scribe_core::VersionTag;

fn tag_strategy() -> impl Strategy<Value = VersionTag> {
    prop_oneof![
        Just(VersionTag::Other),
        Just(VersionTag::Release(ReleaseKind::Beta)),
        Just(VersionTag::Release(ReleaseKind::AppStore)),
    ]
}

fn version_strategy() -> impl Strategy<Value = Version> {
    (
        0u32 .. 50,
        0u32 .. 50,
        proptest::option::of(0u32 .. 50),
        proptest::option::of(0u32 .. 50),
        tag_strategy(),
    )
        .prop_map(|(major, minor, patch, build, tag)| Version { major, minor, patch, build, tag })
}

proptest! {
    #[test]
    fn ordering_is_total_and_consistent(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        // Antisymmetry.
        if a <= b && b <= a {
            prop_assert_eq!(&a, &b);
        }
        // Transitivity.
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
        // Totality.
        prop_assert!(a <= b || b <= a);
    }

    #[test]
    fn matching_release_is_an_equivalence(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        prop_assert!(a.is_matching_release(&a));
        prop_assert_eq!(a.is_matching_release(&b), b.is_matching_release(&a));
        if a.is_matching_release(&b) && b.is_matching_release(&c) {
            prop_assert!(a.is_matching_release(&c));
        }
    }

    #[test]
    fn display_round_trips_under_the_description_grammar(version in version_strategy()) {
        let text = version.to_string();
        let reparsed = Version::from_source_str(&text, VersionSource::Description);
        prop_assert!(reparsed.is_ok());
        let reparsed = reparsed.unwrap();
        prop_assert_eq!(reparsed.major, version.major);
        prop_assert_eq!(reparsed.minor, version.minor);
        prop_assert_eq!(reparsed.patch, version.patch);
        prop_assert_eq!(reparsed.build, version.build);
    }

    #[test]
    fn absent_components_order_below_present_ones(
        major in 0u32 .. 50,
        minor in 0u32 .. 50,
        patch in 0u32 .. 50,
        build in 0u32 .. 50,
    ) {
        let without_patch =
            Version { major, minor, patch: None, build: None, tag: VersionTag::Other };
        let with_patch =
            Version { major, minor, patch: Some(patch), build: None, tag: VersionTag::Other };
        let with_build =
            Version { major, minor, patch: Some(patch), build: Some(build), tag: VersionTag::Other };
        prop_assert!(without_patch < with_patch);
        prop_assert!(with_patch < with_build);
    }
}
