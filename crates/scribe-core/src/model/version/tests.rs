// crates/scribe-core/src/model/version/tests.rs
// ============================================================================
// Module: Version Unit Tests
// Description: Grammar coverage for the three version sources.
// Purpose: Validate parsing, tagging, ordering, and display round-trips.
// Dependencies: scribe-core
// ============================================================================

//! ## Overview
//! Covers the dotted, git-tag, and store-model grammars plus the derived
//! ordering and release matching rules.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use crate::model::version::ReleaseKind;
use crate::model::version::Version;
use crate::model::version::VersionSource;
use crate::model::version::VersionTag;

/// Shorthand for a tag-free version value.
fn version(major: u32, minor: u32, patch: Option<u32>, build: Option<u32>) -> Version {
    Version { major, minor, patch, build, tag: VersionTag::Other }
}

#[test]
fn description_grammar_parses_dotted_components() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Version::from_source_str("1.2.3", VersionSource::Description)?;
    assert_eq!(parsed, version(1, 2, Some(3), None));

    let short = Version::from_source_str("4.11", VersionSource::Description)?;
    assert_eq!(short, version(4, 11, None, None));
    Ok(())
}

#[test]
fn description_grammar_rejects_partial_strings() {
    for input in ["7", "a.b", "1.2.3.4", "", "1.2-x"] {
        assert!(
            Version::from_source_str(input, VersionSource::Description).is_err(),
            "expected rejection for {input:?}",
        );
    }
}

#[test]
fn git_tag_grammar_extracts_build_and_release_kind() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Version::from_source_str("release_2.10-7", VersionSource::GitTag)?;
    assert_eq!(parsed.major, 2);
    assert_eq!(parsed.minor, 10);
    assert_eq!(parsed.patch, None);
    assert_eq!(parsed.build, Some(7));
    assert_eq!(parsed.tag, VersionTag::Release(ReleaseKind::AppStore));
    Ok(())
}

#[test]
fn git_tag_grammar_prefers_beta_marker() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Version::from_source_str("beta_release_3.0.1", VersionSource::GitTag)?;
    assert_eq!(parsed.tag, VersionTag::Release(ReleaseKind::Beta));
    Ok(())
}

#[test]
fn store_model_grammar_parses_underscored_components() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Version::from_source_str("AppModel_2_10_1", VersionSource::StoreModel)?;
    assert_eq!(parsed, version(2, 10, Some(1), None));
    Ok(())
}

#[test]
fn ordering_places_absent_components_first() {
    let no_build = version(1, 2, Some(3), None);
    let first_build = version(1, 2, Some(3), Some(1));
    let next_patch = version(1, 2, Some(4), None);
    assert!(no_build < first_build);
    assert!(first_build < next_patch);
}

#[test]
fn matching_release_ignores_build_and_tag() {
    let released = Version {
        major: 1,
        minor: 2,
        patch: Some(3),
        build: Some(9),
        tag: VersionTag::Release(ReleaseKind::AppStore),
    };
    let plain = version(1, 2, Some(3), None);
    assert!(released.is_matching_release(&plain));
    assert!(!released.is_matching_release(&version(1, 2, Some(4), None)));
}

#[test]
fn display_round_trips_through_description_grammar() -> Result<(), Box<dyn std::error::Error>> {
    for input in ["1.2", "1.2.3", "1.2.3-4", "10.0-2"] {
        let parsed: Version = input.parse()?;
        assert_eq!(parsed.to_string(), input);
        let reparsed: Version = parsed.to_string().parse()?;
        assert_eq!(parsed, reparsed);
    }
    Ok(())
}

#[test]
fn zero_sentinel_orders_below_everything() {
    assert!(Version::zero() < version(0, 0, Some(0), None));
    assert!(Version::zero() < version(0, 1, None, None));
}
