// crates/scribe-core/src/model/primitives/tests.rs
// ============================================================================
// Module: Primitive Type Unit Tests
// Description: Scalar projections and default-value literal dispatch.
// Purpose: Validate surface names, persistence mapping, and tag dispatch.
// Dependencies: scribe-core, serde_json
// ============================================================================

//! ## Overview
//! Covers the scalar-kind projections and the string tag dispatch used
//! when decoding default values.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use crate::model::primitives::DefaultValue;
use crate::model::primitives::PersistenceKind;
use crate::model::primitives::ScalarKind;

#[test]
fn surface_names_resolve_back_to_their_kind() {
    for kind in [
        ScalarKind::String,
        ScalarKind::Int,
        ScalarKind::Date,
        ScalarKind::Double,
        ScalarKind::Float,
        ScalarKind::Bool,
        ScalarKind::Seconds,
        ScalarKind::Milliseconds,
        ScalarKind::Url,
        ScalarKind::Color,
    ] {
        assert_eq!(ScalarKind::from_surface_name(kind.surface_name()), Some(kind));
    }
}

#[test]
fn legacy_time_surface_resolves_to_seconds() {
    assert_eq!(ScalarKind::from_surface_name("time"), Some(ScalarKind::Seconds));
    assert_eq!(ScalarKind::from_surface_name("minutes"), None);
}

#[test]
fn persistence_kinds_cover_store_columns() {
    assert_eq!(ScalarKind::Url.persistence_kind(), PersistenceKind::String);
    assert_eq!(ScalarKind::Bool.persistence_kind(), PersistenceKind::Int64);
    assert_eq!(ScalarKind::Seconds.persistence_kind(), PersistenceKind::Double);
    assert_eq!(ScalarKind::Float.persistence_kind(), PersistenceKind::Float);
}

#[test]
fn string_literal_dispatch_matches_the_format_table() {
    assert_eq!(DefaultValue::from_string_literal("1.5s"), DefaultValue::Seconds(1.5));
    assert_eq!(DefaultValue::from_string_literal("250ms"), DefaultValue::Milliseconds(250.0));
    assert_eq!(
        DefaultValue::from_string_literal(".premium"),
        DefaultValue::EnumCase("premium".to_string()),
    );
    assert_eq!(DefaultValue::from_string_literal("current_date"), DefaultValue::CurrentDate);
    assert_eq!(DefaultValue::from_string_literal("nil"), DefaultValue::Nil);
    assert_eq!(
        DefaultValue::from_string_literal("hello"),
        DefaultValue::String("hello".to_string()),
    );
}

#[test]
fn non_numeric_suffix_strings_stay_plain() {
    assert_eq!(
        DefaultValue::from_string_literal("apples"),
        DefaultValue::String("apples".to_string()),
    );
    assert_eq!(
        DefaultValue::from_string_literal("dreams"),
        DefaultValue::String("dreams".to_string()),
    );
}

#[test]
fn canonical_strings_distinguish_duration_units() {
    assert_ne!(DefaultValue::Seconds(1.5), DefaultValue::Milliseconds(1500.0));
    assert_eq!(DefaultValue::Seconds(2.0).canonical_string(), "2s");
    assert_eq!(DefaultValue::Milliseconds(250.0).canonical_string(), "250ms");
}

#[test]
fn json_decoding_follows_value_kind_before_tag_dispatch() -> Result<(), Box<dyn std::error::Error>>
{
    let decoded: DefaultValue = serde_json::from_str("true")?;
    assert_eq!(decoded, DefaultValue::Bool(true));
    let decoded: DefaultValue = serde_json::from_str("42")?;
    assert_eq!(decoded, DefaultValue::Int(42));
    let decoded: DefaultValue = serde_json::from_str("4.5")?;
    assert_eq!(decoded, DefaultValue::Float(4.5));
    let decoded: DefaultValue = serde_json::from_str("\"2020-01-01T10:00:00Z\"")?;
    assert!(matches!(decoded, DefaultValue::Date(_)));
    Ok(())
}

#[test]
fn json_encoding_emits_native_values_and_tagged_strings()
-> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(serde_json::to_string(&DefaultValue::Bool(false))?, "false");
    assert_eq!(serde_json::to_string(&DefaultValue::Int(7))?, "7");
    assert_eq!(serde_json::to_string(&DefaultValue::Seconds(1.5))?, "\"1.5s\"");
    assert_eq!(serde_json::to_string(&DefaultValue::EnumCase("premium".into()))?, "\".premium\"");
    assert_eq!(serde_json::to_string(&DefaultValue::Nil)?, "\"nil\"");
    Ok(())
}
