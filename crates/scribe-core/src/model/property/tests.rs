// crates/scribe-core/src/model/property/tests.rs
// ============================================================================
// Module: Property Model Unit Tests
// Description: Surface type algebra and system-property derivations.
// Purpose: Validate the bracketed type syntax and fixed per-name facts.
// Dependencies: scribe-core
// ============================================================================

//! ## Overview
//! Covers the bracketed surface syntax of property types and the fixed
//! derivations of the reserved system properties.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use crate::errors::DescriptionError;
use crate::model::primitives::DefaultValue;
use crate::model::primitives::PersistenceKind;
use crate::model::primitives::ScalarKind;
use crate::model::property::PropertyType;
use crate::model::property::SystemProperty;
use crate::model::property::SystemPropertyName;

type TestResult = Result<(), Box<dyn std::error::Error>>;

// ============================================================================
// SECTION: Surface Syntax
// ============================================================================

#[test]
fn scalar_surfaces_parse_and_render() -> TestResult {
    let parsed = PropertyType::parse_surface("seconds")?;
    assert_eq!(parsed, PropertyType::Scalar(ScalarKind::Seconds));
    assert_eq!(parsed.surface_string().as_deref(), Some("seconds"));
    Ok(())
}

#[test]
fn arrays_nest_and_round_trip() -> TestResult {
    let parsed = PropertyType::parse_surface("[[string]]")?;
    assert_eq!(parsed.surface_string().as_deref(), Some("[[string]]"));
    assert!(!parsed.contains_dictionary());
    Ok(())
}

#[test]
fn dictionaries_parse_their_key_and_value_types() -> TestResult {
    let parsed = PropertyType::parse_surface("[string:[int]]")?;
    let PropertyType::Dictionary(key, value) = &parsed else {
        return Err("expected a dictionary type".into());
    };
    assert_eq!(**key, PropertyType::Scalar(ScalarKind::String));
    assert_eq!(**value, PropertyType::Array(Box::new(PropertyType::Scalar(ScalarKind::Int))));
    assert!(parsed.contains_dictionary());
    assert_eq!(parsed.surface_string().as_deref(), Some("[string:[int]]"));
    Ok(())
}

#[test]
fn bare_names_fall_back_to_subtype_references() -> TestResult {
    let parsed = PropertyType::parse_surface("user_plan")?;
    assert_eq!(parsed, PropertyType::Subtype("user_plan".to_string()));
    assert_eq!(parsed.subtype_name(), Some("user_plan"));
    Ok(())
}

#[test]
fn malformed_surfaces_are_unsupported_types() {
    for input in ["", "[]", "user plan", "1plan", "[string"] {
        let result = PropertyType::parse_surface(input);
        assert!(
            matches!(result, Err(DescriptionError::UnsupportedType(_))),
            "expected rejection for {input:?}",
        );
    }
}

#[test]
fn subtype_references_surface_through_arrays() -> TestResult {
    let parsed = PropertyType::parse_surface("[user_plan]")?;
    assert_eq!(parsed.subtype_name(), Some("user_plan"));
    assert_eq!(parsed.relationship(), None);
    Ok(())
}

// ============================================================================
// SECTION: System Properties
// ============================================================================

#[test]
fn is_synced_derivations_are_fixed() {
    let property = SystemProperty {
        name: SystemPropertyName::IsSynced,
        added_at_version: None,
        use_legacy_naming: false,
    };
    assert_eq!(property.property_type(), PropertyType::Scalar(ScalarKind::Bool));
    assert!(!property.nullable());
    assert_eq!(property.default_value(), Some(DefaultValue::Bool(false)));
    assert!(property.mutable());
    assert_eq!(property.persistence_kind(), PersistenceKind::Int64);
}

#[test]
fn last_remote_read_derivations_are_fixed() {
    let property = SystemProperty {
        name: SystemPropertyName::LastRemoteRead,
        added_at_version: None,
        use_legacy_naming: true,
    };
    assert_eq!(property.property_type(), PropertyType::Scalar(ScalarKind::Date));
    assert!(property.nullable());
    assert_eq!(property.default_value(), None);
    assert!(!property.mutable());
    assert_eq!(property.persistence_kind(), PersistenceKind::Double);
}

#[test]
fn reserved_names_match_the_canonical_spellings() {
    assert!(SystemPropertyName::is_reserved("is_synced"));
    assert!(SystemPropertyName::is_reserved("last_remote_read"));
    assert!(!SystemPropertyName::is_reserved("isSynced"));
    assert!(SystemPropertyName::IsSynced < SystemPropertyName::LastRemoteRead);
}
