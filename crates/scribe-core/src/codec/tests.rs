// crates/scribe-core/src/codec/tests.rs
// ============================================================================
// Module: Codec Unit Tests
// Description: Alias precedence, defaults, and variant dispatch coverage.
// Purpose: Validate the lenient-in, canonical-out decoding rules.
// Dependencies: scribe-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the raw decoding layer directly: legacy alias precedence,
//! defaulting, identifier `type` dispatch, cache-size forms, and subtype
//! shape resolution.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use serde_json::json;

use crate::errors::DescriptionError;
use crate::model::descriptions::Descriptions;
use crate::model::entity::CacheGroup;
use crate::model::entity::EntityCacheSize;
use crate::model::identifier::IdentifierType;
use crate::model::primitives::ScalarKind;
use crate::model::property::PropertyType;
use crate::model::subtype::SubtypeItems;

/// Decodes a single-entity description tree around `entity`.
fn decode_entity(entity: serde_json::Value) -> Result<Descriptions, DescriptionError> {
    Descriptions::from_json_value(json!({ "entities": [entity], "version": "1.0" }))
}

#[test]
fn key_defaults_to_the_property_name() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [
            { "name": "title", "propertyType": "string" },
            { "name": "body", "key": "content.body", "propertyType": "string" },
        ],
    }))?;
    let user = descriptions.entity("User")?;
    assert_eq!(user.properties[1].key, "title");
    assert_eq!(user.properties[0].key, "content.body");
    Ok(())
}

#[test]
fn nullable_accepts_the_legacy_optional_alias() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [
            { "name": "bio", "propertyType": "string", "optional": true },
            { "name": "age", "propertyType": "int", "nullable": true, "optional": false },
        ],
    }))?;
    let user = descriptions.entity("User")?;
    assert!(user.properties[1].nullable, "legacy alias must decode");
    assert!(user.properties[0].nullable, "primary key must win over the legacy alias");
    Ok(())
}

#[test]
fn lazy_accepts_the_legacy_extra_alias() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [
            { "name": "stats", "propertyType": "int", "extra": true },
        ],
    }))?;
    assert!(descriptions.entity("User")?.properties[0].lazy);
    Ok(())
}

#[test]
fn property_defaults_match_the_format_table() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    let user = descriptions.entity("User")?;
    let title = &user.properties[0];
    assert!(title.log_error);
    assert!(title.use_for_equality);
    assert!(!title.nullable);
    assert!(!title.lazy);
    assert!(user.remote);
    assert!(!user.persist);
    assert_eq!(user.cache_size, EntityCacheSize::Group(CacheGroup::Medium));
    Ok(())
}

#[test]
fn version_history_shadows_the_legacy_added_at_version()
-> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "addedAtVersion": "1.0",
        "versionHistory": [{ "version": "2.0" }],
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    let user = descriptions.entity("User")?;
    assert_eq!(user.legacy_added_at_version, None);
    assert_eq!(user.added_at_version().map(ToString::to_string), Some("2.0".to_string()));
    Ok(())
}

#[test]
fn identifier_type_dispatch_covers_all_variants() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "identifier": { "type": "int" },
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(
        descriptions.entity("User")?.identifier.identifier_type,
        IdentifierType::Scalar(ScalarKind::Int),
    );

    let descriptions = decode_entity(json!({
        "name": "User",
        "identifier": { "type": "string", "derivedFromRelationships": ["User"] },
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    let identifier = &descriptions.entity("User")?.identifier;
    let IdentifierType::Relationships(kind, ids) = &identifier.identifier_type else {
        return Err("expected a relationship-derived identifier".into());
    };
    assert_eq!(*kind, ScalarKind::String);
    assert_eq!(ids.len(), 1);

    let descriptions = decode_entity(json!({
        "name": "User",
        "identifier": { "type": "property", "propertyName": "title" },
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(
        descriptions.entity("User")?.identifier.identifier_type,
        IdentifierType::Property("title".to_string()),
    );

    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(descriptions.entity("User")?.identifier.identifier_type, IdentifierType::Void);
    Ok(())
}

#[test]
fn unknown_identifier_types_fail_loudly() {
    let result = decode_entity(json!({
        "name": "User",
        "identifier": { "type": "uuid7" },
        "properties": [{ "name": "title", "propertyType": "string" }],
    }));
    assert!(matches!(result, Err(DescriptionError::UnsupportedType(kind)) if kind == "uuid7"));
}

#[test]
fn cache_size_accepts_group_words_and_fixed_counts() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "cacheSize": "large",
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(
        descriptions.entity("User")?.cache_size,
        EntityCacheSize::Group(CacheGroup::Large),
    );

    let descriptions = decode_entity(json!({
        "name": "User",
        "cacheSize": 512,
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(descriptions.entity("User")?.cache_size, EntityCacheSize::Fixed(512));
    Ok(())
}

#[test]
fn entity_properties_reject_dictionary_types() {
    let result = decode_entity(json!({
        "name": "User",
        "properties": [{ "name": "flags", "propertyType": "[string:bool]" }],
    }));
    assert!(matches!(result, Err(DescriptionError::UnsupportedType(_))));
}

#[test]
fn nested_array_types_parse_for_entity_properties() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "properties": [{ "name": "grid", "propertyType": "[[int]]" }],
    }))?;
    let grid = &descriptions.entity("User")?.properties[0];
    let PropertyType::Array(inner) = &grid.property_type else {
        return Err("expected an array type".into());
    };
    let PropertyType::Array(innermost) = inner.as_ref() else {
        return Err("expected a nested array type".into());
    };
    assert_eq!(**innermost, PropertyType::Scalar(ScalarKind::Int));
    Ok(())
}

#[test]
fn subtype_shape_precedence_prefers_cases() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = Descriptions::from_json_value(json!({
        "subtypes": [{
            "name": "plan",
            "cases": ["free", "premium"],
            "options": ["ignored"],
        }],
        "version": "1.0",
    }))?;
    let plan = descriptions.subtype("plan")?;
    assert!(matches!(&plan.items, SubtypeItems::Cases { used, .. } if used.len() == 2));
    Ok(())
}

#[test]
fn subtype_properties_drop_unused_and_sort_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = Descriptions::from_json_value(json!({
        "subtypes": [{
            "name": "receipt",
            "properties": [
                { "name": "total", "propertyType": "double" },
                { "name": "legacyCode", "propertyType": "string", "unused": true },
                { "name": "currency", "propertyType": "string" },
            ],
        }],
        "version": "1.0",
    }))?;
    let receipt = descriptions.subtype("receipt")?;
    let SubtypeItems::Properties(properties) = &receipt.items else {
        return Err("expected a property-shaped subtype".into());
    };
    let names: Vec<&str> = properties.iter().map(|property| property.name.as_str()).collect();
    assert_eq!(names, ["currency", "total"]);
    Ok(())
}

#[test]
fn an_explicit_empty_case_list_still_selects_the_case_shape()
-> Result<(), Box<dyn std::error::Error>> {
    let descriptions = Descriptions::from_json_value(json!({
        "subtypes": [{ "name": "plan", "cases": [] }],
        "version": "1.0",
    }))?;
    let plan = descriptions.subtype("plan")?;
    assert!(matches!(&plan.items, SubtypeItems::Cases { used, .. } if used.is_empty()));
    assert_eq!(plan.used_cases()?, &[] as &[String]);
    Ok(())
}

#[test]
fn used_cases_fails_for_non_case_shapes() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = Descriptions::from_json_value(json!({
        "subtypes": [{ "name": "permissions", "options": ["read", "write"] }],
        "version": "1.0",
    }))?;
    let permissions = descriptions.subtype("permissions")?;
    assert!(matches!(
        permissions.used_cases(),
        Err(DescriptionError::SubtypeDoesNotHaveAnyCase(name)) if name == "permissions",
    ));
    Ok(())
}

#[test]
fn subtype_without_any_shape_is_corrupted_data() {
    let result = Descriptions::from_json_value(json!({
        "subtypes": [{ "name": "mystery" }],
        "version": "1.0",
    }));
    assert!(matches!(result, Err(DescriptionError::DataCorrupted(_))));
}

#[test]
fn subtype_property_requires_default_when_not_logging() {
    let result = Descriptions::from_json_value(json!({
        "subtypes": [{
            "name": "receipt",
            "properties": [
                { "name": "total", "propertyType": "double", "logError": false },
            ],
        }],
        "version": "1.0",
    }));
    assert!(
        matches!(result, Err(DescriptionError::DataCorrupted(message)) if message.contains("logError")),
    );
}

#[test]
fn duplicate_entity_names_are_rejected() {
    let result = Descriptions::from_json_value(json!({
        "entities": [
            { "name": "User", "properties": [{ "name": "a", "propertyType": "string" }] },
            { "name": "User", "properties": [{ "name": "b", "propertyType": "string" }] },
        ],
        "version": "1.0",
    }));
    assert!(matches!(result, Err(DescriptionError::DuplicateName(name)) if name == "User"));
}

#[test]
fn dangling_relationship_targets_are_rejected() {
    let result = Descriptions::from_json_value(json!({
        "entities": [{
            "name": "User",
            "properties": [{
                "name": "library",
                "relationship": { "entityName": "Library", "association": "toOne" },
            }],
        }],
        "version": "1.0",
    }));
    assert!(matches!(result, Err(DescriptionError::EntityNotFound(name)) if name == "Library"));
}

#[test]
fn persisted_entities_require_an_identifier() {
    let result = decode_entity(json!({
        "name": "User",
        "persist": true,
        "properties": [{ "name": "title", "propertyType": "string" }],
    }));
    assert!(
        matches!(result, Err(DescriptionError::CannotPersistIdentifier(name)) if name == "User"),
    );
}

#[test]
fn unknown_keys_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let descriptions = decode_entity(json!({
        "name": "User",
        "futureKnob": { "nested": true },
        "properties": [{ "name": "title", "propertyType": "string" }],
    }))?;
    assert_eq!(descriptions.entity("User")?.name, "User");
    Ok(())
}
