// crates/scribe-core/src/codec/property.rs
// ============================================================================
// Module: Property Codec
// Description: Raw wire shapes for entity, metadata, and system properties.
// Purpose: Decode lenient camelCase input and emit canonical minimal output.
// Dependencies: crate::errors, crate::model, serde
// ============================================================================

//! ## Overview
//! Property input carries historical drift: `optional` for `nullable`,
//! `extra` for `lazy`, and `legacyPreviousName` for `previousName`. The
//! raw shapes accept both spellings with primary-then-legacy precedence
//! and the canonical conversions never emit the legacy keys back out.
//! Fields equal to their defaults are omitted on output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::DescriptionError;
use crate::model::primitives::DefaultValue;
use crate::model::primitives::Platform;
use crate::model::property::Association;
use crate::model::property::EntityProperty;
use crate::model::property::MetadataProperty;
use crate::model::property::PropertyType;
use crate::model::property::Relationship;
use crate::model::property::SystemProperty;
use crate::model::property::SystemPropertyName;
use crate::model::version::Version;

// ============================================================================
// SECTION: Relationships
// ============================================================================

/// Wire shape of a relationship declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRelationship {
    /// Target entity name.
    pub entity_name: String,
    /// Relationship cardinality.
    pub association: Association,
    /// Serialize only the target identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_only: Option<bool>,
    /// Drop undecodable collection items instead of failing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failable_items: Option<bool>,
    /// Platform restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<Platform>>,
}

impl From<RawRelationship> for Relationship {
    fn from(raw: RawRelationship) -> Self {
        Self {
            entity_name: raw.entity_name,
            association: raw.association,
            id_only: raw.id_only.unwrap_or(false),
            failable_items: raw.failable_items.unwrap_or(true),
            platforms: raw.platforms.unwrap_or_default(),
        }
    }
}

impl From<&Relationship> for RawRelationship {
    fn from(relationship: &Relationship) -> Self {
        Self {
            entity_name: relationship.entity_name.clone(),
            association: relationship.association,
            id_only: relationship.id_only.then_some(true),
            failable_items: (!relationship.failable_items).then_some(false),
            platforms: (!relationship.platforms.is_empty())
                .then(|| relationship.platforms.clone()),
        }
    }
}

// ============================================================================
// SECTION: Entity Properties
// ============================================================================

/// Wire shape of an entity property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntityProperty {
    /// Property name.
    pub name: String,
    /// Payload key override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Match the payload key verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_exact_key: Option<bool>,
    /// Pre-rename property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    /// Legacy spelling of `previousName`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_previous_name: Option<String>,
    /// Store column override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_name: Option<String>,
    /// Version the property first appeared in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at_version: Option<Version>,
    /// Surface type string; mutually exclusive with `relationship`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    /// Relationship declaration; mutually exclusive with `propertyType`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RawRelationship>,
    /// Nullability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Legacy spelling of `nullable`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Default applied when the payload omits the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    /// Log decoding failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_error: Option<bool>,
    /// Participate in generated equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_for_equality: Option<bool>,
    /// Generated setter visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutable: Option<bool>,
    /// Objective-C interop flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objc: Option<bool>,
    /// Keep in schema but exclude from generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused: Option<bool>,
    /// Fetch on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    /// Legacy spelling of `lazy`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<bool>,
    /// Platform restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<Platform>>,
}

impl TryFrom<RawEntityProperty> for EntityProperty {
    type Error = DescriptionError;

    fn try_from(raw: RawEntityProperty) -> Result<Self, Self::Error> {
        let property_type = resolve_property_type(
            &raw.name,
            raw.property_type,
            raw.relationship,
            DictionaryPolicy::Reject,
        )?;
        let key = raw.key.unwrap_or_else(|| raw.name.clone());
        Ok(Self {
            key,
            match_exact_key: raw.match_exact_key.unwrap_or(false),
            previous_name: raw.previous_name.or(raw.legacy_previous_name),
            persisted_name: raw.persisted_name,
            added_at_version: raw.added_at_version,
            property_type,
            nullable: raw.nullable.or(raw.optional).unwrap_or(false),
            default_value: raw.default_value,
            log_error: raw.log_error.unwrap_or(true),
            use_for_equality: raw.use_for_equality.unwrap_or(true),
            mutable: raw.mutable.unwrap_or(false),
            objc: raw.objc.unwrap_or(false),
            unused: raw.unused.unwrap_or(false),
            lazy: raw.lazy.or(raw.extra).unwrap_or(false),
            platforms: raw.platforms.unwrap_or_default(),
            name: raw.name,
        })
    }
}

impl From<&EntityProperty> for RawEntityProperty {
    fn from(property: &EntityProperty) -> Self {
        let (property_type, relationship) = encode_property_type(&property.property_type);
        Self {
            name: property.name.clone(),
            key: (property.key != property.name).then(|| property.key.clone()),
            match_exact_key: property.match_exact_key.then_some(true),
            previous_name: property.previous_name.clone(),
            legacy_previous_name: None,
            persisted_name: property.persisted_name.clone(),
            added_at_version: property.added_at_version.clone(),
            property_type,
            relationship,
            nullable: property.nullable.then_some(true),
            optional: None,
            default_value: property.default_value.clone(),
            log_error: (!property.log_error).then_some(false),
            use_for_equality: (!property.use_for_equality).then_some(false),
            mutable: property.mutable.then_some(true),
            objc: property.objc.then_some(true),
            unused: property.unused.then_some(true),
            lazy: property.lazy.then_some(true),
            extra: None,
            platforms: (!property.platforms.is_empty()).then(|| property.platforms.clone()),
        }
    }
}

// ============================================================================
// SECTION: Type Resolution
// ============================================================================

/// Whether dictionary types are legal in the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DictionaryPolicy {
    /// Dictionaries are permitted (subtype properties).
    Allow,
    /// Dictionaries are rejected (entity and metadata properties).
    Reject,
}

/// Resolves the surface type string / relationship object pair declared on
/// a property.
pub(crate) fn resolve_property_type(
    property_name: &str,
    surface: Option<String>,
    relationship: Option<RawRelationship>,
    dictionaries: DictionaryPolicy,
) -> Result<PropertyType, DescriptionError> {
    match (surface, relationship) {
        (None, Some(raw)) => Ok(PropertyType::Relationship(raw.into())),
        (Some(surface), None) => {
            let parsed = PropertyType::parse_surface(&surface)?;
            if dictionaries == DictionaryPolicy::Reject && parsed.contains_dictionary() {
                return Err(DescriptionError::UnsupportedType(surface));
            }
            Ok(parsed)
        }
        (Some(_), Some(_)) => Err(DescriptionError::DataCorrupted(format!(
            "property '{property_name}' declares both a type and a relationship"
        ))),
        (None, None) => Err(DescriptionError::DataCorrupted(format!(
            "property '{property_name}' declares no type"
        ))),
    }
}

/// Splits a property type into its wire pair: a surface string or a
/// relationship object.
pub(crate) fn encode_property_type(
    property_type: &PropertyType,
) -> (Option<String>, Option<RawRelationship>) {
    match property_type {
        PropertyType::Relationship(relationship) => {
            (None, Some(RawRelationship::from(relationship)))
        }
        _ => (property_type.surface_string(), None),
    }
}

// ============================================================================
// SECTION: Metadata Properties
// ============================================================================

/// Wire shape of a metadata property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMetadataProperty {
    /// Property name.
    pub name: String,
    /// Payload key override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Surface type string.
    pub property_type: String,
    /// Nullability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Legacy spelling of `nullable`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl TryFrom<RawMetadataProperty> for MetadataProperty {
    type Error = DescriptionError;

    fn try_from(raw: RawMetadataProperty) -> Result<Self, Self::Error> {
        let property_type = resolve_property_type(
            &raw.name,
            Some(raw.property_type),
            None,
            DictionaryPolicy::Reject,
        )?;
        let key = raw.key.unwrap_or_else(|| raw.name.clone());
        Ok(Self {
            key,
            property_type,
            nullable: raw.nullable.or(raw.optional).unwrap_or(false),
            name: raw.name,
        })
    }
}

impl TryFrom<&MetadataProperty> for RawMetadataProperty {
    type Error = DescriptionError;

    fn try_from(property: &MetadataProperty) -> Result<Self, Self::Error> {
        let surface = property.property_type.surface_string().ok_or_else(|| {
            DescriptionError::DataCorrupted(format!(
                "metadata property '{}' has no surface type",
                property.name
            ))
        })?;
        Ok(Self {
            name: property.name.clone(),
            key: (property.key != property.name).then(|| property.key.clone()),
            property_type: surface,
            nullable: property.nullable.then_some(true),
            optional: None,
        })
    }
}

/// Converts a metadata block, when present.
pub(crate) fn metadata_from_raw(
    raw: Option<Vec<RawMetadataProperty>>,
) -> Result<Option<Vec<MetadataProperty>>, DescriptionError> {
    raw.map(|properties| {
        properties.into_iter().map(MetadataProperty::try_from).collect::<Result<Vec<_>, _>>()
    })
    .transpose()
}

/// Encodes a metadata block, when present.
pub(crate) fn metadata_to_raw(
    metadata: Option<&Vec<MetadataProperty>>,
) -> Result<Option<Vec<RawMetadataProperty>>, DescriptionError> {
    metadata
        .map(|properties| {
            properties.iter().map(RawMetadataProperty::try_from).collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

// ============================================================================
// SECTION: System Properties
// ============================================================================

/// Wire shape of a system property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSystemProperty {
    /// Reserved property name.
    pub name: SystemPropertyName,
    /// Version the property first appeared in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at_version: Option<Version>,
    /// Keep the pre-migration generated spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_legacy_naming: Option<bool>,
}

impl From<RawSystemProperty> for SystemProperty {
    fn from(raw: RawSystemProperty) -> Self {
        Self {
            name: raw.name,
            added_at_version: raw.added_at_version,
            use_legacy_naming: raw.use_legacy_naming.unwrap_or(false),
        }
    }
}

impl From<&SystemProperty> for RawSystemProperty {
    fn from(property: &SystemProperty) -> Self {
        Self {
            name: property.name,
            added_at_version: property.added_at_version.clone(),
            use_legacy_naming: property.use_legacy_naming.then_some(true),
        }
    }
}
