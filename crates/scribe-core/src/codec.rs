// crates/scribe-core/src/codec.rs
// ============================================================================
// Module: Scribe Serialization Format
// Description: Lossy-lenient decoding and canonical encoding of descriptions.
// Purpose: Bridge the camelCase wire format and the validated model.
// Dependencies: crate::codec::*, crate::errors, crate::model, serde, serde_json
// ============================================================================

//! ## Overview
//! The codec is a layer of raw mirror shapes between the wire format and
//! the model. Decoding is lenient: unknown keys are ignored, absent
//! fields take their documented defaults, and legacy aliases are accepted
//! with primary-then-legacy precedence. Encoding is canonical: legacy
//! aliases are never emitted and fields equal to their defaults are
//! omitted, with `remote` as the single deliberate exception.
//!
//! After element conversion the aggregate is validated: names are unique
//! within each kind and every reachable reference resolves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde::ser::Error as _;

use crate::errors::DescriptionError;
use crate::model::descriptions::Descriptions;
use crate::model::endpoint::EndpointPayload;
use crate::model::endpoint::ReadWriteEndpointPayload;
use crate::model::entity::Entity;
use crate::model::identifier::IdentifierType;
use crate::model::property::MetadataProperty;
use crate::model::subtype::Subtype;
use crate::model::target::Targets;
use crate::model::version::Version;

/// Entity decoding, migrations, and cache-size forms.
mod entity;
/// Endpoint payload decoding and the shared readWrite form.
mod endpoint;
/// Identifier `type` dispatch.
mod identifier;
/// Property decoding and legacy aliases.
mod property;
/// Subtype shape resolution.
mod subtype;
/// Target triple decoding.
mod target;

use entity::RawEntity;
use endpoint::RawEndpointPayload;
use subtype::RawSubtype;
use target::RawTargets;

// ============================================================================
// SECTION: Raw Descriptions
// ============================================================================

/// Wire shape of the root descriptions object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptions {
    /// Value subtypes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtypes: Vec<RawSubtype>,
    /// Entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    entities: Vec<RawEntity>,
    /// Endpoint payloads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    endpoints: Vec<RawEndpointPayload>,
    /// Generation targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    targets: Option<RawTargets>,
    /// Schema version of the description set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<Version>,
}

impl TryFrom<RawDescriptions> for Descriptions {
    type Error = DescriptionError;

    fn try_from(raw: RawDescriptions) -> Result<Self, Self::Error> {
        let subtypes = raw
            .subtypes
            .into_iter()
            .map(Subtype::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let entities =
            raw.entities.into_iter().map(Entity::try_from).collect::<Result<Vec<_>, _>>()?;
        let endpoints = raw
            .endpoints
            .into_iter()
            .map(EndpointPayload::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        ensure_unique_names(subtypes.iter().map(|subtype| subtype.name.as_str()))?;
        ensure_unique_names(entities.iter().map(|entity| entity.name.as_str()))?;
        ensure_unique_names(endpoints.iter().map(|endpoint| endpoint.name.as_str()))?;

        let descriptions = Self::new(
            subtypes,
            entities,
            endpoints,
            raw.targets.map(Targets::from).unwrap_or_default(),
            raw.version.unwrap_or_else(Version::zero),
        );
        validate_references(&descriptions)?;
        Ok(descriptions)
    }
}

impl TryFrom<&Descriptions> for RawDescriptions {
    type Error = DescriptionError;

    fn try_from(descriptions: &Descriptions) -> Result<Self, Self::Error> {
        let targets = RawTargets::from(&descriptions.targets);
        Ok(Self {
            subtypes: descriptions
                .subtypes
                .iter()
                .map(RawSubtype::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            entities: descriptions
                .entities
                .iter()
                .map(RawEntity::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            endpoints: descriptions
                .endpoints
                .iter()
                .map(RawEndpointPayload::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            targets: (!targets.is_empty()).then_some(targets),
            version: Some(descriptions.version.clone()),
        })
    }
}

// ============================================================================
// SECTION: Aggregate Validation
// ============================================================================

/// Rejects duplicate names within one element kind.
fn ensure_unique_names<'a>(
    names: impl Iterator<Item = &'a str>,
) -> Result<(), DescriptionError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DescriptionError::DuplicateName(name.to_string()));
        }
    }
    Ok(())
}

/// Validates that every reachable name resolves to a member element.
fn validate_references(descriptions: &Descriptions) -> Result<(), DescriptionError> {
    for entity in &descriptions.entities {
        validate_entity_references(descriptions, entity)?;
    }
    for endpoint in &descriptions.endpoints {
        for payload in [endpoint.read_payload.as_ref(), endpoint.write_payload.as_ref()]
            .into_iter()
            .flatten()
        {
            validate_payload_references(descriptions, payload)?;
        }
    }
    Ok(())
}

/// Validates the references reachable from one entity.
fn validate_entity_references(
    descriptions: &Descriptions,
    entity: &Entity,
) -> Result<(), DescriptionError> {
    for property in &entity.properties {
        if let Some(relationship) = property.relationship() {
            descriptions.entity(&relationship.entity_name)?;
        }
        if let Some(subtype_name) = property.property_type.subtype_name() {
            descriptions.subtype(subtype_name)?;
        }
    }
    if let Some(metadata) = &entity.metadata {
        validate_metadata_references(descriptions, metadata)?;
    }
    if let Some(equivalent) = &entity.identifier.equivalent_identifier_name {
        descriptions.entity(equivalent)?;
    }
    match &entity.identifier.identifier_type {
        IdentifierType::Relationships(_, ids) => {
            for id in ids {
                descriptions.entity(&id.entity_name)?;
            }
        }
        IdentifierType::Property(property_name) => {
            if !entity.properties.iter().any(|property| property.name == *property_name) {
                return Err(DescriptionError::PropertyNotFound(
                    entity.name.clone(),
                    property_name.clone(),
                ));
            }
        }
        IdentifierType::Void => {
            if entity.persist {
                return Err(DescriptionError::CannotPersistIdentifier(entity.name.clone()));
            }
        }
        IdentifierType::Scalar(_) => {}
    }
    Ok(())
}

/// Validates the references reachable from one payload side.
fn validate_payload_references(
    descriptions: &Descriptions,
    payload: &ReadWriteEndpointPayload,
) -> Result<(), DescriptionError> {
    descriptions.entity(&payload.entity.entity_name)?;
    if let Some(variations) = &payload.entity_variations {
        for variation in variations {
            descriptions.entity(&variation.entity_name)?;
        }
    }
    if let Some(metadata) = &payload.metadata {
        validate_metadata_references(descriptions, metadata)?;
    }
    Ok(())
}

/// Validates subtype references inside a metadata block.
fn validate_metadata_references(
    descriptions: &Descriptions,
    metadata: &[MetadataProperty],
) -> Result<(), DescriptionError> {
    for property in metadata {
        if let Some(subtype_name) = property.property_type.subtype_name() {
            descriptions.subtype(subtype_name)?;
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

impl Descriptions {
    /// Decodes a description tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Format`] for syntactic failures and the
    /// specific taxonomy variant for semantic ones.
    pub fn from_json_str(input: &str) -> Result<Self, DescriptionError> {
        let raw: RawDescriptions =
            serde_json::from_str(input).map_err(|err| DescriptionError::format(&err))?;
        raw.try_into()
    }

    /// Decodes a description tree from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Format`] for syntactic failures and the
    /// specific taxonomy variant for semantic ones.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DescriptionError> {
        let raw: RawDescriptions =
            serde_json::from_value(value).map_err(|err| DescriptionError::format(&err))?;
        raw.try_into()
    }

    /// Encodes the canonical JSON value for this aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Format`] when serialization fails.
    pub fn to_json_value(&self) -> Result<serde_json::Value, DescriptionError> {
        let raw = RawDescriptions::try_from(self)?;
        serde_json::to_value(raw).map_err(|err| DescriptionError::format(&err))
    }

    /// Encodes the canonical pretty-printed JSON text for this aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Format`] when serialization fails.
    pub fn to_json_string(&self) -> Result<String, DescriptionError> {
        let raw = RawDescriptions::try_from(self)?;
        serde_json::to_string_pretty(&raw).map_err(|err| DescriptionError::format(&err))
    }
}

impl Serialize for Descriptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawDescriptions::try_from(self).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Descriptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDescriptions::deserialize(deserializer)?;
        raw.try_into().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests;
