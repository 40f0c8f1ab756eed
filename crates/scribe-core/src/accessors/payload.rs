// crates/scribe-core/src/accessors/payload.rs
// ============================================================================
// Module: Endpoint Payload Accessors
// Description: Classification of payload shapes for decoder generation.
// Purpose: Derive initializer strategies and exclusion-path rewrites.
// Dependencies: crate::errors, crate::model
// ============================================================================

//! ## Overview
//! Payload decoders are generated from a small classification: where the
//! entity sits relative to the base key and how its structure nests.
//! Excluded paths written against the entity name are additionally
//! rewritten under the payload's root prefix so both spellings match at
//! decode time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::errors::DescriptionError;
use crate::model::endpoint::EndpointEntityStructure;
use crate::model::endpoint::ReadWriteEndpointPayload;
use crate::model::entity::Entity;
use crate::model::identifier::IdentifierType;
use crate::model::primitives::ScalarKind;

// ============================================================================
// SECTION: Initializer Classification
// ============================================================================

/// Strategy a generated decoder uses to reach the entity value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadInitializer {
    /// Decode from the entity key nested under the base key.
    InitFromSubkey,
    /// Map over a nested-array substructure under both keys.
    MapFromSubstruct,
    /// Decode from the base key directly.
    InitFromKey,
    /// Decode from the payload root, optionally through the entity key.
    InitFromRoot(Option<String>),
}

impl ReadWriteEndpointPayload {
    /// Classifies the initializer strategy from the payload's key and
    /// structure configuration.
    #[must_use]
    pub fn initializer_type(&self) -> PayloadInitializer {
        match (&self.base_key, &self.entity.entity_key, self.entity.structure) {
            (
                Some(_),
                Some(_),
                EndpointEntityStructure::Single | EndpointEntityStructure::Array,
            ) => PayloadInitializer::InitFromSubkey,
            (Some(_), Some(_), EndpointEntityStructure::NestedArray) => {
                PayloadInitializer::MapFromSubstruct
            }
            (Some(_), None, _) => PayloadInitializer::InitFromKey,
            (None, _, _) => PayloadInitializer::InitFromRoot(self.entity.entity_key.clone()),
        }
    }

    /// Returns the excluded paths plus root-prefixed rewrites of every
    /// path written against the entity name.
    #[must_use]
    pub fn all_excluded_paths(&self) -> Vec<String> {
        let mut paths = self.excluded_paths.clone();
        let root_prefix = match (&self.base_key, &self.entity.entity_key) {
            (Some(base_key), Some(entity_key)) => {
                Some(format!("{}.{entity_key}", base_key.joined()))
            }
            (Some(base_key), None) => Some(base_key.joined()),
            (None, Some(entity_key)) => Some(entity_key.clone()),
            (None, None) => None,
        };
        if let Some(prefix) = root_prefix {
            for path in &self.excluded_paths {
                if let Some((first, rest)) = path.split_once('.')
                    && first == self.entity.entity_name
                {
                    paths.push(format!("{prefix}.{rest}"));
                }
            }
        }
        paths
    }
}

// ============================================================================
// SECTION: Identifier Scalars
// ============================================================================

/// Returns the scalar kind payload decoders use for an entity identifier.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedPayloadIdentifier`] for
/// property-aliased identifiers, which have no standalone scalar
/// representation in payloads.
pub fn payload_identifier_scalar(
    entity: &Entity,
) -> Result<Option<ScalarKind>, DescriptionError> {
    match &entity.identifier.identifier_type {
        IdentifierType::Void => Ok(None),
        IdentifierType::Scalar(kind) | IdentifierType::Relationships(kind, _) => Ok(Some(*kind)),
        IdentifierType::Property(_) => Err(DescriptionError::UnsupportedPayloadIdentifier),
    }
}

/// Returns the scalar kind metadata blocks use for an entity identifier.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedMetadataIdentifier`] for
/// property-aliased identifiers.
pub fn metadata_identifier_scalar(
    entity: &Entity,
) -> Result<Option<ScalarKind>, DescriptionError> {
    match &entity.identifier.identifier_type {
        IdentifierType::Void => Ok(None),
        IdentifierType::Scalar(kind) | IdentifierType::Relationships(kind, _) => Ok(Some(*kind)),
        IdentifierType::Property(_) => Err(DescriptionError::UnsupportedMetadataIdentifier),
    }
}
