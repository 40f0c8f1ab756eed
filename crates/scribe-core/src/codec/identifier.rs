// crates/scribe-core/src/codec/identifier.rs
// ============================================================================
// Module: Identifier Codec
// Description: Raw wire shape for entity identifier declarations.
// Purpose: Dispatch the `type` string into the identifier sum type.
// Dependencies: crate::errors, crate::model, serde
// ============================================================================

//! ## Overview
//! The identifier `type` string selects the variant: `property` reads a
//! `propertyName`, a scalar surface name reads either a plain scalar or a
//! relationship-derived identifier (when `derivedFromRelationships` is
//! present), and absence means void. Unknown type strings fail loudly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::errors::DescriptionError;
use crate::model::identifier::EntityIdentifier;
use crate::model::identifier::IdentifierType;
use crate::model::identifier::RelationshipId;
use crate::model::primitives::ScalarKind;

// ============================================================================
// SECTION: Raw Identifier
// ============================================================================

/// Wire shape of an identifier declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawIdentifier {
    /// Variant selector: absent, `property`, or a scalar surface name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<String>,
    /// Payload key override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Property name for `type = "property"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    /// Entity names deriving a relationship identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from_relationships: Option<Vec<String>>,
    /// Entity whose identifier namespace is shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equivalent_identifier_name: Option<String>,
    /// Objective-C interop flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objc: Option<bool>,
    /// Atomic storage flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic: Option<bool>,
}

impl TryFrom<RawIdentifier> for EntityIdentifier {
    type Error = DescriptionError;

    fn try_from(raw: RawIdentifier) -> Result<Self, Self::Error> {
        let identifier_type = match raw.identifier_type.as_deref() {
            None => IdentifierType::Void,
            Some("property") => {
                let name = raw.property_name.ok_or_else(|| {
                    DescriptionError::DataCorrupted(
                        "identifier type 'property' requires a property name".to_string(),
                    )
                })?;
                IdentifierType::Property(name)
            }
            Some(surface) => {
                let kind = ScalarKind::from_surface_name(surface)
                    .ok_or_else(|| DescriptionError::UnsupportedType(surface.to_string()))?;
                match raw.derived_from_relationships {
                    Some(names) => IdentifierType::Relationships(
                        kind,
                        names
                            .into_iter()
                            .map(|entity_name| RelationshipId { entity_name })
                            .collect(),
                    ),
                    None => IdentifierType::Scalar(kind),
                }
            }
        };
        Ok(Self {
            key: raw.key.unwrap_or_else(|| "id".to_string()),
            identifier_type,
            equivalent_identifier_name: raw.equivalent_identifier_name,
            objc: raw.objc.unwrap_or(false),
            atomic: raw.atomic,
        })
    }
}

impl From<&EntityIdentifier> for RawIdentifier {
    fn from(identifier: &EntityIdentifier) -> Self {
        let (identifier_type, property_name, derived_from_relationships) =
            match &identifier.identifier_type {
                IdentifierType::Void => (None, None, None),
                IdentifierType::Scalar(kind) => {
                    (Some(kind.surface_name().to_string()), None, None)
                }
                IdentifierType::Relationships(kind, ids) => (
                    Some(kind.surface_name().to_string()),
                    None,
                    Some(ids.iter().map(|id| id.entity_name.clone()).collect()),
                ),
                IdentifierType::Property(name) => {
                    (Some("property".to_string()), Some(name.clone()), None)
                }
            };
        Self {
            identifier_type,
            key: (identifier.key != "id").then(|| identifier.key.clone()),
            property_name,
            derived_from_relationships,
            equivalent_identifier_name: identifier.equivalent_identifier_name.clone(),
            objc: identifier.objc.then_some(true),
            atomic: identifier.atomic,
        }
    }
}

/// Returns true when the identifier would serialize as an empty object.
pub(crate) fn is_default_identifier(identifier: &EntityIdentifier) -> bool {
    *identifier == EntityIdentifier::default()
}
