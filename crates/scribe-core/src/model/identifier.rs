// crates/scribe-core/src/model/identifier.rs
// ============================================================================
// Module: Scribe Identifier Model
// Description: Entity identifier shapes and relationship-derived identifiers.
// Purpose: Describe how entity instances are uniquely addressed.
// Dependencies: crate::model::primitives
// ============================================================================

//! ## Overview
//! An entity identifier is one of four shapes: void (no identifier),
//! a scalar of a given kind, a scalar derived from one or more
//! relationships, or an alias of one of the entity's own properties.
//! Identifiers may additionally declare equivalence with another entity's
//! identifier, which accessors resolve through the aggregate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::model::primitives::ScalarKind;

// ============================================================================
// SECTION: Identifier Shapes
// ============================================================================

/// Reference to an entity whose identifier contributes to a derived
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationshipId {
    /// Canonical name of the contributing entity.
    pub entity_name: String,
}

/// Shape of an entity identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierType {
    /// The entity has no identifier.
    Void,
    /// Scalar identifier of the given kind.
    Scalar(ScalarKind),
    /// Scalar identifier derived from the identifiers of related entities.
    Relationships(ScalarKind, Vec<RelationshipId>),
    /// Identifier aliased to one of the entity's own properties.
    Property(String),
}

/// Identifier declaration attached to an entity.
///
/// # Invariants
/// - `key` defaults to `id` when the input omits it.
/// - `equivalent_identifier_name`, when present, resolves to an entity in
///   the same descriptions aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdentifier {
    /// Payload key the identifier decodes from.
    pub key: String,
    /// Identifier shape.
    pub identifier_type: IdentifierType,
    /// Entity whose identifier namespace this identifier shares.
    pub equivalent_identifier_name: Option<String>,
    /// Expose through Objective-C interop.
    pub objc: bool,
    /// Guard identifier mutation behind atomic storage.
    pub atomic: Option<bool>,
}

impl Default for EntityIdentifier {
    fn default() -> Self {
        Self {
            key: "id".to_string(),
            identifier_type: IdentifierType::Void,
            equivalent_identifier_name: None,
            objc: false,
            atomic: None,
        }
    }
}
