// crates/scribe-core/src/model/property.rs
// ============================================================================
// Module: Scribe Property Model
// Description: Entity, metadata, and system properties and their type algebra.
// Purpose: Provide the property shapes generators read facts from.
// Dependencies: crate::errors, crate::model::{primitives, version}, serde
// ============================================================================

//! ## Overview
//! Properties carry a small type algebra: scalars, relationships to other
//! entities, references to named subtypes, arrays of any of those, and
//! (for subtype properties only) dictionaries. The surface syntax nests
//! with brackets: `[string]` is an array, `[[string]]` a nested array, and
//! `[string:int]` a dictionary. Relationships are spelled as an object on
//! the property rather than a type string.
//!
//! System properties are reserved, generator-managed properties with fixed
//! derivations per name; entity properties must not collide with them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::DescriptionError;
use crate::model::primitives::DefaultValue;
use crate::model::primitives::PersistenceKind;
use crate::model::primitives::Platform;
use crate::model::primitives::ScalarKind;
use crate::model::version::Version;

// ============================================================================
// SECTION: Relationships
// ============================================================================

/// Cardinality of a relationship property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Association {
    /// Single target instance.
    ToOne,
    /// Collection of target instances.
    ToMany,
}

/// Relationship from a property to another entity, by name.
///
/// # Invariants
/// - `entity_name` resolves through the descriptions aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    /// Target entity name.
    pub entity_name: String,
    /// Relationship cardinality.
    pub association: Association,
    /// Serialize only the target identifier, not an embedded payload.
    pub id_only: bool,
    /// Drop undecodable collection items instead of failing the payload.
    pub failable_items: bool,
    /// Platforms the relationship is generated for.
    pub platforms: BTreeSet<Platform>,
}

// ============================================================================
// SECTION: Property Types
// ============================================================================

/// Type of a property value.
///
/// # Invariants
/// - [`PropertyType::Dictionary`] is legal for subtype properties only;
///   entity and metadata decoding reject it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// Scalar value.
    Scalar(ScalarKind),
    /// Relationship to another entity.
    Relationship(Relationship),
    /// Reference to a named subtype.
    Subtype(String),
    /// Array of another property type; arrays nest.
    Array(Box<PropertyType>),
    /// Dictionary keyed and valued by property types.
    Dictionary(Box<PropertyType>, Box<PropertyType>),
}

impl PropertyType {
    /// Parses the bracketed surface syntax used by the description format.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::UnsupportedType`] when the string is not
    /// a scalar surface name, a bracketed composite, or a plausible
    /// subtype name.
    pub fn parse_surface(input: &str) -> Result<Self, DescriptionError> {
        let trimmed = input.trim();
        if let Some(inner) =
            trimmed.strip_prefix('[').and_then(|body| body.strip_suffix(']'))
        {
            if let Some((key, value)) = split_dictionary(inner) {
                let key_type = Self::parse_surface(key)?;
                let value_type = Self::parse_surface(value)?;
                return Ok(Self::Dictionary(Box::new(key_type), Box::new(value_type)));
            }
            return Ok(Self::Array(Box::new(Self::parse_surface(inner)?)));
        }
        if let Some(kind) = ScalarKind::from_surface_name(trimmed) {
            return Ok(Self::Scalar(kind));
        }
        if is_type_name(trimmed) {
            return Ok(Self::Subtype(trimmed.to_string()));
        }
        Err(DescriptionError::UnsupportedType(input.to_string()))
    }

    /// Renders the canonical surface string, when one exists.
    ///
    /// Relationships have no surface string; they serialize as an object.
    #[must_use]
    pub fn surface_string(&self) -> Option<String> {
        match self {
            Self::Scalar(kind) => Some(kind.surface_name().to_string()),
            Self::Relationship(_) => None,
            Self::Subtype(name) => Some(name.clone()),
            Self::Array(inner) => inner.surface_string().map(|body| format!("[{body}]")),
            Self::Dictionary(key, value) => match (key.surface_string(), value.surface_string()) {
                (Some(key), Some(value)) => Some(format!("[{key}:{value}]")),
                _ => None,
            },
        }
    }

    /// Returns the relationship carried by this type, looking through
    /// arrays.
    #[must_use]
    pub fn relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(relationship) => Some(relationship),
            Self::Array(inner) => inner.relationship(),
            Self::Scalar(_) | Self::Subtype(_) | Self::Dictionary(_, _) => None,
        }
    }

    /// Returns the subtype name referenced by this type, looking through
    /// composites.
    #[must_use]
    pub fn subtype_name(&self) -> Option<&str> {
        match self {
            Self::Subtype(name) => Some(name),
            Self::Array(inner) => inner.subtype_name(),
            Self::Dictionary(key, value) => key.subtype_name().or_else(|| value.subtype_name()),
            Self::Scalar(_) | Self::Relationship(_) => None,
        }
    }

    /// Returns true when a dictionary appears anywhere in the type.
    #[must_use]
    pub fn contains_dictionary(&self) -> bool {
        match self {
            Self::Dictionary(_, _) => true,
            Self::Array(inner) => inner.contains_dictionary(),
            Self::Scalar(_) | Self::Relationship(_) | Self::Subtype(_) => false,
        }
    }
}

/// Splits a bracket body at the top-level dictionary separator.
fn split_dictionary(body: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (index, character) in body.char_indices() {
        match character {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some((&body[..index], &body[index + 1..])),
            _ => {}
        }
    }
    None
}

/// Returns true for plausible subtype or entity type names.
fn is_type_name(value: &str) -> bool {
    let mut characters = value.chars();
    let Some(first) = characters.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && characters.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// SECTION: Entity Properties
// ============================================================================

/// Property declared on an entity.
///
/// # Invariants
/// - `name` never equals a reserved system-property name.
/// - `key` defaults to `name` when the input omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityProperty {
    /// Property name in generated code.
    pub name: String,
    /// Payload key the property decodes from.
    pub key: String,
    /// Match the payload key verbatim instead of through key heuristics.
    pub match_exact_key: bool,
    /// Name the property carried before a rename.
    pub previous_name: Option<String>,
    /// Column name used by the persistence layer when it differs.
    pub persisted_name: Option<String>,
    /// Schema version the property first appeared in.
    pub added_at_version: Option<Version>,
    /// Value type.
    pub property_type: PropertyType,
    /// Whether the value may be null.
    pub nullable: bool,
    /// Default applied when the payload omits the value.
    pub default_value: Option<DefaultValue>,
    /// Log decoding failures for this property.
    pub log_error: bool,
    /// Participate in generated equality.
    pub use_for_equality: bool,
    /// Generated setter visibility.
    pub mutable: bool,
    /// Expose through Objective-C interop.
    pub objc: bool,
    /// Excluded from generated output while kept in the schema.
    pub unused: bool,
    /// Fetched on demand rather than eagerly decoded.
    pub lazy: bool,
    /// Platforms the property is generated for.
    pub platforms: BTreeSet<Platform>,
}

impl EntityProperty {
    /// Returns the relationship when this property is one.
    #[must_use]
    pub fn relationship(&self) -> Option<&Relationship> {
        self.property_type.relationship()
    }

    /// Returns true when this property is a relationship.
    #[must_use]
    pub fn is_relationship(&self) -> bool {
        self.relationship().is_some()
    }
}

// ============================================================================
// SECTION: Metadata Properties
// ============================================================================

/// Property of an entity or payload metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataProperty {
    /// Property name in generated code.
    pub name: String,
    /// Payload key the property decodes from.
    pub key: String,
    /// Value type; dictionaries are rejected for metadata.
    pub property_type: PropertyType,
    /// Whether the value may be null.
    pub nullable: bool,
}

// ============================================================================
// SECTION: System Properties
// ============================================================================

/// Names of the reserved, generator-managed properties.
///
/// # Invariants
/// - The derived ordering matches the canonical-name lexicographic order
///   used to sort entity system properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPropertyName {
    /// Tracks whether the local value has been synchronized upstream.
    IsSynced,
    /// Tracks the last time the value was read from the remote.
    LastRemoteRead,
}

impl SystemPropertyName {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::IsSynced => "is_synced",
            Self::LastRemoteRead => "last_remote_read",
        }
    }

    /// Returns true when `name` is reserved for a system property.
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        name == Self::IsSynced.canonical_name() || name == Self::LastRemoteRead.canonical_name()
    }
}

/// Reserved property attached to an entity by the generator.
///
/// # Invariants
/// - `use_legacy_naming` is set only by the legacy `lastRemoteRead`
///   migration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProperty {
    /// Which reserved property this is.
    pub name: SystemPropertyName,
    /// Schema version the property first appeared in.
    pub added_at_version: Option<Version>,
    /// Keep the pre-migration generated spelling.
    pub use_legacy_naming: bool,
}

impl SystemProperty {
    /// Returns the fixed value type for this property name.
    #[must_use]
    pub const fn property_type(&self) -> PropertyType {
        match self.name {
            SystemPropertyName::IsSynced => PropertyType::Scalar(ScalarKind::Bool),
            SystemPropertyName::LastRemoteRead => PropertyType::Scalar(ScalarKind::Date),
        }
    }

    /// Returns the fixed nullability for this property name.
    #[must_use]
    pub const fn nullable(&self) -> bool {
        match self.name {
            SystemPropertyName::IsSynced => false,
            SystemPropertyName::LastRemoteRead => true,
        }
    }

    /// Returns the fixed default value for this property name.
    #[must_use]
    pub fn default_value(&self) -> Option<DefaultValue> {
        match self.name {
            SystemPropertyName::IsSynced => Some(DefaultValue::Bool(false)),
            SystemPropertyName::LastRemoteRead => None,
        }
    }

    /// Returns the fixed mutability for this property name.
    #[must_use]
    pub const fn mutable(&self) -> bool {
        match self.name {
            SystemPropertyName::IsSynced => true,
            SystemPropertyName::LastRemoteRead => false,
        }
    }

    /// Returns the persistence representation for this property name.
    #[must_use]
    pub const fn persistence_kind(&self) -> PersistenceKind {
        match self.name {
            SystemPropertyName::IsSynced => ScalarKind::Bool.persistence_kind(),
            SystemPropertyName::LastRemoteRead => ScalarKind::Date.persistence_kind(),
        }
    }
}

#[cfg(test)]
mod tests;
