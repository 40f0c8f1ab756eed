// crates/scribe-core/src/model/subtype.rs
// ============================================================================
// Module: Scribe Subtype Model
// Description: Reusable value types as cases, option flags, or products.
// Purpose: Describe named value types shared across entities and payloads.
// Dependencies: crate::model::{primitives, property}
// ============================================================================

//! ## Overview
//! A subtype is a named value type in exactly one of three shapes: an
//! enumeration of cases, a set of option flags, or a product of
//! properties. The serialization format resolves the shape by key
//! presence with `cases` taking precedence over `options` and `options`
//! over `properties`.
//!
//! Subtype properties either log decoding failures or carry a default;
//! the format rejects declarations with neither.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::errors::DescriptionError;
use crate::model::primitives::DefaultValue;
use crate::model::primitives::Platform;
use crate::model::property::PropertyType;

// ============================================================================
// SECTION: Subtype Properties
// ============================================================================

/// Property of a product-shaped subtype.
///
/// # Invariants
/// - `log_error` is true or `default_value` is present.
/// - `key` defaults to `name` when the input omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeProperty {
    /// Property name in generated code.
    pub name: String,
    /// Payload key the property decodes from.
    pub key: String,
    /// Value type; dictionaries are permitted here.
    pub property_type: PropertyType,
    /// Whether the value may be null.
    pub nullable: bool,
    /// Default applied when the payload omits the value.
    pub default_value: Option<DefaultValue>,
    /// Log decoding failures for this property.
    pub log_error: bool,
    /// Expose through Objective-C interop.
    pub objc: bool,
    /// Excluded from generated output while kept in the schema.
    pub unused: bool,
    /// Platforms the property is generated for.
    pub platforms: BTreeSet<Platform>,
}

// ============================================================================
// SECTION: Subtype Shapes
// ============================================================================

/// The three shapes a subtype can take.
///
/// # Invariants
/// - Exactly one shape appears in the input for any subtype.
/// - [`SubtypeItems::Properties`] holds used properties sorted by name;
///   unused declarations are dropped at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtypeItems {
    /// Enumeration of named cases.
    Cases {
        /// Cases generated into the output.
        used: Vec<String>,
        /// Cases kept in the schema but not generated.
        unused: Vec<String>,
        /// Generate an Objective-C `none` case for optional bridging.
        objc_none_case: bool,
    },
    /// Set of named option flags.
    Options {
        /// Options generated into the output.
        used: Vec<String>,
        /// Options kept in the schema but not generated.
        unused: Vec<String>,
    },
    /// Product of properties.
    Properties(Vec<SubtypeProperty>),
}

// ============================================================================
// SECTION: Subtype
// ============================================================================

/// A reusable named value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtype {
    /// Subtype name; unique within the aggregate.
    pub name: String,
    /// Shape and members.
    pub items: SubtypeItems,
    /// Protocol conformances implemented by hand instead of generated.
    pub manual_implementations: BTreeSet<String>,
    /// Expose through Objective-C interop.
    pub objc: bool,
    /// Platforms the subtype is generated for.
    pub platforms: BTreeSet<Platform>,
}

impl Subtype {
    /// Returns the used case names when this subtype is case-shaped.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::SubtypeDoesNotHaveAnyCase`] for option-
    /// and property-shaped subtypes.
    pub fn used_cases(&self) -> Result<&[String], DescriptionError> {
        match &self.items {
            SubtypeItems::Cases { used, .. } => Ok(used),
            SubtypeItems::Options { .. } | SubtypeItems::Properties(_) => {
                Err(DescriptionError::SubtypeDoesNotHaveAnyCase(self.name.clone()))
            }
        }
    }
}
