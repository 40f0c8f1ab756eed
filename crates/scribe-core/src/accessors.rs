// crates/scribe-core/src/accessors.rs
// ============================================================================
// Module: Scribe Accessors
// Description: Pure derived facts computed over the descriptions aggregate.
// Purpose: Provide the queries generators consume without caching state.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! Accessors are pure, non-caching computations. Property slices order an
//! entity's used properties as generators emit them: plain values first,
//! then relationships, then system properties. Graph walks over the
//! relationship graph live in [`graph`], version-history derivations in
//! [`history`], and payload classification in [`payload`].

/// Relationship-graph walks.
pub mod graph;
/// Version-history derivations.
pub mod history;
/// Endpoint payload classification.
pub mod payload;

pub use history::VersionRange;
pub use payload::PayloadInitializer;

use crate::model::entity::Entity;
use crate::model::property::EntityProperty;
use crate::model::property::SystemProperty;

// ============================================================================
// SECTION: Property Slices
// ============================================================================

/// One slot in the combined property ordering of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertySlot<'a> {
    /// A declared entity property.
    Declared(&'a EntityProperty),
    /// A reserved system property.
    System(&'a SystemProperty),
}

impl PropertySlot<'_> {
    /// Returns the property name of this slot.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Declared(property) => &property.name,
            Self::System(property) => property.name.canonical_name(),
        }
    }
}

impl Entity {
    /// Returns the properties that participate in generation.
    #[must_use]
    pub fn used_properties(&self) -> Vec<&EntityProperty> {
        self.properties.iter().filter(|property| !property.unused).collect()
    }

    /// Returns the used properties that are not relationships.
    #[must_use]
    pub fn values(&self) -> Vec<&EntityProperty> {
        self.used_properties().into_iter().filter(|property| !property.is_relationship()).collect()
    }

    /// Returns the used properties that are relationships.
    #[must_use]
    pub fn relationships(&self) -> Vec<&EntityProperty> {
        self.used_properties().into_iter().filter(|property| property.is_relationship()).collect()
    }

    /// Returns values followed by relationships.
    #[must_use]
    pub fn values_then_relationships(&self) -> Vec<&EntityProperty> {
        let mut ordered = self.values();
        ordered.extend(self.relationships());
        ordered
    }

    /// Returns values, then relationships, then system properties.
    #[must_use]
    pub fn values_then_relationships_then_system_properties(&self) -> Vec<PropertySlot<'_>> {
        let mut ordered: Vec<PropertySlot<'_>> =
            self.values_then_relationships().into_iter().map(PropertySlot::Declared).collect();
        ordered.extend(self.system_properties.iter().map(PropertySlot::System));
        ordered
    }
}
