// crates/scribe-core/src/model/entity.rs
// ============================================================================
// Module: Scribe Entity Model
// Description: Entity aggregate, version history, and cache sizing.
// Purpose: Describe a persistable domain object for code generation.
// Dependencies: crate::model::{identifier, primitives, property, version}
// ============================================================================

//! ## Overview
//! An entity binds an identifier, ordered properties, reserved system
//! properties, and a version history. Properties are kept sorted by name
//! and system properties by canonical name; both orderings are established
//! at decode time and relied on by generators for deterministic output.
//!
//! The effective added-at version is the first version-history entry, with
//! the legacy top-level `addedAtVersion` as fallback when the history is
//! empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::model::identifier::EntityIdentifier;
use crate::model::primitives::Platform;
use crate::model::property::EntityProperty;
use crate::model::property::MetadataProperty;
use crate::model::property::SystemProperty;
use crate::model::version::Version;

// ============================================================================
// SECTION: Cache Sizing
// ============================================================================

/// Named cache-size groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheGroup {
    /// Small in-memory cache.
    Small,
    /// Medium in-memory cache.
    Medium,
    /// Large in-memory cache.
    Large,
}

impl CacheGroup {
    /// Returns the surface name used by the serialization format.
    #[must_use]
    pub const fn surface_name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Resolves a surface name.
    #[must_use]
    pub fn from_surface_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

/// In-memory cache sizing for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCacheSize {
    /// One of the named size groups.
    Group(CacheGroup),
    /// Fixed element count.
    Fixed(u32),
}

impl Default for EntityCacheSize {
    fn default() -> Self {
        Self::Group(CacheGroup::Medium)
    }
}

// ============================================================================
// SECTION: Version History
// ============================================================================

/// One step in an entity's schema evolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionHistoryItem {
    /// Version this step applies from.
    pub version: Version,
    /// Name the entity carried before this step, when it was renamed.
    pub previous_name: Option<String>,
    /// Skip migration checks entirely for this step.
    pub ignore_migration_checks: bool,
    /// Property names excluded from migration checks for this step.
    pub ignore_property_migration_checks_on: Vec<String>,
}

// ============================================================================
// SECTION: Entity
// ============================================================================

/// A persistable domain object description.
///
/// # Invariants
/// - `properties` are sorted by name; `system_properties` by canonical
///   name.
/// - No property name equals a reserved system-property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Entity name; unique within the aggregate.
    pub name: String,
    /// Store name used by the persistence layer when it differs.
    pub persisted_name: Option<String>,
    /// Platforms the entity is generated for.
    pub platforms: BTreeSet<Platform>,
    /// The entity is backed by a remote endpoint.
    pub remote: bool,
    /// The entity is written to the local store.
    pub persist: bool,
    /// Identifier declaration.
    pub identifier: EntityIdentifier,
    /// Optional metadata block attached to the entity payload.
    pub metadata: Option<Vec<MetadataProperty>>,
    /// Declared properties, sorted by name.
    pub properties: Vec<EntityProperty>,
    /// Reserved generator-managed properties, sorted by canonical name.
    pub system_properties: Vec<SystemProperty>,
    /// Shared identifier type alias emitted for this entity.
    pub identifier_type_id: Option<String>,
    /// Name the entity carried before a rename, from the legacy field.
    pub legacy_previous_name: Option<String>,
    /// Added-at version from the legacy field, used when the history is
    /// empty.
    pub legacy_added_at_version: Option<Version>,
    /// Ordered schema evolution steps.
    pub version_history: Vec<VersionHistoryItem>,
    /// Generate query-context plumbing for this entity.
    pub query_context: bool,
    /// Client dispatch queue the entity's observers run on.
    pub client_queue_name: Option<String>,
    /// In-memory cache sizing.
    pub cache_size: EntityCacheSize,
    /// Generated type conforms to the sendable concurrency marker.
    pub sendable: bool,
}

impl Entity {
    /// Returns the effective added-at version: the first history entry,
    /// with the legacy field as fallback.
    #[must_use]
    pub fn added_at_version(&self) -> Option<&Version> {
        self.version_history
            .first()
            .map(|item| &item.version)
            .or(self.legacy_added_at_version.as_ref())
    }

    /// Returns the name used by the persistence layer.
    #[must_use]
    pub fn persisted_name(&self) -> &str {
        self.persisted_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns true when any property has a mutable setter.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.properties.iter().any(|property| property.mutable)
    }
}
