// crates/scribe-core/src/codec/entity.rs
// ============================================================================
// Module: Entity Codec
// Description: Raw wire shape for entities, history items, and cache sizes.
// Purpose: Apply entity defaulting, migrations, and normalization rules.
// Dependencies: crate::codec::{identifier, property}, crate::errors,
// crate::model, serde
// ============================================================================

//! ## Overview
//! Entity decoding concentrates the legacy migrations: a present
//! `versionHistory` shadows the top-level `addedAtVersion`, a boolean
//! `lastRemoteRead` appends a synthetic system property unless one is
//! already declared, and `legacyPreviousName` feeds the canonical
//! previous-name slot. Properties are sorted by name and system
//! properties by canonical name before the entity is handed to the model.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::codec::identifier::RawIdentifier;
use crate::codec::identifier::is_default_identifier;
use crate::codec::property::RawEntityProperty;
use crate::codec::property::RawMetadataProperty;
use crate::codec::property::RawSystemProperty;
use crate::codec::property::metadata_from_raw;
use crate::codec::property::metadata_to_raw;
use crate::errors::DescriptionError;
use crate::model::entity::CacheGroup;
use crate::model::entity::Entity;
use crate::model::entity::EntityCacheSize;
use crate::model::entity::VersionHistoryItem;
use crate::model::identifier::EntityIdentifier;
use crate::model::primitives::Platform;
use crate::model::property::EntityProperty;
use crate::model::property::SystemProperty;
use crate::model::property::SystemPropertyName;
use crate::model::version::Version;

// ============================================================================
// SECTION: Cache Size Serialization
// ============================================================================

impl Serialize for EntityCacheSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Group(group) => serializer.serialize_str(group.surface_name()),
            Self::Fixed(count) => serializer.serialize_u32(*count),
        }
    }
}

/// Visitor decoding a cache size from a group word or an integer.
struct CacheSizeVisitor;

impl de::Visitor<'_> for CacheSizeVisitor {
    type Value = EntityCacheSize;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a cache group name or a fixed element count")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        CacheGroup::from_surface_name(value)
            .map(EntityCacheSize::Group)
            .ok_or_else(|| E::custom(format!("unknown cache group '{value}'")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(EntityCacheSize::Fixed)
            .map_err(|_| E::custom(format!("cache size {value} overflows a fixed count")))
    }
}

impl<'de> Deserialize<'de> for EntityCacheSize {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CacheSizeVisitor)
    }
}

// ============================================================================
// SECTION: Version History
// ============================================================================

/// Wire shape of a version-history item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawVersionHistoryItem {
    /// Version this step applies from.
    pub version: Version,
    /// Pre-rename entity name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    /// Skip migration checks for this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_migration_checks: Option<bool>,
    /// Property names excluded from migration checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_property_migration_checks_on: Option<Vec<String>>,
}

impl From<RawVersionHistoryItem> for VersionHistoryItem {
    fn from(raw: RawVersionHistoryItem) -> Self {
        Self {
            version: raw.version,
            previous_name: raw.previous_name,
            ignore_migration_checks: raw.ignore_migration_checks.unwrap_or(false),
            ignore_property_migration_checks_on: raw
                .ignore_property_migration_checks_on
                .unwrap_or_default(),
        }
    }
}

impl From<&VersionHistoryItem> for RawVersionHistoryItem {
    fn from(item: &VersionHistoryItem) -> Self {
        Self {
            version: item.version.clone(),
            previous_name: item.previous_name.clone(),
            ignore_migration_checks: item.ignore_migration_checks.then_some(true),
            ignore_property_migration_checks_on: (!item
                .ignore_property_migration_checks_on
                .is_empty())
            .then(|| item.ignore_property_migration_checks_on.clone()),
        }
    }
}

// ============================================================================
// SECTION: Raw Entity
// ============================================================================

/// Wire shape of an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntity {
    /// Entity name.
    pub name: String,
    /// Store name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_name: Option<String>,
    /// Platform restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<Platform>>,
    /// Remote-backed flag; always emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,
    /// Local persistence flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist: Option<bool>,
    /// Identifier declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<RawIdentifier>,
    /// Metadata block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<RawMetadataProperty>>,
    /// Declared properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<RawEntityProperty>,
    /// Declared system properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system_properties: Vec<RawSystemProperty>,
    /// Shared identifier type alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_type_id: Option<String>,
    /// Pre-rename entity name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    /// Legacy spelling of `previousName`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_previous_name: Option<String>,
    /// Legacy top-level added-at version; shadowed by `versionHistory`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at_version: Option<Version>,
    /// Legacy boolean requesting the last-remote-read system property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_remote_read: Option<bool>,
    /// Schema evolution steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_history: Vec<RawVersionHistoryItem>,
    /// Query-context plumbing flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_context: Option<bool>,
    /// Client dispatch queue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_queue_name: Option<String>,
    /// Cache sizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<EntityCacheSize>,
    /// Sendable conformance flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sendable: Option<bool>,
}

impl TryFrom<RawEntity> for Entity {
    type Error = DescriptionError;

    fn try_from(raw: RawEntity) -> Result<Self, Self::Error> {
        let mut properties = raw
            .properties
            .into_iter()
            .map(EntityProperty::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        for property in &properties {
            if SystemPropertyName::is_reserved(&property.name) {
                return Err(DescriptionError::SystemPropertyNameCollision(
                    property.name.clone(),
                ));
            }
        }
        properties.sort_by(|left, right| left.name.cmp(&right.name));

        let mut system_properties: Vec<SystemProperty> =
            raw.system_properties.into_iter().map(SystemProperty::from).collect();
        if raw.last_remote_read == Some(true) {
            let already_declared = system_properties
                .iter()
                .any(|property| property.name == SystemPropertyName::LastRemoteRead);
            if already_declared {
                return Err(DescriptionError::IncompatiblePropertyKey(
                    SystemPropertyName::LastRemoteRead.canonical_name().to_string(),
                ));
            }
            system_properties.push(SystemProperty {
                name: SystemPropertyName::LastRemoteRead,
                added_at_version: None,
                use_legacy_naming: true,
            });
        }
        system_properties.sort_by_key(|property| property.name);

        let version_history: Vec<VersionHistoryItem> =
            raw.version_history.into_iter().map(VersionHistoryItem::from).collect();
        let legacy_added_at_version =
            if version_history.is_empty() { raw.added_at_version } else { None };

        let identifier =
            raw.identifier.map(EntityIdentifier::try_from).transpose()?.unwrap_or_default();

        Ok(Self {
            persisted_name: raw.persisted_name,
            platforms: raw.platforms.unwrap_or_default(),
            remote: raw.remote.unwrap_or(true),
            persist: raw.persist.unwrap_or(false),
            identifier,
            metadata: metadata_from_raw(raw.metadata)?,
            properties,
            system_properties,
            identifier_type_id: raw.identifier_type_id,
            legacy_previous_name: raw.previous_name.or(raw.legacy_previous_name),
            legacy_added_at_version,
            version_history,
            query_context: raw.query_context.unwrap_or(false),
            client_queue_name: raw.client_queue_name,
            cache_size: raw.cache_size.unwrap_or_default(),
            sendable: raw.sendable.unwrap_or(false),
            name: raw.name,
        })
    }
}

impl TryFrom<&Entity> for RawEntity {
    type Error = DescriptionError;

    fn try_from(entity: &Entity) -> Result<Self, Self::Error> {
        Ok(Self {
            name: entity.name.clone(),
            persisted_name: entity.persisted_name.clone(),
            platforms: (!entity.platforms.is_empty()).then(|| entity.platforms.clone()),
            remote: Some(entity.remote),
            persist: entity.persist.then_some(true),
            identifier: (!is_default_identifier(&entity.identifier))
                .then(|| RawIdentifier::from(&entity.identifier)),
            metadata: metadata_to_raw(entity.metadata.as_ref())?,
            properties: entity.properties.iter().map(RawEntityProperty::from).collect(),
            system_properties: entity
                .system_properties
                .iter()
                .map(RawSystemProperty::from)
                .collect(),
            identifier_type_id: entity.identifier_type_id.clone(),
            previous_name: entity.legacy_previous_name.clone(),
            legacy_previous_name: None,
            added_at_version: entity.legacy_added_at_version.clone(),
            last_remote_read: None,
            version_history: entity
                .version_history
                .iter()
                .map(RawVersionHistoryItem::from)
                .collect(),
            query_context: entity.query_context.then_some(true),
            client_queue_name: entity.client_queue_name.clone(),
            cache_size: (entity.cache_size != EntityCacheSize::default())
                .then_some(entity.cache_size),
            sendable: entity.sendable.then_some(true),
        })
    }
}
