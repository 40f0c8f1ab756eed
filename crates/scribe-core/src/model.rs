// crates/scribe-core/src/model.rs
// ============================================================================
// Module: Scribe Description Model
// Description: In-memory schema for entities, subtypes, and endpoints.
// Purpose: Bind the model submodules and re-export their types.
// Dependencies: crate::model::*
// ============================================================================

//! ## Overview
//! The description model is a set of plain data types dominated by tagged
//! unions: property types, identifier shapes, default values, subtype
//! items, cache sizes, and base keys are all sum types with per-variant
//! payloads. The model is constructed by the codec, validated once, and
//! treated as immutable for the rest of the generation run.

/// Root container and name indexes.
pub mod descriptions;
/// Endpoint payload shapes.
pub mod endpoint;
/// Entity aggregate and version history.
pub mod entity;
/// Identifier shapes.
pub mod identifier;
/// Scalars, platforms, and default values.
pub mod primitives;
/// Property shapes and the type algebra.
pub mod property;
/// Value subtypes.
pub mod subtype;
/// Generation targets.
pub mod target;
/// Schema versions.
pub mod version;

pub use descriptions::Descriptions;
pub use descriptions::MAIN_QUEUE_NAME;
pub use endpoint::BaseKey;
pub use endpoint::EndpointEntityStructure;
pub use endpoint::EndpointPayload;
pub use endpoint::EndpointPayloadEntity;
pub use endpoint::EndpointPayloadTest;
pub use endpoint::EndpointTestKind;
pub use endpoint::EntityVariation;
pub use endpoint::HttpMethod;
pub use endpoint::PropertyRename;
pub use endpoint::ReadWriteEndpointPayload;
pub use entity::CacheGroup;
pub use entity::Entity;
pub use entity::EntityCacheSize;
pub use entity::VersionHistoryItem;
pub use identifier::EntityIdentifier;
pub use identifier::IdentifierType;
pub use identifier::RelationshipId;
pub use primitives::DefaultValue;
pub use primitives::PersistenceKind;
pub use primitives::Platform;
pub use primitives::ScalarKind;
pub use property::Association;
pub use property::EntityProperty;
pub use property::MetadataProperty;
pub use property::PropertyType;
pub use property::Relationship;
pub use property::SystemProperty;
pub use property::SystemPropertyName;
pub use subtype::Subtype;
pub use subtype::SubtypeItems;
pub use subtype::SubtypeProperty;
pub use target::Target;
pub use target::TargetName;
pub use target::Targets;
pub use version::ReleaseKind;
pub use version::Version;
pub use version::VersionSource;
pub use version::VersionTag;
