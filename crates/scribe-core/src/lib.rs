// crates/scribe-core/src/lib.rs
// ============================================================================
// Module: Scribe Core Library
// Description: Description model, serialization format, and accessors.
// Purpose: Provide the schema-processing core consumed by generators.
// Dependencies: heck, regex, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Scribe turns declarative descriptions of domain entities, value
//! subtypes, and endpoint payload shapes into the facts code generators
//! need. This crate holds the core: the in-memory model with its
//! normalization and validation rules, the lossy-lenient serialization
//! format with its legacy aliases, the pure accessors deriving
//! relationship closures and version histories, and the lexicon-aware
//! naming transforms.
//!
//! The aggregate is built once by deserialization and treated as
//! immutable for the rest of a generation run; name indexes memoize on
//! first access. Generators — in-process or subprocess extensions —
//! consume it read-only.
//!
//! ## Index
//! - Model: [`Descriptions`], [`Entity`], [`Subtype`], [`EndpointPayload`]
//! - Format: [`Descriptions::from_json_str`], [`Descriptions::to_json_value`]
//! - Accessors: [`accessors`] (graph walks, history, payload shapes)
//! - Naming: [`naming`] (lexicon-aware transforms, process configuration)
//! - Errors: [`DescriptionError`]

/// Derived facts computed over the aggregate.
pub mod accessors;
/// Serialization format between the wire shape and the model.
mod codec;
/// Error taxonomy.
pub mod errors;
/// Description model types.
pub mod model;
/// Name transformations and process-wide configuration.
pub mod naming;

pub use accessors::PayloadInitializer;
pub use accessors::PropertySlot;
pub use accessors::VersionRange;
pub use errors::DescriptionError;
pub use errors::Result;
pub use model::Association;
pub use model::BaseKey;
pub use model::CacheGroup;
pub use model::DefaultValue;
pub use model::Descriptions;
pub use model::EndpointEntityStructure;
pub use model::EndpointPayload;
pub use model::EndpointPayloadEntity;
pub use model::EndpointPayloadTest;
pub use model::EndpointTestKind;
pub use model::Entity;
pub use model::EntityCacheSize;
pub use model::EntityIdentifier;
pub use model::EntityProperty;
pub use model::EntityVariation;
pub use model::HttpMethod;
pub use model::IdentifierType;
pub use model::MAIN_QUEUE_NAME;
pub use model::MetadataProperty;
pub use model::PersistenceKind;
pub use model::Platform;
pub use model::PropertyRename;
pub use model::PropertyType;
pub use model::ReadWriteEndpointPayload;
pub use model::Relationship;
pub use model::RelationshipId;
pub use model::ReleaseKind;
pub use model::ScalarKind;
pub use model::Subtype;
pub use model::SubtypeItems;
pub use model::SubtypeProperty;
pub use model::SystemProperty;
pub use model::SystemPropertyName;
pub use model::Target;
pub use model::TargetName;
pub use model::Targets;
pub use model::Version;
pub use model::VersionHistoryItem;
pub use model::VersionSource;
pub use model::VersionTag;
pub use naming::NamingConfig;
