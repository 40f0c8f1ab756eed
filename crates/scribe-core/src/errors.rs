// crates/scribe-core/src/errors.rs
// ============================================================================
// Module: Scribe Error Taxonomy
// Description: Tagged error kinds raised across description processing.
// Purpose: Provide one flat error surface for decoding, lookup, and accessors.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure raised by the description pipeline is a
//! [`DescriptionError`] variant with a single-line message carrying the
//! offending name, key, or value in quotes. Parsing errors abort the
//! element being decoded and bubble out of the top-level deserialize call;
//! lookup failures raised by accessors propagate to the generator that
//! invoked them. A subset of variants is reserved for generator
//! collaborators that consume the model (payload decoding, persistence
//! bindings) and share this taxonomy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Result alias for description processing.
pub type Result<T> = std::result::Result<T, DescriptionError>;

/// Error kinds raised while decoding, validating, or querying descriptions.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - Messages are single lines quoting the offending name, key, or value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    /// A type string in the description input is not recognized.
    #[error("unsupported type '{0}'")]
    UnsupportedType(String),
    /// A referenced subtype name does not resolve.
    #[error("could not find subtype '{0}'")]
    SubtypeNotFound(String),
    /// A referenced entity name does not resolve.
    #[error("could not find entity '{0}'")]
    EntityNotFound(String),
    /// An entity has no effective added-at version.
    #[error("could not find added-at version for entity '{0}'")]
    EntityAddedAtVersionNotFound(String),
    /// A referenced endpoint payload name does not resolve.
    #[error("could not find endpoint payload '{0}'")]
    EndpointPayloadNotFound(String),
    /// An endpoint declares neither a read nor a write payload.
    #[error("endpoint '{0}' requires at least one payload")]
    EndpointRequiresAtLeastOnePayload(String),
    /// A shared read/write payload carries side-specific configuration.
    #[error("endpoint '{0}' requires separate read and write payloads")]
    EndpointRequiresSeparateReadAndWritePayloads(String),
    /// An endpoint test declares no payload types.
    #[error("endpoint tests require at least one type")]
    EndpointTestsRequiresAtLeastOneType,
    /// A referenced property name does not resolve within an entity.
    #[error("could not find property '{1}' on entity '{0}'")]
    PropertyNotFound(String, String),
    /// A payload identifier shape is not supported by generators.
    #[error("unsupported payload identifier")]
    UnsupportedPayloadIdentifier,
    /// A metadata identifier shape is not supported by generators.
    #[error("unsupported metadata identifier")]
    UnsupportedMetadataIdentifier,
    /// Nested payload keys are not supported for this shape.
    #[error("unsupported nested keys")]
    UnsupportedNestedKeys,
    /// A relationship target entity could not be resolved.
    #[error("could not find target entity")]
    CouldNotFindTargetEntity,
    /// A subtype resolved to an empty case list.
    #[error("subtype '{0}' does not have any case")]
    SubtypeDoesNotHaveAnyCase(String),
    /// An entity identifier cannot be persisted as declared.
    #[error("cannot persist identifier for entity '{0}'")]
    CannotPersistIdentifier(String),
    /// A legacy key conflicts with an explicitly declared value.
    #[error("incompatible property key '{0}'")]
    IncompatiblePropertyKey(String),
    /// A name cannot be case-converted for generated output.
    #[error("unsupported case conversion")]
    UnsupportedCaseConversion,
    /// A version string does not match any supported grammar.
    #[error("could not form version from string '{0}'")]
    CouldNotFormVersionFromString(String),
    /// An entity property uses a reserved system-property name.
    #[error("property name '{0}' collides with a system property")]
    SystemPropertyNameCollision(String),
    /// Two elements of the same kind share a name.
    #[error("duplicate description name '{0}'")]
    DuplicateName(String),
    /// The description input violates a structural invariant.
    #[error("corrupted description data: {0}")]
    DataCorrupted(String),
    /// The description input is not syntactically decodable.
    #[error("description format error: {0}")]
    Format(String),
    /// An extension subprocess reported or caused a failure.
    #[error("extension error: {0}")]
    Extension(String),
}

impl DescriptionError {
    /// Wraps a serde transport error as a format failure.
    #[must_use]
    pub fn format(err: &serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
