// crates/scribe-core/src/model/endpoint.rs
// ============================================================================
// Module: Scribe Endpoint Model
// Description: Endpoint payload shapes with read/write variants.
// Purpose: Describe the data shapes exchanged with remote operations.
// Dependencies: crate::model::property, serde
// ============================================================================

//! ## Overview
//! An endpoint payload names a remote operation and describes the data it
//! reads and/or writes: a root key (single or array form), an entity
//! shape, optional per-entity variations, excluded payload paths, and an
//! optional metadata block. A source file may declare both sides at once
//! with a shared `readWrite` block, in which case the same logical payload
//! populates both slots and side-specific configuration is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::model::property::MetadataProperty;

// ============================================================================
// SECTION: Base Keys
// ============================================================================

/// Root key of a payload, preserving the input form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseKey {
    /// Single dotted key string.
    Single(String),
    /// Explicit key path as an array of components.
    Array(Vec<String>),
}

impl BaseKey {
    /// Returns the key components joined into a dotted path.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(key) => key.clone(),
            Self::Array(keys) => keys.join("."),
        }
    }
}

impl Serialize for BaseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(key) => serializer.serialize_str(key),
            Self::Array(keys) => keys.serialize(serializer),
        }
    }
}

/// Visitor decoding a base key from either input form.
struct BaseKeyVisitor;

impl<'de> de::Visitor<'de> for BaseKeyVisitor {
    type Value = BaseKey;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a key string or an array of key strings")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(BaseKey::Single(value.to_string()))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut keys = Vec::new();
        while let Some(key) = seq.next_element::<String>()? {
            keys.push(key);
        }
        Ok(BaseKey::Array(keys))
    }
}

impl<'de> Deserialize<'de> for BaseKey {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BaseKeyVisitor)
    }
}

// ============================================================================
// SECTION: Payload Entity
// ============================================================================

/// Structural shape of the entity inside a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointEntityStructure {
    /// One entity object.
    Single,
    /// Flat array of entity objects.
    Array,
    /// Array of arrays of entity objects.
    NestedArray,
}

/// Entity reference inside a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPayloadEntity {
    /// Key the entity is nested under, when not at the payload root.
    pub entity_key: Option<String>,
    /// Name of the described entity.
    pub entity_name: String,
    /// Structural shape of the entity value.
    pub structure: EndpointEntityStructure,
    /// Whether the entity value may be null.
    pub nullable: bool,
}

// ============================================================================
// SECTION: Variations
// ============================================================================

/// Rename applied to one property within a variation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRename {
    /// Property name in the base entity.
    pub original_name: String,
    /// Name used by this payload variation.
    pub custom_name: String,
}

/// Per-entity payload variation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityVariation {
    /// Entity the variation applies to.
    pub entity_name: String,
    /// Property renames applied by this variation.
    pub property_renames: Option<Vec<PropertyRename>>,
}

// ============================================================================
// SECTION: HTTP Methods
// ============================================================================

/// HTTP method used by a payload's remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

// ============================================================================
// SECTION: Read/Write Payloads
// ============================================================================

/// One side (or the shared form) of an endpoint payload.
///
/// # Invariants
/// - When decoded from a shared `readWrite` block, `http_method` is
///   `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadWriteEndpointPayload {
    /// Root key of the payload.
    pub base_key: Option<BaseKey>,
    /// Entity reference.
    pub entity: EndpointPayloadEntity,
    /// Per-entity variations.
    pub entity_variations: Option<Vec<EntityVariation>>,
    /// Dotted payload paths excluded from decoding.
    pub excluded_paths: Vec<String>,
    /// Metadata block attached to the payload.
    pub metadata: Option<Vec<MetadataProperty>>,
    /// HTTP method of the remote operation.
    pub http_method: Option<HttpMethod>,
}

// ============================================================================
// SECTION: Endpoint Tests
// ============================================================================

/// Which payload side a generated test exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointTestKind {
    /// Exercise the read payload.
    Read,
    /// Exercise the write payload.
    Write,
}

/// Declaration of a generated endpoint test.
///
/// # Invariants
/// - `types` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPayloadTest {
    /// Test name.
    pub name: String,
    /// Payload sides the test exercises.
    pub types: Vec<EndpointTestKind>,
}

// ============================================================================
// SECTION: Endpoint Payload
// ============================================================================

/// A named endpoint payload description.
///
/// # Invariants
/// - At least one of `read_payload` / `write_payload` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPayload {
    /// Endpoint path name, slash-separated.
    pub name: String,
    /// Payload of read operations.
    pub read_payload: Option<ReadWriteEndpointPayload>,
    /// Payload of write operations.
    pub write_payload: Option<ReadWriteEndpointPayload>,
    /// Generated test declarations.
    pub tests: Option<Vec<EndpointPayloadTest>>,
}

impl EndpointPayload {
    /// Returns true when both sides hold the same logical payload decoded
    /// from a shared `readWrite` block.
    #[must_use]
    pub fn is_read_write(&self) -> bool {
        match (&self.read_payload, &self.write_payload) {
            (Some(read), Some(write)) => read == write && read.http_method.is_none(),
            _ => false,
        }
    }

    /// Returns the endpoint name normalized into an identifier-friendly
    /// path: slashes become underscores and parameter markers are
    /// stripped.
    #[must_use]
    pub fn normalized_path_name(&self) -> String {
        self.name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.trim_start_matches(':'))
            .collect::<Vec<_>>()
            .join("_")
    }
}

#[cfg(test)]
mod tests;
