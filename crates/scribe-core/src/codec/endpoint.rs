// crates/scribe-core/src/codec/endpoint.rs
// ============================================================================
// Module: Endpoint Codec
// Description: Raw wire shape for endpoint payloads and their dual form.
// Purpose: Resolve the shared readWrite block and payload-side defaults.
// Dependencies: crate::codec::property, crate::errors, crate::model, serde
// ============================================================================

//! ## Overview
//! Endpoints declare `read` and `write` payloads independently or share a
//! single `readWrite` block. The shared form populates both model slots
//! with the same logical payload and rejects any `httpMethod`, since the
//! method necessarily differs per side. Separate sides default their
//! method to GET. An endpoint with neither side is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::codec::property::RawMetadataProperty;
use crate::codec::property::metadata_from_raw;
use crate::codec::property::metadata_to_raw;
use crate::errors::DescriptionError;
use crate::model::endpoint::BaseKey;
use crate::model::endpoint::EndpointEntityStructure;
use crate::model::endpoint::EndpointPayload;
use crate::model::endpoint::EndpointPayloadEntity;
use crate::model::endpoint::EndpointPayloadTest;
use crate::model::endpoint::EndpointTestKind;
use crate::model::endpoint::EntityVariation;
use crate::model::endpoint::HttpMethod;
use crate::model::endpoint::PropertyRename;
use crate::model::endpoint::ReadWriteEndpointPayload;

// ============================================================================
// SECTION: Payload Entity
// ============================================================================

/// Wire shape of the entity reference inside a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPayloadEntity {
    /// Key the entity is nested under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_key: Option<String>,
    /// Name of the described entity.
    pub entity_name: String,
    /// Structural shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<EndpointEntityStructure>,
    /// Nullability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl From<RawPayloadEntity> for EndpointPayloadEntity {
    fn from(raw: RawPayloadEntity) -> Self {
        Self {
            entity_key: raw.entity_key,
            entity_name: raw.entity_name,
            structure: raw.structure.unwrap_or(EndpointEntityStructure::Single),
            nullable: raw.nullable.unwrap_or(false),
        }
    }
}

impl From<&EndpointPayloadEntity> for RawPayloadEntity {
    fn from(entity: &EndpointPayloadEntity) -> Self {
        Self {
            entity_key: entity.entity_key.clone(),
            entity_name: entity.entity_name.clone(),
            structure: (entity.structure != EndpointEntityStructure::Single)
                .then_some(entity.structure),
            nullable: entity.nullable.then_some(true),
        }
    }
}

// ============================================================================
// SECTION: Variations
// ============================================================================

/// Wire shape of a property rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPropertyRename {
    /// Property name in the base entity.
    pub original_name: String,
    /// Name used by the variation.
    pub custom_name: String,
}

/// Wire shape of a per-entity variation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntityVariation {
    /// Entity the variation applies to.
    pub entity_name: String,
    /// Property renames applied by the variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_renames: Option<Vec<RawPropertyRename>>,
}

impl From<RawEntityVariation> for EntityVariation {
    fn from(raw: RawEntityVariation) -> Self {
        Self {
            entity_name: raw.entity_name,
            property_renames: raw.property_renames.map(|renames| {
                renames
                    .into_iter()
                    .map(|rename| PropertyRename {
                        original_name: rename.original_name,
                        custom_name: rename.custom_name,
                    })
                    .collect()
            }),
        }
    }
}

impl From<&EntityVariation> for RawEntityVariation {
    fn from(variation: &EntityVariation) -> Self {
        Self {
            entity_name: variation.entity_name.clone(),
            property_renames: variation.property_renames.as_ref().map(|renames| {
                renames
                    .iter()
                    .map(|rename| RawPropertyRename {
                        original_name: rename.original_name.clone(),
                        custom_name: rename.custom_name.clone(),
                    })
                    .collect()
            }),
        }
    }
}

// ============================================================================
// SECTION: Read/Write Payloads
// ============================================================================

/// Maximum number of components accepted in an array-form base key.
const MAX_BASE_KEY_COMPONENTS: usize = 2;

/// Wire shape of one payload side or the shared block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawReadWritePayload {
    /// Root key of the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_key: Option<BaseKey>,
    /// Entity reference.
    pub entity: RawPayloadEntity,
    /// Per-entity variations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_variations: Option<Vec<RawEntityVariation>>,
    /// Excluded payload paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_paths: Option<Vec<String>>,
    /// Metadata block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<RawMetadataProperty>>,
    /// HTTP method; illegal inside the shared block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
}

/// Which source form a payload side was declared through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadForm {
    /// Independent `read` or `write` block.
    Separate,
    /// Shared `readWrite` block.
    Shared,
}

impl RawReadWritePayload {
    /// Converts one payload side under the rules of its source form.
    fn into_payload(
        self,
        endpoint_name: &str,
        form: PayloadForm,
    ) -> Result<ReadWriteEndpointPayload, DescriptionError> {
        if form == PayloadForm::Shared && self.http_method.is_some() {
            return Err(DescriptionError::EndpointRequiresSeparateReadAndWritePayloads(
                endpoint_name.to_string(),
            ));
        }
        if let Some(BaseKey::Array(components)) = &self.base_key
            && components.len() > MAX_BASE_KEY_COMPONENTS
        {
            return Err(DescriptionError::UnsupportedNestedKeys);
        }
        let http_method = match form {
            PayloadForm::Shared => None,
            PayloadForm::Separate => Some(self.http_method.unwrap_or(HttpMethod::Get)),
        };
        Ok(ReadWriteEndpointPayload {
            base_key: self.base_key,
            entity: self.entity.into(),
            entity_variations: self
                .entity_variations
                .map(|variations| variations.into_iter().map(EntityVariation::from).collect()),
            excluded_paths: self.excluded_paths.unwrap_or_default(),
            metadata: metadata_from_raw(self.metadata)?,
            http_method,
        })
    }
}

/// Encodes one payload side back into its wire shape.
fn payload_to_raw(
    payload: &ReadWriteEndpointPayload,
    form: PayloadForm,
) -> Result<RawReadWritePayload, DescriptionError> {
    let http_method = match form {
        PayloadForm::Shared => None,
        PayloadForm::Separate => payload.http_method.filter(|method| *method != HttpMethod::Get),
    };
    Ok(RawReadWritePayload {
        base_key: payload.base_key.clone(),
        entity: RawPayloadEntity::from(&payload.entity),
        entity_variations: payload
            .entity_variations
            .as_ref()
            .map(|variations| variations.iter().map(RawEntityVariation::from).collect()),
        excluded_paths: (!payload.excluded_paths.is_empty())
            .then(|| payload.excluded_paths.clone()),
        metadata: metadata_to_raw(payload.metadata.as_ref())?,
        http_method,
    })
}

// ============================================================================
// SECTION: Endpoint Tests
// ============================================================================

/// Wire shape of an endpoint test declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEndpointTest {
    /// Test name.
    pub name: String,
    /// Payload sides the test exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<EndpointTestKind>>,
}

impl TryFrom<RawEndpointTest> for EndpointPayloadTest {
    type Error = DescriptionError;

    fn try_from(raw: RawEndpointTest) -> Result<Self, Self::Error> {
        let types = raw.types.unwrap_or_default();
        if types.is_empty() {
            return Err(DescriptionError::EndpointTestsRequiresAtLeastOneType);
        }
        Ok(Self { name: raw.name, types })
    }
}

impl From<&EndpointPayloadTest> for RawEndpointTest {
    fn from(test: &EndpointPayloadTest) -> Self {
        Self { name: test.name.clone(), types: Some(test.types.clone()) }
    }
}

// ============================================================================
// SECTION: Raw Endpoint
// ============================================================================

/// Wire shape of an endpoint payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEndpointPayload {
    /// Endpoint path name.
    pub name: String,
    /// Read payload block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<RawReadWritePayload>,
    /// Write payload block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<RawReadWritePayload>,
    /// Shared read/write block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_write: Option<RawReadWritePayload>,
    /// Generated test declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<RawEndpointTest>>,
}

impl TryFrom<RawEndpointPayload> for EndpointPayload {
    type Error = DescriptionError;

    fn try_from(raw: RawEndpointPayload) -> Result<Self, Self::Error> {
        let (read_payload, write_payload) = match (raw.read_write, raw.read, raw.write) {
            (Some(shared), None, None) => {
                let payload = shared.into_payload(&raw.name, PayloadForm::Shared)?;
                (Some(payload.clone()), Some(payload))
            }
            (Some(_), _, _) => {
                return Err(DescriptionError::EndpointRequiresSeparateReadAndWritePayloads(
                    raw.name,
                ));
            }
            (None, None, None) => {
                return Err(DescriptionError::EndpointRequiresAtLeastOnePayload(raw.name));
            }
            (None, read, write) => (
                read.map(|payload| payload.into_payload(&raw.name, PayloadForm::Separate))
                    .transpose()?,
                write
                    .map(|payload| payload.into_payload(&raw.name, PayloadForm::Separate))
                    .transpose()?,
            ),
        };
        let tests = raw
            .tests
            .map(|tests| {
                tests.into_iter().map(EndpointPayloadTest::try_from).collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(Self { name: raw.name, read_payload, write_payload, tests })
    }
}

impl TryFrom<&EndpointPayload> for RawEndpointPayload {
    type Error = DescriptionError;

    fn try_from(endpoint: &EndpointPayload) -> Result<Self, Self::Error> {
        let (read, write, read_write) = if endpoint.is_read_write() {
            let shared = endpoint
                .read_payload
                .as_ref()
                .map(|payload| payload_to_raw(payload, PayloadForm::Shared))
                .transpose()?;
            (None, None, shared)
        } else {
            (
                endpoint
                    .read_payload
                    .as_ref()
                    .map(|payload| payload_to_raw(payload, PayloadForm::Separate))
                    .transpose()?,
                endpoint
                    .write_payload
                    .as_ref()
                    .map(|payload| payload_to_raw(payload, PayloadForm::Separate))
                    .transpose()?,
                None,
            )
        };
        Ok(Self {
            name: endpoint.name.clone(),
            read,
            write,
            read_write,
            tests: endpoint
                .tests
                .as_ref()
                .map(|tests| tests.iter().map(RawEndpointTest::from).collect()),
        })
    }
}
