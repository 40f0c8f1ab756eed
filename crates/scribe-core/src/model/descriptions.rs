// crates/scribe-core/src/model/descriptions.rs
// ============================================================================
// Module: Scribe Descriptions Aggregate
// Description: Root container binding subtypes, entities, and endpoints.
// Purpose: Provide name-indexed access and aggregate-level derivations.
// Dependencies: crate::errors, crate::model::*
// ============================================================================

//! ## Overview
//! The aggregate owns the ordered element collections, the target triple,
//! and the schema version. It is constructed once by deserialization and
//! is thereafter immutable; the three name indexes are memoized on first
//! access. All cross-element references resolve by name through these
//! indexes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::errors::DescriptionError;
use crate::model::endpoint::EndpointPayload;
use crate::model::entity::Entity;
use crate::model::subtype::Subtype;
use crate::model::target::Targets;
use crate::model::version::Version;

// ============================================================================
// SECTION: Aggregate
// ============================================================================

/// Name of the client queue every aggregate implicitly carries.
pub const MAIN_QUEUE_NAME: &str = "main";

/// Root container for one generation run.
///
/// # Invariants
/// - Element names are unique within each kind.
/// - Every referenced name resolves to a member element; the codec
///   validates this at decode time.
#[derive(Debug, Clone)]
pub struct Descriptions {
    /// Value subtypes, in input order.
    pub subtypes: Vec<Subtype>,
    /// Entities, in input order.
    pub entities: Vec<Entity>,
    /// Endpoint payloads, in input order.
    pub endpoints: Vec<EndpointPayload>,
    /// Generation target triple.
    pub targets: Targets,
    /// Schema version of the description set.
    pub version: Version,
    /// Memoized subtype name index.
    subtype_index: OnceLock<BTreeMap<String, usize>>,
    /// Memoized entity name index.
    entity_index: OnceLock<BTreeMap<String, usize>>,
    /// Memoized endpoint name index.
    endpoint_index: OnceLock<BTreeMap<String, usize>>,
}

impl PartialEq for Descriptions {
    fn eq(&self, other: &Self) -> bool {
        self.subtypes == other.subtypes
            && self.entities == other.entities
            && self.endpoints == other.endpoints
            && self.targets == other.targets
            && self.version == other.version
    }
}

impl Eq for Descriptions {}

impl Descriptions {
    /// Creates an aggregate from decoded collections.
    #[must_use]
    pub fn new(
        subtypes: Vec<Subtype>,
        entities: Vec<Entity>,
        endpoints: Vec<EndpointPayload>,
        targets: Targets,
        version: Version,
    ) -> Self {
        Self {
            subtypes,
            entities,
            endpoints,
            targets,
            version,
            subtype_index: OnceLock::new(),
            entity_index: OnceLock::new(),
            endpoint_index: OnceLock::new(),
        }
    }

    /// Returns the memoized subtype index.
    fn subtype_index(&self) -> &BTreeMap<String, usize> {
        self.subtype_index.get_or_init(|| {
            self.subtypes
                .iter()
                .enumerate()
                .map(|(index, subtype)| (subtype.name.clone(), index))
                .collect()
        })
    }

    /// Returns the memoized entity index.
    fn entity_index(&self) -> &BTreeMap<String, usize> {
        self.entity_index.get_or_init(|| {
            self.entities
                .iter()
                .enumerate()
                .map(|(index, entity)| (entity.name.clone(), index))
                .collect()
        })
    }

    /// Returns the memoized endpoint index.
    fn endpoint_index(&self) -> &BTreeMap<String, usize> {
        self.endpoint_index.get_or_init(|| {
            self.endpoints
                .iter()
                .enumerate()
                .map(|(index, endpoint)| (endpoint.name.clone(), index))
                .collect()
        })
    }

    /// Looks up a subtype by name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::SubtypeNotFound`] when the name does
    /// not resolve.
    pub fn subtype(&self, name: &str) -> Result<&Subtype, DescriptionError> {
        self.subtype_index()
            .get(name)
            .and_then(|&index| self.subtypes.get(index))
            .ok_or_else(|| DescriptionError::SubtypeNotFound(name.to_string()))
    }

    /// Looks up an entity by name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when the name does not
    /// resolve.
    pub fn entity(&self, name: &str) -> Result<&Entity, DescriptionError> {
        self.entity_index()
            .get(name)
            .and_then(|&index| self.entities.get(index))
            .ok_or_else(|| DescriptionError::EntityNotFound(name.to_string()))
    }

    /// Looks up an endpoint payload by name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EndpointPayloadNotFound`] when the name
    /// does not resolve.
    pub fn endpoint(&self, name: &str) -> Result<&EndpointPayload, DescriptionError> {
        self.endpoint_index()
            .get(name)
            .and_then(|&index| self.endpoints.get(index))
            .ok_or_else(|| DescriptionError::EndpointPayloadNotFound(name.to_string()))
    }

    // ========================================================================
    // SECTION: Aggregate Derivations
    // ========================================================================

    /// Derives the store-model mapping history from entity version
    /// histories.
    ///
    /// Every version appearing in any history is included. For each such
    /// version that is not its entity's added-at version, the greatest
    /// prior version from `all_versions` that is a release and not a
    /// matching release is included as the mapping source. The result is
    /// sorted descending.
    #[must_use]
    pub fn model_mapping_history(&self, all_versions: &[Version]) -> Vec<Version> {
        let mut versions = BTreeSet::new();
        for entity in &self.entities {
            let added_at = entity.added_at_version().cloned();
            for item in &entity.version_history {
                versions.insert(item.version.clone());
                if added_at.as_ref() == Some(&item.version) {
                    continue;
                }
                let source = all_versions
                    .iter()
                    .filter(|candidate| {
                        *candidate < &item.version
                            && candidate.is_release()
                            && !candidate.is_matching_release(&item.version)
                    })
                    .max();
                if let Some(source) = source {
                    versions.insert(source.clone());
                }
            }
        }
        versions.into_iter().rev().collect()
    }

    /// Returns every client queue name, with [`MAIN_QUEUE_NAME`] first and
    /// the rest sorted lexicographically.
    #[must_use]
    pub fn client_queue_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self
            .entities
            .iter()
            .filter_map(|entity| entity.client_queue_name.clone())
            .collect();
        names.remove(MAIN_QUEUE_NAME);
        let mut ordered = Vec::with_capacity(names.len() + 1);
        ordered.push(MAIN_QUEUE_NAME.to_string());
        ordered.extend(names);
        ordered
    }

    /// Returns endpoints whose write payload targets a mutable entity,
    /// ordered by normalized path name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a write payload
    /// references an unknown entity.
    pub fn endpoints_with_mergeable_identifiers(
        &self,
    ) -> Result<Vec<&EndpointPayload>, DescriptionError> {
        let mut matched = Vec::new();
        for endpoint in &self.endpoints {
            let Some(write) = &endpoint.write_payload else {
                continue;
            };
            if self.entity(&write.entity.entity_name)?.is_mutable() {
                matched.push(endpoint);
            }
        }
        matched.sort_by_key(|endpoint| endpoint.normalized_path_name());
        Ok(matched)
    }
}
