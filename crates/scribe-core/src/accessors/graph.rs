// crates/scribe-core/src/accessors/graph.rs
// ============================================================================
// Module: Relationship Graph Accessors
// Description: Walks over the directed entity-relationship graph.
// Purpose: Derive closures, loops, and propagated flags with cycle safety.
// Dependencies: crate::errors, crate::model
// ============================================================================

//! ## Overview
//! Entity relationships form a directed graph by name, and cycles are
//! legal. Every walk here carries an explicit visited-name set or memo so
//! traversal terminates on any input; the iterative walks also keep
//! recursion depth independent of schema shape where practical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::errors::DescriptionError;
use crate::model::descriptions::Descriptions;
use crate::model::entity::Entity;
use crate::model::identifier::IdentifierType;
use crate::model::identifier::RelationshipId;
use crate::model::property::EntityProperty;
use crate::model::property::Relationship;

// ============================================================================
// SECTION: Graph Walks
// ============================================================================

impl Descriptions {
    /// Returns the entities whose payloads are embedded transitively under
    /// `entity` through non-id-only relationships.
    ///
    /// Each relationship target is visited at most once; a target already
    /// visited halts that branch. The result is sorted by name and
    /// contains each entity at most once.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a relationship
    /// references an unknown entity.
    pub fn extractable_property_entities(
        &self,
        entity: &Entity,
    ) -> Result<Vec<&Entity>, DescriptionError> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut collected: BTreeMap<&str, &Entity> = BTreeMap::new();
        let mut stack = vec![entity];
        while let Some(current) = stack.pop() {
            for property in current.used_properties() {
                let Some(relationship) = property.relationship() else {
                    continue;
                };
                if relationship.id_only {
                    continue;
                }
                if !visited.insert(relationship.entity_name.clone()) {
                    continue;
                }
                let target = self.entity(&relationship.entity_name)?;
                collected.insert(target.name.as_str(), target);
                stack.push(target);
            }
        }
        Ok(collected.into_values().collect())
    }

    /// Returns true when the relationship graph reachable from `entity`
    /// revisits any entity.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a relationship
    /// references an unknown entity.
    pub fn has_relationship_loop(&self, entity: &Entity) -> Result<bool, DescriptionError> {
        let mut visited = BTreeSet::from([entity.name.clone()]);
        let mut stack = vec![entity];
        while let Some(current) = stack.pop() {
            for property in current.used_properties() {
                let Some(relationship) = property.relationship() else {
                    continue;
                };
                if !visited.insert(relationship.entity_name.clone()) {
                    return Ok(true);
                }
                stack.push(self.entity(&relationship.entity_name)?);
            }
        }
        Ok(false)
    }

    /// Returns true when `entity` or any non-id-only relationship target
    /// carries a lazy property.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a relationship
    /// references an unknown entity.
    pub fn has_any_lazy(&self, entity: &Entity) -> Result<bool, DescriptionError> {
        let mut memo = BTreeMap::new();
        self.has_any_lazy_with_memo(entity, &mut memo)
    }

    /// Memoized form of [`Descriptions::has_any_lazy`]; the memo doubles
    /// as the cycle guard and may be shared across entities.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a relationship
    /// references an unknown entity.
    pub fn has_any_lazy_with_memo(
        &self,
        entity: &Entity,
        memo: &mut BTreeMap<String, bool>,
    ) -> Result<bool, DescriptionError> {
        if let Some(&known) = memo.get(&entity.name) {
            return Ok(known);
        }
        memo.insert(entity.name.clone(), false);
        let mut result = entity.used_properties().iter().any(|property| property.lazy);
        if !result {
            for property in entity.used_properties() {
                let Some(relationship) = property.relationship() else {
                    continue;
                };
                if relationship.id_only {
                    continue;
                }
                let target = self.entity(&relationship.entity_name)?;
                if self.has_any_lazy_with_memo(target, memo)? {
                    result = true;
                    break;
                }
            }
        }
        memo.insert(entity.name.clone(), result);
        Ok(result)
    }

    /// Returns true when `entity` has no metadata block and every
    /// non-id-only relationship target (cycles excluded) is itself
    /// metadata-free.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a relationship
    /// references an unknown entity.
    pub fn has_void_metadata(&self, entity: &Entity) -> Result<bool, DescriptionError> {
        let mut visited = BTreeSet::new();
        self.has_void_metadata_visited(entity, &mut visited)
    }

    /// Visited-set form of [`Descriptions::has_void_metadata`].
    fn has_void_metadata_visited(
        &self,
        entity: &Entity,
        visited: &mut BTreeSet<String>,
    ) -> Result<bool, DescriptionError> {
        if entity.metadata.is_some() {
            return Ok(false);
        }
        visited.insert(entity.name.clone());
        for property in entity.used_properties() {
            let Some(relationship) = property.relationship() else {
                continue;
            };
            if relationship.id_only || visited.contains(&relationship.entity_name) {
                continue;
            }
            let target = self.entity(&relationship.entity_name)?;
            if !self.has_void_metadata_visited(target, visited)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// ============================================================================
// SECTION: Identifier Derivation
// ============================================================================

impl Entity {
    /// Groups this entity's relationship properties by target entity name.
    #[must_use]
    pub fn relationships_for_identifier_derivation(
        &self,
    ) -> BTreeMap<&str, Vec<(&EntityProperty, &Relationship)>> {
        let mut grouped: BTreeMap<&str, Vec<(&EntityProperty, &Relationship)>> = BTreeMap::new();
        for property in self.used_properties() {
            if let Some(relationship) = property.relationship() {
                grouped
                    .entry(relationship.entity_name.as_str())
                    .or_default()
                    .push((property, relationship));
            }
        }
        grouped
    }
}

impl Descriptions {
    /// Returns the relationship identifiers contributing to an entity's
    /// identifier.
    ///
    /// Void and scalar identifiers contribute none. A property-aliased
    /// identifier contributes its relationship target, resolved through
    /// the aggregate to the target's canonical name. Declared
    /// relationship identifiers are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::PropertyNotFound`] when the aliased
    /// property is missing and [`DescriptionError::CouldNotFindTargetEntity`]
    /// when its relationship target does not resolve.
    pub fn relationship_ids(
        &self,
        entity: &Entity,
    ) -> Result<Vec<RelationshipId>, DescriptionError> {
        match &entity.identifier.identifier_type {
            IdentifierType::Void | IdentifierType::Scalar(_) => Ok(Vec::new()),
            IdentifierType::Relationships(_, ids) => Ok(ids.clone()),
            IdentifierType::Property(property_name) => {
                let property = entity
                    .properties
                    .iter()
                    .find(|property| property.name == *property_name)
                    .ok_or_else(|| {
                        DescriptionError::PropertyNotFound(
                            entity.name.clone(),
                            property_name.clone(),
                        )
                    })?;
                let Some(relationship) = property.relationship() else {
                    return Ok(Vec::new());
                };
                let target = self
                    .entity(&relationship.entity_name)
                    .map_err(|_| DescriptionError::CouldNotFindTargetEntity)?;
                Ok(vec![RelationshipId { entity_name: target.name.clone() }])
            }
        }
    }

    /// Resolves the identifier type alias an entity's identifier is
    /// equivalent to.
    ///
    /// An explicit equivalence declaration wins; otherwise a
    /// property-aliased identifier pointing at a relationship borrows the
    /// target entity's alias.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityNotFound`] when a referenced
    /// entity does not resolve.
    pub fn equivalent_identifier_type_id(
        &self,
        entity: &Entity,
    ) -> Result<Option<String>, DescriptionError> {
        if let Some(equivalent_name) = &entity.identifier.equivalent_identifier_name {
            let equivalent = self.entity(equivalent_name)?;
            return Ok(equivalent.identifier_type_id.clone());
        }
        if let IdentifierType::Property(property_name) = &entity.identifier.identifier_type
            && let Some(property) =
                entity.properties.iter().find(|property| property.name == *property_name)
            && let Some(relationship) = property.relationship()
        {
            let target = self.entity(&relationship.entity_name)?;
            return Ok(target.identifier_type_id.clone());
        }
        Ok(None)
    }
}
