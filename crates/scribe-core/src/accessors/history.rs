// crates/scribe-core/src/accessors/history.rs
// ============================================================================
// Module: Version History Accessors
// Description: Derivations over entity version histories.
// Purpose: Compute migration ranges and per-version entity names.
// Dependencies: crate::errors, crate::model
// ============================================================================

//! ## Overview
//! Version histories drive two derivations: the per-property ranges over
//! which migration checks are suppressed, and the name an entity carried
//! at a given schema version. Both walk the history in declaration order,
//! which is ascending by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::errors::DescriptionError;
use crate::model::entity::Entity;
use crate::model::version::Version;

// ============================================================================
// SECTION: Ranges
// ============================================================================

/// Half-open span between two schema versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    /// Version the span starts from.
    pub from: Version,
    /// Version the span ends at.
    pub to: Version,
}

// ============================================================================
// SECTION: History Derivations
// ============================================================================

impl Entity {
    /// Folds the version history into per-property spans over which
    /// migration checks are suppressed.
    ///
    /// For each history item, every property listed in its
    /// `ignore_property_migration_checks_on` receives the span from the
    /// previous history version to the item's version; the fold then
    /// advances. Spans therefore carry monotonically non-decreasing
    /// `from` versions.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::EntityAddedAtVersionNotFound`] when the
    /// entity has no effective added-at version.
    pub fn ignored_version_ranges_by_property_name(
        &self,
    ) -> Result<BTreeMap<String, Vec<VersionRange>>, DescriptionError> {
        let mut from = self
            .added_at_version()
            .cloned()
            .ok_or_else(|| DescriptionError::EntityAddedAtVersionNotFound(self.name.clone()))?;
        let mut ranges: BTreeMap<String, Vec<VersionRange>> = BTreeMap::new();
        for item in &self.version_history {
            for property_name in &item.ignore_property_migration_checks_on {
                ranges.entry(property_name.clone()).or_default().push(VersionRange {
                    from: from.clone(),
                    to: item.version.clone(),
                });
            }
            from = item.version.clone();
        }
        Ok(ranges)
    }

    /// Returns the name this entity carried at `version`.
    ///
    /// With an empty history the current name is returned. Otherwise the
    /// earliest history item strictly newer than `version` that records a
    /// previous name wins; without one the current name applies.
    #[must_use]
    pub fn name_for_version(&self, version: &Version) -> &str {
        self.version_history
            .iter()
            .find(|item| item.version > *version && item.previous_name.is_some())
            .and_then(|item| item.previous_name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Returns the earliest recorded previous name, used by store
    /// migrations to locate the renamed-from model.
    #[must_use]
    pub fn previous_name_for_store(&self) -> Option<&str> {
        self.version_history.iter().find_map(|item| item.previous_name.as_deref())
    }
}
