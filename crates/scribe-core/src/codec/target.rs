// crates/scribe-core/src/codec/target.rs
// ============================================================================
// Module: Target Codec
// Description: Raw wire shape for the generation target triple.
// Purpose: Decode partial target declarations onto the fixed triple.
// Dependencies: crate::model::target, serde
// ============================================================================

//! ## Overview
//! The `targets` object carries up to three entries keyed by target name.
//! Absent entries decode to their defaults; entries equal to the default
//! are omitted on output, and a fully default triple drops the `targets`
//! key entirely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::model::target::Target;
use crate::model::target::TargetName;
use crate::model::target::Targets;

// ============================================================================
// SECTION: Raw Targets
// ============================================================================

/// Wire shape of one target entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTarget {
    /// Module name generated imports refer to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    /// Directory generated files are written into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Whether the current run generates into this target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
}

impl RawTarget {
    /// Resolves this entry onto the fixed target `name`.
    fn into_target(self, name: TargetName) -> Target {
        let default = Target::default_for(name);
        Target {
            name,
            module_name: self.module_name.unwrap_or(default.module_name),
            output_path: self.output_path,
            is_selected: self.is_selected.unwrap_or(default.is_selected),
        }
    }

    /// Encodes a target, returning `None` when it equals the default.
    fn from_target(target: &Target) -> Option<Self> {
        let default = Target::default_for(target.name);
        if *target == default {
            return None;
        }
        Some(Self {
            module_name: (target.module_name != default.module_name)
                .then(|| target.module_name.clone()),
            output_path: target.output_path.clone(),
            is_selected: (target.is_selected != default.is_selected)
                .then_some(target.is_selected),
        })
    }
}

/// Wire shape of the target triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTargets {
    /// Application module target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<RawTarget>,
    /// Application test target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_tests: Option<RawTarget>,
    /// Test-support target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_test_support: Option<RawTarget>,
}

impl From<RawTargets> for Targets {
    fn from(raw: RawTargets) -> Self {
        Self {
            app: raw
                .app
                .map_or_else(|| Target::default_for(TargetName::App), |target| {
                    target.into_target(TargetName::App)
                }),
            app_tests: raw.app_tests.map_or_else(
                || Target::default_for(TargetName::AppTests),
                |target| target.into_target(TargetName::AppTests),
            ),
            app_test_support: raw.app_test_support.map_or_else(
                || Target::default_for(TargetName::AppTestSupport),
                |target| target.into_target(TargetName::AppTestSupport),
            ),
        }
    }
}

impl From<&Targets> for RawTargets {
    fn from(targets: &Targets) -> Self {
        Self {
            app: RawTarget::from_target(&targets.app),
            app_tests: RawTarget::from_target(&targets.app_tests),
            app_test_support: RawTarget::from_target(&targets.app_test_support),
        }
    }
}

impl RawTargets {
    /// Returns true when every entry is absent.
    pub(crate) fn is_empty(&self) -> bool {
        self.app.is_none() && self.app_tests.is_none() && self.app_test_support.is_none()
    }
}
