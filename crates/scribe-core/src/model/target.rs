// crates/scribe-core/src/model/target.rs
// ============================================================================
// Module: Scribe Target Model
// Description: Output destinations for generated source files.
// Purpose: Describe the app, test, and test-support generation targets.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Generated files land in one of three fixed targets: the application
//! module, its test module, and a test-support module. The triple is
//! immutable once decoded; selection flags drive which targets a
//! generation run writes into.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Target Names
// ============================================================================

/// Names of the three fixed generation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetName {
    /// Application module.
    App,
    /// Application test module.
    AppTests,
    /// Test-support module shared by test targets.
    AppTestSupport,
}

impl TargetName {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::AppTests => "app_tests",
            Self::AppTestSupport => "app_test_support",
        }
    }
}

// ============================================================================
// SECTION: Targets
// ============================================================================

/// One output destination for generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Which fixed target this is.
    pub name: TargetName,
    /// Module name generated imports refer to.
    pub module_name: String,
    /// Directory generated files are written into.
    pub output_path: Option<PathBuf>,
    /// Whether the current run generates into this target.
    pub is_selected: bool,
}

impl Target {
    /// Returns the default target for a fixed name.
    #[must_use]
    pub fn default_for(name: TargetName) -> Self {
        Self {
            name,
            module_name: name.canonical_name().to_string(),
            output_path: None,
            is_selected: name == TargetName::App,
        }
    }
}

/// The immutable triple of generation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    /// Application module target.
    pub app: Target,
    /// Application test target.
    pub app_tests: Target,
    /// Test-support target.
    pub app_test_support: Target,
}

impl Targets {
    /// Returns the targets flagged for generation in this run.
    #[must_use]
    pub fn selected(&self) -> Vec<&Target> {
        [&self.app, &self.app_tests, &self.app_test_support]
            .into_iter()
            .filter(|target| target.is_selected)
            .collect()
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            app: Target::default_for(TargetName::App),
            app_tests: Target::default_for(TargetName::AppTests),
            app_test_support: Target::default_for(TargetName::AppTestSupport),
        }
    }
}
