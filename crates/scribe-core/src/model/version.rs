// crates/scribe-core/src/model/version.rs
// ============================================================================
// Module: Scribe Version Model
// Description: Structured schema versions parsed from three string grammars.
// Purpose: Provide totally ordered version values for history derivations.
// Dependencies: regex, serde
// ============================================================================

//! ## Overview
//! Versions appear in three textual habitats with different grammars:
//! dotted description files (`1.2.3`), git release tags
//! (`release_2.10-7`, where the trailing `-7` is a build number), and
//! underscored store-model names (`AppModel_2_10_1`). All three parse into
//! the same [`Version`] value with a total order over
//! `(major, minor, patch, build, tag)`; absent patch and build components
//! order below present ones.
//!
//! Release tagging is derived by substring search on the raw input, so a
//! git tag keeps its release kind even when the numeric components alone
//! would be ambiguous.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;

use crate::errors::DescriptionError;

// ============================================================================
// SECTION: Grammars
// ============================================================================

/// Dotted grammar for versions written in description files.
static DESCRIPTION_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(\d+)\.(\d+)(?:\.(\d+))?(?:-(\d+))?$"));

/// Embedded grammar for versions carried inside git tags.
static GIT_TAG_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d+)\.(\d+)(?:\.(\d+))?(?:-(\d+))?"));

/// Underscored grammar for versions embedded in store model names.
static STORE_MODEL_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d+)_(\d+)(?:_(\d+))?(?:-(\d+))?"));

/// Compiles a version grammar known to be valid at build time.
#[allow(clippy::expect_used, reason = "Grammar patterns are compile-time constants.")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("version grammar pattern")
}

/// Source kind selecting the version grammar to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Dotted versions written in description files.
    Description,
    /// Versions embedded in git release tags.
    GitTag,
    /// Underscored versions embedded in store model names.
    StoreModel,
}

impl VersionSource {
    /// Returns the compiled grammar for this source kind.
    fn grammar(self) -> &'static Regex {
        match self {
            Self::Description => &DESCRIPTION_GRAMMAR,
            Self::GitTag => &GIT_TAG_GRAMMAR,
            Self::StoreModel => &STORE_MODEL_GRAMMAR,
        }
    }
}

// ============================================================================
// SECTION: Release Tags
// ============================================================================

/// Release channel attached to a released version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseKind {
    /// Beta release channel.
    Beta,
    /// App store release channel.
    AppStore,
}

/// Tag classifying how a version string was released.
///
/// # Invariants
/// - Ordering places untagged versions below released ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionTag {
    /// No release marker was present in the source string.
    Other,
    /// The source string carried a release marker.
    Release(ReleaseKind),
}

impl VersionTag {
    /// Derives the tag from the raw source string.
    ///
    /// The beta marker is checked first since it contains the plain
    /// release marker as a substring.
    #[must_use]
    pub fn from_source(value: &str) -> Self {
        if value.contains("beta_release_") {
            Self::Release(ReleaseKind::Beta)
        } else if value.contains("release_") {
            Self::Release(ReleaseKind::AppStore)
        } else {
            Self::Other
        }
    }

    /// Returns true when the tag marks a release.
    #[must_use]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::Release(_))
    }
}

// ============================================================================
// SECTION: Version Value
// ============================================================================

/// Structured schema version.
///
/// # Invariants
/// - The derived ordering is lexicographic over
///   `(major, minor, patch, build, tag)`; `None` components order below
///   `Some` components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Optional patch component.
    pub patch: Option<u32>,
    /// Optional build component, introduced by a leading `-`.
    pub build: Option<u32>,
    /// Release tag derived from the source string.
    pub tag: VersionTag,
}

impl Version {
    /// Returns the zero sentinel version `0.0` with no tag.
    #[must_use]
    pub const fn zero() -> Self {
        Self { major: 0, minor: 0, patch: None, build: None, tag: VersionTag::Other }
    }

    /// Parses a version string under the grammar for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::CouldNotFormVersionFromString`] when the
    /// string does not match the grammar or a component overflows.
    pub fn from_source_str(value: &str, source: VersionSource) -> Result<Self, DescriptionError> {
        let invalid = || DescriptionError::CouldNotFormVersionFromString(value.to_string());
        let captures = source.grammar().captures(value).ok_or_else(invalid)?;
        let major = component(&captures, 1).ok_or_else(invalid)?.map_err(|()| invalid())?;
        let minor = component(&captures, 2).ok_or_else(invalid)?.map_err(|()| invalid())?;
        let patch = component(&captures, 3).transpose().map_err(|()| invalid())?;
        let build = component(&captures, 4).transpose().map_err(|()| invalid())?;
        Ok(Self { major, minor, patch, build, tag: VersionTag::from_source(value) })
    }

    /// Returns true when `self` and `other` match on
    /// `(major, minor, patch)`, ignoring build and tag.
    #[must_use]
    pub fn is_matching_release(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// Returns true when this version carries a release tag.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        self.tag.is_release()
    }
}

/// Extracts one numeric capture group, if present.
///
/// The outer `Option` reports presence; the inner result reports numeric
/// conversion overflow.
fn component(captures: &regex::Captures<'_>, index: usize) -> Option<Result<u32, ()>> {
    captures.get(index).map(|group| group.as_str().parse::<u32>().map_err(|_| ()))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        if let Some(build) = self.build {
            write!(f, "-{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = DescriptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_source_str(value, VersionSource::Description)
    }
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(|err: DescriptionError| D::Error::custom(err.to_string()))
    }
}

#[cfg(test)]
mod tests;
