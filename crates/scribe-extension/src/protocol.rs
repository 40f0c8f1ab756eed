// crates/scribe-extension/src/protocol.rs
// ============================================================================
// Module: Extension Protocol Types
// Description: Wire shapes exchanged with extension subprocesses.
// Purpose: Define the file-based input, environment, and response formats.
// Dependencies: scribe-core, serde
// ============================================================================

//! ## Overview
//! Extensions communicate through three files in a per-invocation scratch
//! directory: `input.json` (host to extension), `environment.json` (the
//! process naming configuration, host to extension), and `output.json`
//! (the tagged response, extension to host). Tagged unions serialize in
//! `{ "kind": <tag>, "value": <payload?> }` form with the value absent
//! for payload-free tags.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use scribe_core::Descriptions;
use scribe_core::naming::NamingConfig;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Scratch Files
// ============================================================================

/// Input payload file, host to extension.
pub const INPUT_FILE: &str = "input.json";

/// Naming environment file, host to extension.
pub const ENVIRONMENT_FILE: &str = "environment.json";

/// Response file, extension to host.
pub const OUTPUT_FILE: &str = "output.json";

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Naming configuration handed to an extension subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionEnvironment {
    /// Vocabulary terms guiding camel casing.
    #[serde(default)]
    pub lexicon: Vec<String>,
    /// Suffix appended to generated entity type names.
    #[serde(default)]
    pub entity_suffix: String,
}

impl From<NamingConfig> for ExtensionEnvironment {
    fn from(config: NamingConfig) -> Self {
        Self { lexicon: config.lexicon, entity_suffix: config.entity_suffix }
    }
}

impl From<ExtensionEnvironment> for NamingConfig {
    fn from(environment: ExtensionEnvironment) -> Self {
        Self { lexicon: environment.lexicon, entity_suffix: environment.entity_suffix }
    }
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Tagged response written by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtensionResponse<T> {
    /// The handler produced an output payload.
    Success(T),
    /// The handler or its decoding failed with a message.
    Failure(String),
}

// ============================================================================
// SECTION: Generation Payloads
// ============================================================================

/// Output destination selector for generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputDirectory {
    /// The application target's output directory.
    App,
    /// The application test target's output directory.
    AppTests,
    /// The test-support target's output directory.
    AppTestSupport,
    /// An explicit directory path.
    Custom(PathBuf),
}

/// Selector narrowing which description element a command applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DescriptionSelector {
    /// Every element in the aggregate.
    All,
    /// One subtype by name.
    Subtype(String),
    /// One entity by name.
    Entity(String),
    /// One endpoint payload by name.
    Endpoint(String),
}

/// Canonical input payload for generator extensions.
///
/// # Invariants
/// - `descriptions` is a deep-copied snapshot; extensions never observe
///   host-side mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Snapshot of the descriptions aggregate.
    pub descriptions: Descriptions,
    /// Element the command applies to.
    pub selector: DescriptionSelector,
    /// Destination for generated files.
    pub directory: OutputDirectory,
}

/// One generated source file returned by an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    /// Path relative to the resolved output directory.
    pub path: PathBuf,
    /// File contents.
    pub content: String,
}
