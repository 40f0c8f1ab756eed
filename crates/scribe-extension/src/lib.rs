// crates/scribe-extension/src/lib.rs
// ============================================================================
// Module: Scribe Extension Library
// Description: File-based subprocess protocol for generator extensions.
// Purpose: Let third-party generators plug into a run out-of-process.
// Dependencies: scribe-core, serde, serde_json, tempfile, thiserror, tracing
// ============================================================================

//! ## Overview
//! Extensions are standalone programs driven through files in a
//! per-invocation scratch directory: the host serializes the input and
//! the process naming configuration, builds the extension once per
//! process lifetime, executes it with the command name and scratch path,
//! and decodes the tagged response. The responder half runs inside the
//! extension and guarantees a response is always written, converting any
//! decode or handler failure into a `failure` value.
//!
//! ## Index
//! - Host: [`ExtensionHost`], [`request`], [`BuildCommand`]
//! - Responder: [`respond`]
//! - Wire types: [`ExtensionResponse`], [`GenerationRequest`],
//!   [`OutputDirectory`], [`DescriptionSelector`]

/// Host-side build-and-invoke driver.
pub mod host;
/// Wire shapes for the scratch-directory files.
pub mod protocol;
/// Extension-side command handling.
pub mod responder;

pub use host::BuildCommand;
pub use host::EXTENSION_EXECUTABLE;
pub use host::ExtensionError;
pub use host::ExtensionHost;
pub use host::request;
pub use protocol::DescriptionSelector;
pub use protocol::ENVIRONMENT_FILE;
pub use protocol::ExtensionEnvironment;
pub use protocol::ExtensionResponse;
pub use protocol::GeneratedFile;
pub use protocol::GenerationRequest;
pub use protocol::INPUT_FILE;
pub use protocol::OUTPUT_FILE;
pub use protocol::OutputDirectory;
pub use responder::respond;
