// crates/scribe-extension/src/responder.rs
// ============================================================================
// Module: Extension Responder
// Description: Extension-side handling of one scratch-directory command.
// Purpose: Decode the input, run the handler, and always write a response.
// Dependencies: scribe-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The responder runs inside the extension process. It installs the
//! host's naming configuration from `environment.json`, decodes
//! `input.json`, invokes the handler, and writes a tagged response to
//! `output.json`. Decoding and handler failures are converted into a
//! `failure` response rather than aborting; only the final write of
//! `output.json` itself can fail the call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error;
use std::fs;
use std::path::Path;

use scribe_core::naming;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::host::ExtensionError;
use crate::protocol::ENVIRONMENT_FILE;
use crate::protocol::ExtensionEnvironment;
use crate::protocol::ExtensionResponse;
use crate::protocol::INPUT_FILE;
use crate::protocol::OUTPUT_FILE;

// ============================================================================
// SECTION: Responder
// ============================================================================

/// Handles one command against a scratch directory.
///
/// # Errors
///
/// Returns [`ExtensionError`] only when `output.json` cannot be written;
/// every earlier failure is reported through the response itself.
pub fn respond<I, O, F>(io_path: &Path, handler: F) -> Result<(), ExtensionError>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> Result<O, Box<dyn Error>>,
{
    let response = match run_handler(io_path, handler) {
        Ok(output) => ExtensionResponse::Success(output),
        Err(message) => ExtensionResponse::Failure(format!("Extension error: {message}")),
    };
    let output_path = io_path.join(OUTPUT_FILE);
    let text = serde_json::to_string_pretty(&response)
        .map_err(|err| ExtensionError::Payload(err.to_string()))?;
    fs::write(&output_path, text)
        .map_err(|err| ExtensionError::Io { path: output_path, message: err.to_string() })
}

/// Installs the environment, decodes the input, and runs the handler.
fn run_handler<I, O, F>(io_path: &Path, handler: F) -> Result<O, String>
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> Result<O, Box<dyn Error>>,
{
    let environment_path = io_path.join(ENVIRONMENT_FILE);
    let environment_text =
        fs::read_to_string(&environment_path).map_err(|err| err.to_string())?;
    let environment: ExtensionEnvironment =
        serde_json::from_str(&environment_text).map_err(|err| err.to_string())?;
    naming::install(environment.into());

    let input_path = io_path.join(INPUT_FILE);
    let input_text = fs::read_to_string(&input_path).map_err(|err| err.to_string())?;
    let input: I = serde_json::from_str(&input_text).map_err(|err| err.to_string())?;

    handler(input).map_err(|err| err.to_string())
}
