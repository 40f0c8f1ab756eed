// crates/scribe-extension/src/host.rs
// ============================================================================
// Module: Extension Host
// Description: Builds and invokes extension subprocesses over scratch files.
// Purpose: Drive one extension command from input to decoded response.
// Dependencies: scribe-core, serde, serde_json, tempfile, thiserror, tracing
// ============================================================================

//! ## Overview
//! A request drops `input.json` and `environment.json` into a fresh
//! scratch directory under the OS temporary root, builds the extension in
//! release profile the first time its path is seen in this process, runs
//! `<extension>/target/release/extension <command> <scratch>`, and decodes
//! `output.json`. The scratch directory is released on every exit path;
//! a cleanup failure after a successful response is logged, never
//! re-raised.
//!
//! Requests are issued sequentially by the orchestrating driver; the
//! built-paths set merely tolerates concurrent consultation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;
use std::sync::Mutex;

use scribe_core::DescriptionError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::protocol::ENVIRONMENT_FILE;
use crate::protocol::ExtensionEnvironment;
use crate::protocol::ExtensionResponse;
use crate::protocol::INPUT_FILE;
use crate::protocol::OUTPUT_FILE;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while driving an extension subprocess.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// Filesystem failure in the scratch directory or extension root.
    #[error("extension io failure at '{path}': {message}")]
    Io {
        /// Path the operation failed on.
        path: PathBuf,
        /// Underlying failure message.
        message: String,
    },
    /// Payload encoding or response decoding failure.
    #[error("extension payload failure: {0}")]
    Payload(String),
    /// The extension build command exited unsuccessfully.
    #[error("extension build failed in '{path}': {message}")]
    Build {
        /// Extension root the build ran in.
        path: PathBuf,
        /// Build diagnostics.
        message: String,
    },
    /// The extension executable exited unsuccessfully.
    #[error("extension invocation '{command}' failed: {message}")]
    Invocation {
        /// Command name passed to the extension.
        command: String,
        /// Exit diagnostics.
        message: String,
    },
    /// The extension reported a handler failure.
    #[error("extension reported failure: {0}")]
    Failed(String),
}

impl From<ExtensionError> for DescriptionError {
    fn from(err: ExtensionError) -> Self {
        Self::Extension(err.to_string())
    }
}

/// Wraps an io error with the path it occurred on.
fn io_error(path: &Path, err: &std::io::Error) -> ExtensionError {
    ExtensionError::Io { path: path.to_path_buf(), message: err.to_string() }
}

// ============================================================================
// SECTION: Build Command
// ============================================================================

/// Relative path of the built extension executable.
pub const EXTENSION_EXECUTABLE: &str = "target/release/extension";

/// Command used to build an extension in its root directory.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    /// Program to invoke.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            args: vec!["build".to_string(), "--release".to_string()],
        }
    }
}

// ============================================================================
// SECTION: Host
// ============================================================================

/// Host-side driver for extension subprocesses.
///
/// # Invariants
/// - Each extension path is built at most once per host lifetime.
#[derive(Debug)]
pub struct ExtensionHost {
    /// Build command run once per extension path.
    build_command: BuildCommand,
    /// Extension roots already built by this host.
    built: Mutex<BTreeSet<PathBuf>>,
}

impl Default for ExtensionHost {
    fn default() -> Self {
        Self::new(BuildCommand::default())
    }
}

impl ExtensionHost {
    /// Creates a host with a custom build command.
    #[must_use]
    pub fn new(build_command: BuildCommand) -> Self {
        Self { build_command, built: Mutex::new(BTreeSet::new()) }
    }

    /// Runs one extension command and decodes its response.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError`] when the scratch directory cannot be
    /// prepared, the build or invocation fails, the response does not
    /// decode, or the extension reports a failure.
    pub fn request<I: Serialize, O: DeserializeOwned>(
        &self,
        extension_path: &Path,
        command_name: &str,
        input: &I,
    ) -> Result<O, ExtensionError> {
        let scratch = tempfile::Builder::new()
            .prefix("scribe-extension-")
            .tempdir()
            .map_err(|err| io_error(&std::env::temp_dir(), &err))?;
        let result = self.request_in(scratch.path(), extension_path, command_name, input);
        if let Err(err) = scratch.close() {
            warn!(error = %err, "failed to delete extension scratch directory");
        }
        result
    }

    /// Runs the request against an already-created scratch directory.
    fn request_in<I: Serialize, O: DeserializeOwned>(
        &self,
        scratch: &Path,
        extension_path: &Path,
        command_name: &str,
        input: &I,
    ) -> Result<O, ExtensionError> {
        write_json(&scratch.join(INPUT_FILE), input)?;
        let environment = ExtensionEnvironment::from(scribe_core::naming::current());
        write_json(&scratch.join(ENVIRONMENT_FILE), &environment)?;
        self.ensure_built(extension_path)?;

        debug!(command = command_name, extension = %extension_path.display(), "invoking extension");
        let output = Command::new(extension_path.join(EXTENSION_EXECUTABLE))
            .arg(command_name)
            .arg(scratch)
            .current_dir(extension_path)
            .output()
            .map_err(|err| io_error(extension_path, &err))?;
        if !output.status.success() {
            return Err(ExtensionError::Invocation {
                command: command_name.to_string(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim(),
                ),
            });
        }

        let output_path = scratch.join(OUTPUT_FILE);
        let response_text =
            fs::read_to_string(&output_path).map_err(|err| io_error(&output_path, &err))?;
        let response: ExtensionResponse<O> = serde_json::from_str(&response_text)
            .map_err(|err| ExtensionError::Payload(err.to_string()))?;
        match response {
            ExtensionResponse::Success(value) => Ok(value),
            ExtensionResponse::Failure(message) => Err(ExtensionError::Failed(message)),
        }
    }

    /// Builds the extension once per host lifetime.
    fn ensure_built(&self, extension_path: &Path) -> Result<(), ExtensionError> {
        let mut built = match self.built.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if built.contains(extension_path) {
            return Ok(());
        }
        debug!(extension = %extension_path.display(), "building extension");
        let output = Command::new(&self.build_command.program)
            .args(&self.build_command.args)
            .current_dir(extension_path)
            .output()
            .map_err(|err| io_error(extension_path, &err))?;
        if !output.status.success() {
            return Err(ExtensionError::Build {
                path: extension_path.to_path_buf(),
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim(),
                ),
            });
        }
        built.insert(extension_path.to_path_buf());
        Ok(())
    }
}

/// Serializes a value into a scratch file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExtensionError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| ExtensionError::Payload(err.to_string()))?;
    fs::write(path, text).map_err(|err| io_error(path, &err))
}

// ============================================================================
// SECTION: Process Host
// ============================================================================

/// Process-wide default host backing the free [`request`] function.
static DEFAULT_HOST: LazyLock<ExtensionHost> = LazyLock::new(ExtensionHost::default);

/// Runs one extension command through the process-wide host.
///
/// # Errors
///
/// Returns [`ExtensionError`] under the same conditions as
/// [`ExtensionHost::request`].
pub fn request<I: Serialize, O: DeserializeOwned>(
    extension_path: &Path,
    command_name: &str,
    input: &I,
) -> Result<O, ExtensionError> {
    DEFAULT_HOST.request(extension_path, command_name, input)
}
