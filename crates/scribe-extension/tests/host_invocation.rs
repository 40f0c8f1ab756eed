// crates/scribe-extension/tests/host_invocation.rs
// ============================================================================
// Module: Extension Host Invocation Tests
// Description: Scripted fake extensions driven through the full host path.
// Purpose: Validate build caching, invocation failures, and responses.
// ============================================================================

//! Host-side coverage against scripted fake extension binaries: scratch
//! file handover, response decoding, non-zero exits, and the build-once
//! cache.

#![cfg(unix)]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use scribe_core::DescriptionError;
use scribe_extension::BuildCommand;
use scribe_extension::EXTENSION_EXECUTABLE;
use scribe_extension::ExtensionError;
use scribe_extension::ExtensionHost;
use serde::Deserialize;
use serde::Serialize;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Toy extension payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ToyPayload {
    /// Field names the fake extension echoes.
    fields: Vec<String>,
}

/// Build command that only records its invocations in `build.log`.
fn logging_build_command() -> BuildCommand {
    BuildCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "echo built >> build.log".to_string()],
    }
}

/// Creates an extension root whose executable is the given shell script.
fn scripted_extension(root: &Path, script_body: &str) -> TestResult {
    let executable = root.join(EXTENSION_EXECUTABLE);
    let parent = executable.parent().ok_or("expected an executable parent directory")?;
    fs::create_dir_all(parent)?;
    fs::write(&executable, format!("#!/bin/sh\n{script_body}\n"))?;
    fs::set_permissions(&executable, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

// ============================================================================
// SECTION: Success Path
// ============================================================================

#[test]
fn request_hands_over_scratch_files_and_decodes_the_response() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(
        root.path(),
        concat!(
            "test -f \"$2/input.json\" || exit 9\n",
            "test -f \"$2/environment.json\" || exit 9\n",
            "printf '{\"kind\":\"success\",\"value\":{\"fields\":[\"beta\",\"alpha\"]}}' ",
            "> \"$2/output.json\"",
        ),
    )?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: vec!["alpha".to_string(), "beta".to_string()] };
    let output: ToyPayload = host.request(root.path(), "generate", &input)?;
    assert_eq!(output.fields, ["beta", "alpha"]);
    Ok(())
}

#[test]
fn the_command_name_reaches_the_extension() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(
        root.path(),
        concat!(
            "printf '{\"kind\":\"success\",\"value\":{\"fields\":[\"%s\"]}}' \"$1\" ",
            "> \"$2/output.json\"",
        ),
    )?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: Vec::new() };
    let output: ToyPayload = host.request(root.path(), "emit_models", &input)?;
    assert_eq!(output.fields, ["emit_models"]);
    Ok(())
}

// ============================================================================
// SECTION: Failure Paths
// ============================================================================

#[test]
fn reported_failures_surface_as_extension_errors() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(
        root.path(),
        "printf '{\"kind\":\"failure\",\"value\":\"boom\"}' > \"$2/output.json\"",
    )?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: Vec::new() };
    let result: Result<ToyPayload, ExtensionError> =
        host.request(root.path(), "generate", &input);
    let Err(err) = result else {
        return Err("expected a reported failure".into());
    };
    assert!(matches!(&err, ExtensionError::Failed(message) if message == "boom"));

    let description_err = DescriptionError::from(err);
    assert!(matches!(
        &description_err,
        DescriptionError::Extension(message) if message.contains("boom"),
    ));
    Ok(())
}

#[test]
fn non_zero_exits_fail_even_with_an_output_file() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(
        root.path(),
        concat!(
            "printf '{\"kind\":\"success\",\"value\":{\"fields\":[]}}' > \"$2/output.json\"\n",
            "exit 3",
        ),
    )?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: Vec::new() };
    let result: Result<ToyPayload, ExtensionError> =
        host.request(root.path(), "generate", &input);
    assert!(matches!(result, Err(ExtensionError::Invocation { .. })));
    Ok(())
}

#[test]
fn failing_builds_stop_the_request() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(root.path(), "true")?;

    let host = ExtensionHost::new(BuildCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "exit 7".to_string()],
    });
    let input = ToyPayload { fields: Vec::new() };
    let result: Result<ToyPayload, ExtensionError> =
        host.request(root.path(), "generate", &input);
    assert!(matches!(result, Err(ExtensionError::Build { .. })));
    Ok(())
}

#[test]
fn undecodable_output_is_a_payload_error() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(root.path(), "printf 'not json' > \"$2/output.json\"")?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: Vec::new() };
    let result: Result<ToyPayload, ExtensionError> =
        host.request(root.path(), "generate", &input);
    assert!(matches!(result, Err(ExtensionError::Payload(_))));
    Ok(())
}

// ============================================================================
// SECTION: Build Cache
// ============================================================================

#[test]
fn each_extension_path_builds_once_per_host() -> TestResult {
    let root = tempfile::tempdir()?;
    scripted_extension(
        root.path(),
        "printf '{\"kind\":\"success\",\"value\":{\"fields\":[]}}' > \"$2/output.json\"",
    )?;

    let host = ExtensionHost::new(logging_build_command());
    let input = ToyPayload { fields: Vec::new() };
    let _: ToyPayload = host.request(root.path(), "generate", &input)?;
    let _: ToyPayload = host.request(root.path(), "generate", &input)?;
    let _: ToyPayload = host.request(root.path(), "verify", &input)?;

    let log = fs::read_to_string(root.path().join("build.log"))?;
    assert_eq!(log.lines().count(), 1, "the build command must run once per path");
    Ok(())
}
