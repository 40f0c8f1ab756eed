// crates/scribe-core/src/model/endpoint/tests.rs
// ============================================================================
// Module: Endpoint Model Unit Tests
// Description: Base-key forms and endpoint name normalization.
// Purpose: Validate the wire forms preserved by the endpoint model.
// Dependencies: scribe-core, serde_json
// ============================================================================

//! ## Overview
//! Covers the two base-key wire forms and the path normalization used to
//! order endpoints deterministically.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use serde_json::json;

use crate::model::endpoint::BaseKey;
use crate::model::endpoint::EndpointPayload;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn base_keys_preserve_their_wire_form() -> TestResult {
    let single: BaseKey = serde_json::from_value(json!("data"))?;
    assert_eq!(single, BaseKey::Single("data".to_string()));
    assert_eq!(serde_json::to_value(&single)?, json!("data"));

    let array: BaseKey = serde_json::from_value(json!(["data", "inner"]))?;
    assert_eq!(array, BaseKey::Array(vec!["data".to_string(), "inner".to_string()]));
    assert_eq!(serde_json::to_value(&array)?, json!(["data", "inner"]));
    Ok(())
}

#[test]
fn base_keys_join_into_dotted_paths() {
    assert_eq!(BaseKey::Single("data".to_string()).joined(), "data");
    assert_eq!(
        BaseKey::Array(vec!["data".to_string(), "inner".to_string()]).joined(),
        "data.inner",
    );
}

#[test]
fn normalized_path_names_strip_parameters_and_slashes() {
    let endpoint = EndpointPayload {
        name: "users/:id/library".to_string(),
        read_payload: None,
        write_payload: None,
        tests: None,
    };
    assert_eq!(endpoint.normalized_path_name(), "users_id_library");

    let plain = EndpointPayload {
        name: "users".to_string(),
        read_payload: None,
        write_payload: None,
        tests: None,
    };
    assert_eq!(plain.normalized_path_name(), "users");
}
