// crates/scribe-core/tests/default_value_unit.rs
// ============================================================================
// Module: Default Value Tests
// Description: Tag dispatch for default-value literals in property position.
// Purpose: Validate the string classification table end to end.
// ============================================================================

//! Default-value decoding through the property codec, covering the full
//! tag dispatch table.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use scribe_core::DefaultValue;
use scribe_core::Descriptions;
use serde_json::json;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Decodes an entity with one property carrying `default_value`.
fn decode_default(default_value: serde_json::Value) -> Result<Option<DefaultValue>, String> {
    let descriptions = Descriptions::from_json_value(json!({
        "entities": [{
            "name": "Sample",
            "properties": [{
                "name": "value",
                "propertyType": "string",
                "defaultValue": default_value,
            }],
        }],
        "version": "1.0",
    }))
    .map_err(|err| err.to_string())?;
    let entity = descriptions.entity("Sample").map_err(|err| err.to_string())?;
    Ok(entity.properties[0].default_value.clone())
}

#[test]
fn string_tag_dispatch_matches_the_specification_table() -> TestResult {
    assert_eq!(decode_default(json!("1.5s"))?, Some(DefaultValue::Seconds(1.5)));
    assert_eq!(decode_default(json!("250ms"))?, Some(DefaultValue::Milliseconds(250.0)));
    assert_eq!(
        decode_default(json!(".premium"))?,
        Some(DefaultValue::EnumCase("premium".to_string())),
    );
    assert_eq!(decode_default(json!("current_date"))?, Some(DefaultValue::CurrentDate));
    assert_eq!(decode_default(json!("nil"))?, Some(DefaultValue::Nil));
    assert_eq!(
        decode_default(json!("hello"))?,
        Some(DefaultValue::String("hello".to_string())),
    );
    Ok(())
}

#[test]
fn typed_json_values_win_over_string_dispatch() -> TestResult {
    assert_eq!(decode_default(json!(true))?, Some(DefaultValue::Bool(true)));
    assert_eq!(decode_default(json!(12))?, Some(DefaultValue::Int(12)));
    assert_eq!(decode_default(json!(0.25))?, Some(DefaultValue::Float(0.25)));
    Ok(())
}

#[test]
fn date_strings_decode_before_plain_strings() -> TestResult {
    let decoded = decode_default(json!("2021-06-01T09:30:00Z"))?;
    assert!(matches!(decoded, Some(DefaultValue::Date(_))));
    Ok(())
}

#[test]
fn default_values_round_trip_through_the_codec() -> TestResult {
    for value in
        [json!("1.5s"), json!("250ms"), json!(".premium"), json!("nil"), json!(42), json!(true)]
    {
        let first = decode_default(value)?;
        let descriptions = Descriptions::from_json_value(json!({
            "entities": [{
                "name": "Sample",
                "properties": [{
                    "name": "value",
                    "propertyType": "string",
                    "defaultValue": first.clone(),
                }],
            }],
            "version": "1.0",
        }))
        .map_err(|err| err.to_string())?;
        let entity = descriptions.entity("Sample").map_err(|err| err.to_string())?;
        assert_eq!(entity.properties[0].default_value, first);
    }
    Ok(())
}
