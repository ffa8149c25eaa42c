//! Tests for error types.
//!
//! Validates display formatting, the structured-error JSON round trip, and
//! the wrap-or-passthrough conversion boundary.

use cniskel::constants::{ERR_CODE_GENERIC, ERR_CODE_INCOMPATIBLE_VERSION};
use cniskel::error::{Error, StructuredError};

// =============================================================================
// Display Tests
// =============================================================================

#[test]
fn test_missing_env_vars_display() {
    let msg = Error::MissingEnvVars.to_string();
    assert_eq!(msg, "required env variables missing");
}

#[test]
fn test_unknown_command_display_names_offender() {
    let msg = Error::UnknownCommand("FROBNICATE".to_string()).to_string();
    assert!(msg.contains("unknown CNI_COMMAND"), "should name the condition");
    assert!(msg.contains("FROBNICATE"), "should include the offending string");
}

#[test]
fn test_structured_display_appends_details() {
    let with = StructuredError::incompatible_version("nope", Some("why".to_string()));
    assert_eq!(with.to_string(), "nope; why");

    let without = StructuredError::generic("nope");
    assert_eq!(without.to_string(), "nope");
}

// =============================================================================
// JSON Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_with_details() {
    let original = StructuredError::incompatible_version(
        "incompatible CNI versions",
        Some("config is \"0.5.0\"".to_string()),
    );

    let json = serde_json::to_string(&original).unwrap();
    let decoded: StructuredError = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(decoded.code, ERR_CODE_INCOMPATIBLE_VERSION);
}

#[test]
fn test_round_trip_without_details() {
    let original = StructuredError::generic("something failed");

    let json = serde_json::to_string(&original).unwrap();
    assert!(!json.contains("details"), "absent details omitted from JSON");

    let decoded: StructuredError = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(decoded.details, None);
}

#[test]
fn test_print_output_is_parseable() {
    let original = StructuredError::generic("boom");
    let mut out = Vec::new();
    original.print(&mut out).expect("print should succeed");

    assert!(out.ends_with(b"\n"), "output is newline-terminated");
    let decoded: StructuredError = serde_json::from_slice(&out).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_wire_field_names() {
    let json = serde_json::to_string(&StructuredError {
        code: 100,
        msg: "m".to_string(),
        details: Some("d".to_string()),
    })
    .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(doc["code"], 100);
    assert_eq!(doc["msg"], "m");
    assert_eq!(doc["details"], "d");
}

// =============================================================================
// Conversion Boundary Tests
// =============================================================================

#[test]
fn test_already_structured_error_is_not_rewrapped() {
    let handler_error = StructuredError {
        code: 42,
        msg: "handler-chosen".to_string(),
        details: Some("kept verbatim".to_string()),
    };

    let converted = StructuredError::from(Error::Structured(handler_error.clone()));
    assert_eq!(converted, handler_error, "same code, message, and details");
}

#[test]
fn test_plain_error_is_wrapped_with_generic_code() {
    let converted = StructuredError::from(Error::Plugin("bridge device missing".to_string()));
    assert_eq!(converted.code, ERR_CODE_GENERIC);
    assert_eq!(converted.msg, "bridge device missing");
    assert_eq!(converted.details, None);
}
