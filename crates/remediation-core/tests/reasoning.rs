// crates/remediation-core/tests/reasoning.rs
// ============================================================================
// Module: Reasoning Parsing Tests
// Description: Confidence extraction and embedded-JSON model output parsing.
// Purpose: Ensure model text always yields a bounded, conservative result.
// Dependencies: remediation-core
// ============================================================================

//! Confidence extraction and model output parsing tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use remediation_core::Confidence;
use remediation_core::ModelOutput;
use remediation_core::ReasoningResult;
use remediation_core::extract_confidence;
use remediation_core::extract_confidence_or_default;
use remediation_core::parse_model_output;

#[test]
fn confidence_is_found_case_insensitively() {
    assert_eq!(extract_confidence("CONFIDENCE: 8").map(Confidence::value), Some(8));
    assert_eq!(extract_confidence("3. Confidence 9/10").map(Confidence::value), Some(9));
    assert_eq!(extract_confidence("confidence:7 and confidence: 2").map(Confidence::value), Some(7));
}

#[test]
fn confidence_out_of_range_is_clamped() {
    assert_eq!(extract_confidence("Confidence: 42").map(Confidence::value), Some(10));
    assert_eq!(
        extract_confidence("Confidence: 99999999999999999999999").map(Confidence::value),
        Some(10)
    );
    assert_eq!(Confidence::clamped(-3).value(), 0);
}

#[test]
fn missing_confidence_defaults_to_five() {
    assert_eq!(extract_confidence("Scale the ASG."), None);
    assert_eq!(extract_confidence_or_default("Confidence: high").value(), 5);
}

#[test]
fn threshold_is_seven() {
    assert!(!Confidence::clamped(6).meets_execution_threshold());
    assert!(Confidence::clamped(7).meets_execution_threshold());
}

#[test]
fn embedded_json_is_parsed_between_outer_braces() {
    let output = parse_model_output(
        "Here is my answer:\n{\"action\": \"cleanup_logs\", \"confidence\": 8, \"reasoning\": \
         \"disk at 95%\"}\nThanks.",
    );

    let ModelOutput::Structured(assessment) = output else {
        panic!("expected structured output");
    };
    assert_eq!(assessment.action.as_deref(), Some("cleanup_logs"));
    assert_eq!(assessment.confidence.map(Confidence::value), Some(8));
    assert_eq!(assessment.reasoning.as_deref(), Some("disk at 95%"));
}

#[test]
fn structured_confidence_accepts_floats_and_strings() {
    let float = parse_model_output("{\"confidence\": 7.6}");
    let text = parse_model_output("{\"confidence\": \" 9 \"}");
    let huge = parse_model_output("{\"confidence\": 18446744073709551615}");

    for (output, expected) in [(float, 8), (text, 9), (huge, 10)] {
        let ModelOutput::Structured(assessment) = output else {
            panic!("expected structured output");
        };
        assert_eq!(assessment.confidence.map(Confidence::value), Some(expected));
    }
}

#[test]
fn non_object_or_broken_json_is_unstructured() {
    for text in ["no braces here", "} backwards {", "{not json}", "{\"a\": 1} and {\"b\": 2}"] {
        assert!(
            matches!(parse_model_output(text), ModelOutput::Unstructured(_)),
            "expected unstructured for {text}"
        );
    }
}

#[test]
fn free_text_result_uses_extracted_confidence() {
    let result = ReasoningResult::from_model_text("llama", "Root cause: leak. Confidence: 9");

    assert!(result.success);
    assert!(!result.structured);
    assert_eq!(result.confidence.value(), 9);
    assert_eq!(result.text, "Root cause: leak. Confidence: 9");
    assert_eq!(result.suggested_action, None);
}

#[test]
fn structured_result_without_confidence_scans_reasoning() {
    let result = ReasoningResult::from_model_text(
        "llama",
        "{\"action\": \"restart_service\", \"reasoning\": \"pool exhausted, confidence 8\"}",
    );

    assert!(result.structured);
    assert_eq!(result.confidence.value(), 8);
    assert_eq!(result.suggested_action.as_deref(), Some("restart_service"));
}

#[test]
fn failed_result_has_zero_confidence() {
    let result = ReasoningResult::failed("llama", "timed out");

    assert!(!result.success);
    assert_eq!(result.confidence, Confidence::ZERO);
    assert!(result.text.contains("timed out"));
}
