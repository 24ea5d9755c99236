// crates/remediation-core/src/core/reasoning.rs
// ============================================================================
// Module: Reasoning Results
// Description: Model output parsing and the reasoning result record.
// Purpose: Turn raw model text into a bounded, auditable assessment.
// Dependencies: serde, serde_json, crate::core::confidence
// ============================================================================

//! ## Overview
//! Model output is parsed best-effort. The substring between the first `{`
//! and the last `}` is tried as a JSON object with `action`, `confidence`,
//! and `reasoning`; anything else is treated as unstructured prose. Either
//! way the result carries a clamped confidence. A failed model call yields a
//! zero-confidence result so that a missing answer is never mistaken for a
//! confident one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::confidence::Confidence;
use crate::core::confidence::MAX_CONFIDENCE;
use crate::core::confidence::extract_confidence_or_default;

// ============================================================================
// SECTION: Model Output
// ============================================================================

/// Assessment parsed from a JSON object embedded in model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAssessment {
    /// Action token suggested by the model.
    pub action: Option<String>,
    /// Confidence reported by the model.
    pub confidence: Option<Confidence>,
    /// Reasoning text reported by the model.
    pub reasoning: Option<String>,
}

/// Parsed model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutput {
    /// A JSON object was found and parsed.
    Structured(StructuredAssessment),
    /// No usable JSON object; the whole text is the reasoning.
    Unstructured(String),
}

/// Parses model output into a structured or unstructured result.
#[must_use]
pub fn parse_model_output(text: &str) -> ModelOutput {
    embedded_object(text).map_or_else(
        || ModelOutput::Unstructured(text.to_string()),
        |object| {
            ModelOutput::Structured(StructuredAssessment {
                action: object
                    .get("action")
                    .and_then(Value::as_str)
                    .map(|action| action.trim().to_string())
                    .filter(|action| !action.is_empty()),
                confidence: object.get("confidence").and_then(confidence_from_value),
                reasoning: object
                    .get("reasoning")
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
            })
        },
    )
}

/// Locates and parses the outermost JSON object in the text.
fn embedded_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start ..= end]).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Reads a confidence from a JSON number or numeric string.
fn confidence_from_value(value: &Value) -> Option<Confidence> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX))
            .or_else(|| number.as_f64().map(rounded_score))
            .map(Confidence::clamped),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(rounded_score))
                .map(Confidence::clamped)
        }
        _ => None,
    }
}

/// Rounds a fractional score into the confidence range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to [0, 10] before the cast."
)]
fn rounded_score(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_CONFIDENCE)) as i64
}

// ============================================================================
// SECTION: Reasoning Result
// ============================================================================

/// Reasoning outcome recorded for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// Reasoning text (model prose, the parsed reasoning field, or a failure message).
    pub text: String,
    /// Clamped confidence.
    pub confidence: Confidence,
    /// Model identifier.
    pub model: String,
    /// Whether the model call succeeded.
    pub success: bool,
    /// Whether the response contained a parseable JSON assessment.
    pub structured: bool,
    /// Action suggested by the model; advisory only.
    pub suggested_action: Option<String>,
}

impl ReasoningResult {
    /// Builds a result from successful model output.
    ///
    /// Structured confidence wins; otherwise the text is scanned and the
    /// default applies when no score is found.
    #[must_use]
    pub fn from_model_text(model: &str, text: &str) -> Self {
        match parse_model_output(text) {
            ModelOutput::Structured(assessment) => {
                let reasoning = assessment.reasoning.unwrap_or_else(|| text.to_string());
                let confidence = assessment
                    .confidence
                    .unwrap_or_else(|| extract_confidence_or_default(&reasoning));
                Self {
                    text: reasoning,
                    confidence,
                    model: model.to_string(),
                    success: true,
                    structured: true,
                    suggested_action: assessment.action,
                }
            }
            ModelOutput::Unstructured(reasoning) => Self {
                confidence: extract_confidence_or_default(&reasoning),
                text: reasoning,
                model: model.to_string(),
                success: true,
                structured: false,
                suggested_action: None,
            },
        }
    }

    /// Builds the zero-confidence result for a failed model call.
    #[must_use]
    pub fn failed(model: &str, detail: &str) -> Self {
        Self {
            text: format!("reasoning unavailable: {detail}"),
            confidence: Confidence::ZERO,
            model: model.to_string(),
            success: false,
            structured: false,
            suggested_action: None,
        }
    }
}
