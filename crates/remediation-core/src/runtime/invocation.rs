// crates/remediation-core/src/runtime/invocation.rs
// ============================================================================
// Module: Invocation Result
// Description: Proxy-style `{statusCode, body}` response for the caller.
// Purpose: Always hand the invoking environment a well-formed response.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The body is a JSON string, not a nested object, matching the proxy
//! integration response shape. Status 200 means the pipeline reached a gate
//! decision, whatever the action; status 500 means configuration was broken.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::core::ActionKind;
use crate::core::Confidence;
use crate::core::GateState;
use crate::core::OperatingMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message included in successful response bodies.
pub const SUCCESS_MESSAGE: &str = "Remediation gate processed alarm successfully";

/// Maximum reasoning excerpt length in a response body, in characters.
pub const REASONING_EXCERPT_CHARS: usize = 200;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationBody {
    /// Fixed success message.
    pub message: String,
    /// Alarm name.
    pub alarm: String,
    /// Resolved action kind.
    pub action: ActionKind,
    /// Final confidence.
    pub confidence: Confidence,
    /// Operating mode.
    pub mode: OperatingMode,
    /// Terminal gate state.
    pub state: GateState,
    /// True when the security overlay replaced the action.
    pub safety_override: bool,
    /// Leading part of the reasoning text.
    pub reasoning: String,
}

impl InvocationBody {
    /// Builds a body, truncating the reasoning excerpt.
    #[must_use]
    pub fn new(
        alarm: &str,
        action: ActionKind,
        confidence: Confidence,
        mode: OperatingMode,
        state: GateState,
        safety_override: bool,
        reasoning: &str,
    ) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            alarm: alarm.to_string(),
            action,
            confidence,
            mode,
            state,
            safety_override,
            reasoning: reasoning.chars().take(REASONING_EXCERPT_CHARS).collect(),
        }
    }
}

/// Response returned to the invoking environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    /// HTTP-style status code.
    pub status_code: u16,
    /// JSON-encoded body.
    pub body: String,
}

impl InvocationResult {
    /// Builds a 200 response around a success body.
    #[must_use]
    pub fn success(body: &InvocationBody) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self {
                status_code: 200,
                body,
            },
            Err(err) => Self::failure(&format!("response serialization failed: {err}")),
        }
    }

    /// Builds a 500 response with an error body.
    #[must_use]
    pub fn failure(error: &str) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": error }).to_string(),
        }
    }

    /// Returns true for a 200 response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
