// crates/remediation-cli/src/preview.rs
// ============================================================================
// Module: Offline Resolution Preview
// Description: Resolves an action and gate decision without any network call.
// Purpose: Let operators inspect the metric table and gate rules locally.
// Dependencies: remediation-core, serde, time
// ============================================================================

//! ## Overview
//! A preview builds a synthetic alarm, assumes a model confidence, and runs
//! the same resolver and gate the pipeline uses. Nothing is dispatched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use remediation_core::ActionCatalog;
use remediation_core::ActionDescriptor;
use remediation_core::AlarmRecord;
use remediation_core::Confidence;
use remediation_core::DEFAULT_COMMENT_PREFIX;
use remediation_core::ExecutionRequest;
use remediation_core::GateDecision;
use remediation_core::GateState;
use remediation_core::OperatingMode;
use remediation_core::ReasoningResult;
use remediation_core::SafetyGate;
use remediation_core::resolve_action;
use serde::Serialize;
use serde_json::json;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Model label recorded for previews.
const PREVIEW_MODEL: &str = "offline-preview";

/// Preview inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    /// Metric name to resolve.
    pub metric_name: String,
    /// Alarm name (drives the security overlay).
    pub alarm_name: String,
    /// Assumed model confidence.
    pub confidence: Confidence,
    /// Mode the gate is evaluated under.
    pub mode: OperatingMode,
    /// Use the extended catalog.
    pub extended: bool,
}

/// Preview outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Resolved action.
    pub action: ActionDescriptor,
    /// Gate state the pipeline would record without a backend failure.
    pub gate_state: GateState,
    /// Request that would be dispatched.
    pub request: Option<ExecutionRequest>,
}

// ============================================================================
// SECTION: Preview
// ============================================================================

/// Resolves an action and gate decision for the request.
#[must_use]
pub fn preview(request: &PreviewRequest) -> Preview {
    let catalog = if request.extended { ActionCatalog::extended() } else { ActionCatalog::base() };
    let event = json!({
        "detail": {
            "alarmName": request.alarm_name,
            "state": {"value": "ALARM", "reason": "offline preview"},
            "configuration": {"metricName": request.metric_name},
        }
    });
    let alarm = AlarmRecord::from_event(&event, OffsetDateTime::now_utc());
    let reasoning = ReasoningResult::from_model_text(
        PREVIEW_MODEL,
        &format!("Confidence: {}", request.confidence.value()),
    );
    let action = resolve_action(catalog, &alarm, &reasoning);
    let gate = SafetyGate::new(request.mode, DEFAULT_COMMENT_PREFIX);
    let (gate_state, request) = match gate.decide(&action) {
        GateDecision::Dispatch(request) => (GateState::Executed, Some(request)),
        GateDecision::Skip(state) => (state, None),
    };
    Preview {
        action,
        gate_state,
        request,
    }
}
