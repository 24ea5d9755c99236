// crates/remediation-core/src/runtime/gate.rs
// ============================================================================
// Module: Safety Gate
// Description: Mode and confidence gate in front of the execution backend.
// Purpose: Dispatch only when the deployment is active and the model is sure.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The gate is evaluated once per invocation and makes exactly one
//! transition out of `PENDING`. Checks run in order: operating mode,
//! confidence threshold, presence of a command. Only then is the backend
//! called, and a failed dispatch is recorded rather than retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ActionDescriptor;
use crate::core::ExecutionRequest;
use crate::core::ExecutionResult;
use crate::core::GateState;
use crate::core::OperatingMode;
use crate::interfaces::ExecutionBackend;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pre-dispatch decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Hand the request to the backend.
    Dispatch(ExecutionRequest),
    /// Do not dispatch; the state says why.
    Skip(GateState),
}

/// Terminal gate outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    /// Terminal state.
    pub state: GateState,
    /// Execution result.
    pub execution: ExecutionResult,
    /// Request sent to the backend, when one was sent.
    pub request: Option<ExecutionRequest>,
}

/// Safety gate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyGate {
    /// Operating mode.
    mode: OperatingMode,
    /// Prefix for dispatch comments.
    comment_prefix: String,
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl SafetyGate {
    /// Builds a gate for the given mode.
    #[must_use]
    pub fn new(mode: OperatingMode, comment_prefix: impl Into<String>) -> Self {
        Self {
            mode,
            comment_prefix: comment_prefix.into(),
        }
    }

    /// Decides whether the action should be dispatched.
    #[must_use]
    pub fn decide(&self, action: &ActionDescriptor) -> GateDecision {
        if !self.mode.permits_execution() {
            return GateDecision::Skip(GateState::SkippedDryRun);
        }
        if !action.confidence.meets_execution_threshold() {
            return GateDecision::Skip(GateState::SkippedLowConfidence);
        }
        ExecutionRequest::for_action(action, &self.comment_prefix)
            .map_or(GateDecision::Skip(GateState::SkippedManualAction), GateDecision::Dispatch)
    }

    /// Evaluates the gate and dispatches through the backend when permitted.
    pub fn evaluate(&self, action: &ActionDescriptor, backend: &dyn ExecutionBackend) -> GateOutcome {
        match self.decide(action) {
            GateDecision::Skip(state) => GateOutcome {
                state,
                execution: ExecutionResult::skipped(state),
                request: None,
            },
            GateDecision::Dispatch(request) => match backend.dispatch(&request) {
                Ok(receipt) => GateOutcome {
                    state: GateState::Executed,
                    execution: ExecutionResult::executed(&receipt),
                    request: Some(request),
                },
                Err(err) => GateOutcome {
                    state: GateState::ExecutionError,
                    execution: ExecutionResult::failed(err.to_string()),
                    request: Some(request),
                },
            },
        }
    }
}
