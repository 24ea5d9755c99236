// crates/remediation-core/src/core/execution.rs
// ============================================================================
// Module: Execution Model
// Description: Gate states, dispatch requests, and execution results.
// Purpose: Describe what the safety gate decided and what the backend returned.
// Dependencies: serde, crate::core::action
// ============================================================================

//! ## Overview
//! The safety gate moves from `PENDING` to exactly one terminal state. When
//! it dispatches, the action's command spec is lowered into an
//! [`ExecutionRequest`]: a document name plus list-valued parameters, sent
//! either as a Run Command or as an Automation execution. The backend answers
//! with a tracking reference, not a completion confirmation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::action::ActionDescriptor;
use crate::core::action::CommandSpec;
use crate::core::action::render_template;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Command document used for rendered shell commands.
pub const SHELL_DOCUMENT: &str = "AWS-RunShellScript";

/// Maximum length of a dispatch comment, in characters.
const MAX_COMMENT_CHARS: usize = 100;

// ============================================================================
// SECTION: Gate State
// ============================================================================

/// Safety gate states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    /// Not yet evaluated.
    #[default]
    Pending,
    /// Mode is not active; intent logged only.
    SkippedDryRun,
    /// Confidence is below the execution threshold.
    SkippedLowConfidence,
    /// The action has no command and is left to humans.
    SkippedManualAction,
    /// The backend accepted the dispatch.
    Executed,
    /// The dispatch failed.
    ExecutionError,
}

impl GateState {
    /// Returns the wire token for the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::SkippedDryRun => "SKIPPED_DRY_RUN",
            Self::SkippedLowConfidence => "SKIPPED_LOW_CONFIDENCE",
            Self::SkippedManualAction => "SKIPPED_MANUAL_ACTION",
            Self::Executed => "EXECUTED",
            Self::ExecutionError => "EXECUTION_ERROR",
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Dispatch Request
// ============================================================================

/// How the backend is asked to run a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Send a command document to targeted instances.
    RunCommand,
    /// Start an automation execution.
    Automation,
}

/// Backend-neutral dispatch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Dispatch mode.
    pub mode: DispatchMode,
    /// Document name.
    pub document: String,
    /// Document parameters; values are lists as the backend expects.
    pub parameters: BTreeMap<String, Vec<String>>,
    /// Operator-facing comment.
    pub comment: String,
}

impl ExecutionRequest {
    /// Lowers a descriptor into a request; `None` for actions without a command.
    #[must_use]
    pub fn for_action(action: &ActionDescriptor, comment_prefix: &str) -> Option<Self> {
        let command = action.command.as_ref()?;
        let (mode, document, parameters) = match command {
            CommandSpec::Automation {
                document,
            } => (DispatchMode::Automation, document.clone(), list_parameters(action)),
            CommandSpec::Document {
                document,
            } => (DispatchMode::RunCommand, document.clone(), list_parameters(action)),
            CommandSpec::Shell {
                template,
            } => {
                let mut parameters = BTreeMap::new();
                parameters.insert(
                    "commands".to_string(),
                    vec![render_template(template, &action.parameters)],
                );
                (DispatchMode::RunCommand, SHELL_DOCUMENT.to_string(), parameters)
            }
        };
        let comment: String = format!("{comment_prefix}: {}", action.description)
            .chars()
            .take(MAX_COMMENT_CHARS)
            .collect();
        Some(Self {
            mode,
            document,
            parameters,
            comment,
        })
    }
}

/// Wraps each descriptor parameter in a single-element list.
fn list_parameters(action: &ActionDescriptor) -> BTreeMap<String, Vec<String>> {
    action.parameters.iter().map(|(name, value)| (name.clone(), vec![value.clone()])).collect()
}

/// Tracking reference returned by the backend on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    /// Command id or automation execution id.
    pub reference_id: String,
    /// Mode the request was sent with.
    pub mode: DispatchMode,
}

// ============================================================================
// SECTION: Execution Result
// ============================================================================

/// Coarse execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Dispatch accepted.
    Executed,
    /// Not dispatched.
    Skipped,
    /// Dispatch failed.
    Error,
}

/// Result recorded for the execution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Execution status.
    pub status: ExecutionStatus,
    /// Backend tracking reference for accepted dispatches.
    pub reference_id: Option<String>,
    /// Failure detail for failed dispatches, or the skip reason.
    pub failure_detail: Option<String>,
}

impl ExecutionResult {
    /// Builds the result for an accepted dispatch.
    #[must_use]
    pub fn executed(receipt: &DispatchReceipt) -> Self {
        Self {
            status: ExecutionStatus::Executed,
            reference_id: Some(receipt.reference_id.clone()),
            failure_detail: None,
        }
    }

    /// Builds the result for a skipped dispatch.
    #[must_use]
    pub fn skipped(state: GateState) -> Self {
        Self {
            status: ExecutionStatus::Skipped,
            reference_id: None,
            failure_detail: Some(state.as_str().to_string()),
        }
    }

    /// Builds the result for a failed dispatch.
    #[must_use]
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Error,
            reference_id: None,
            failure_detail: Some(detail.into()),
        }
    }
}
