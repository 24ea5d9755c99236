// crates/remediation-core/src/core/audit.rs
// ============================================================================
// Module: Audit Records
// Description: Per-invocation decision record and its storage key.
// Purpose: Capture everything the pipeline computed, even when a step failed.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! An [`AuditRecord`] is created as soon as the alarm is normalized and
//! filled in as each step completes, so a failure part-way still yields a
//! partial record. Records are stored under
//! `[prefix/]logs/<yyyy>/<mm>/<dd>/<alarm>-<unix millis>-<invocation id>.json`
//! with the alarm name made safe for use as a single key segment. The
//! invocation id keeps keys distinct when one alarm fires repeatedly within
//! the same millisecond or across concurrent processes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::UtcOffset;

use crate::core::action::ActionDescriptor;
use crate::core::alarm::AlarmRecord;
use crate::core::clock::rfc3339;
use crate::core::context::RetrievedContext;
use crate::core::execution::ExecutionRequest;
use crate::core::execution::ExecutionResult;
use crate::core::execution::GateState;
use crate::core::mode::OperatingMode;
use crate::core::reasoning::ReasoningResult;

// ============================================================================
// SECTION: Audit Record
// ============================================================================

/// Overall outcome of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The pipeline ran to a gate decision.
    Completed,
    /// The pipeline stopped on a configuration failure.
    Failed,
}

/// Opaque identifier unique to one invocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(String);

impl InvocationId {
    /// Wraps an identifier, reducing it to a safe key segment.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(sanitize_segment(value.as_ref()))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decision record persisted once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Invocation identifier, also part of the storage key.
    pub invocation_id: InvocationId,
    /// Record creation time (RFC 3339).
    pub recorded_at: String,
    /// Operating mode for the invocation.
    pub mode: OperatingMode,
    /// Normalized alarm.
    pub alarm: AlarmRecord,
    /// Retrieval outcome, when retrieval ran.
    pub retrieved_context: Option<RetrievedContext>,
    /// Reasoning outcome, when reasoning ran.
    pub reasoning: Option<ReasoningResult>,
    /// Resolved action, when resolution ran.
    pub action: Option<ActionDescriptor>,
    /// Safety gate state.
    pub gate_state: GateState,
    /// Request handed to the backend, when one was built.
    pub execution_request: Option<ExecutionRequest>,
    /// Execution result, when the gate was evaluated.
    pub execution: Option<ExecutionResult>,
    /// Overall outcome.
    pub outcome: DecisionOutcome,
    /// Failure detail for failed invocations.
    pub error: Option<String>,
}

impl AuditRecord {
    /// Starts a record for a freshly normalized alarm.
    #[must_use]
    pub fn new(
        invocation_id: InvocationId,
        mode: OperatingMode,
        alarm: AlarmRecord,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            invocation_id,
            recorded_at: rfc3339(recorded_at),
            mode,
            alarm,
            retrieved_context: None,
            reasoning: None,
            action: None,
            gate_state: GateState::Pending,
            execution_request: None,
            execution: None,
            outcome: DecisionOutcome::Completed,
            error: None,
        }
    }

    /// Marks the record as failed with the given detail.
    pub fn fail(&mut self, detail: impl Into<String>) {
        self.outcome = DecisionOutcome::Failed;
        self.error = Some(detail.into());
    }

    /// Serializes the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

// ============================================================================
// SECTION: Audit Key
// ============================================================================

/// Storage key for one audit record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditKey(String);

impl AuditKey {
    /// Builds the key for one invocation of an alarm recorded at `at`.
    #[must_use]
    pub fn for_record(
        alarm_name: &str,
        at: OffsetDateTime,
        invocation_id: &InvocationId,
        prefix: Option<&str>,
    ) -> Self {
        let utc = at.to_offset(UtcOffset::UTC);
        let mut key = normalize_prefix(prefix);
        key.push_str(&format!(
            "logs/{:04}/{:02}/{:02}/{}-{}-{}.json",
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            sanitize_segment(alarm_name),
            utc.unix_timestamp_nanos() / 1_000_000,
            invocation_id.as_str()
        ));
        Self(key)
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Normalizes an optional prefix into `segment/.../` form.
fn normalize_prefix(prefix: Option<&str>) -> String {
    let trimmed = prefix.map(|prefix| prefix.trim().trim_matches('/')).unwrap_or_default();
    if trimmed.is_empty() {
        return String::new();
    }
    let segments: Vec<String> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(sanitize_segment)
        .collect();
    if segments.is_empty() { String::new() } else { format!("{}/", segments.join("/")) }
}

/// Replaces separators, whitespace, and control characters with `_`.
fn sanitize_segment(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|ch| if ch == '/' || ch == '\\' || ch.is_whitespace() || ch.is_control() { '_' } else { ch })
        .collect();
    if cleaned.is_empty() { "_".to_string() } else { cleaned }
}
