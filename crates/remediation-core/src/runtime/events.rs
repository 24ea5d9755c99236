// crates/remediation-core/src/runtime/events.rs
// ============================================================================
// Module: Decision Events
// Description: Structured local log events emitted by the pipeline.
// Purpose: Emit JSON-line diagnostics without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every notable pipeline step emits a [`DecisionEvent`] to an [`EventSink`].
//! Sinks write JSON lines to stderr or to an append-only file, or drop events.
//! Sink failures are swallowed; local logging never affects the decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Alarm normalization.
    Normalize,
    /// Secret resolution.
    Secrets,
    /// Context retrieval.
    Retrieve,
    /// Model reasoning.
    Reason,
    /// Action resolution and policy overlay.
    Resolve,
    /// Safety gate and dispatch.
    Gate,
    /// Audit persistence.
    Audit,
}

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    /// Normal progress.
    Info,
    /// Degraded but recovered.
    Warn,
    /// Step failed.
    Error,
}

/// Structured decision event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionEvent {
    /// Event label.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Alarm name the event concerns.
    pub alarm: String,
    /// Pipeline stage.
    pub stage: PipelineStage,
    /// Severity.
    pub level: EventLevel,
    /// Human-readable message.
    pub message: String,
}

impl DecisionEvent {
    /// Builds an event stamped with the current wall-clock time.
    #[must_use]
    pub fn new(
        event: &'static str,
        alarm: &str,
        stage: PipelineStage,
        level: EventLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            alarm: alarm.to_string(),
            stage,
            level,
            message: message.into(),
        }
    }
}

/// Returns milliseconds since the unix epoch, or zero when the clock is before it.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for decision events.
pub trait EventSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: &DecisionEvent);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl EventSink for StderrEventSink {
    fn record(&self, event: &DecisionEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl EventSink for FileEventSink {
    fn record(&self, event: &DecisionEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Sink that drops every event.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: &DecisionEvent) {}
}
