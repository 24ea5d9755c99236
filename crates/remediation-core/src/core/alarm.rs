// crates/remediation-core/src/core/alarm.rs
// ============================================================================
// Module: Alarm Normalizer
// Description: Flat alarm snapshot extracted from a nested event payload.
// Purpose: Give every later step a fully populated, immutable alarm record.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Alarm events arrive as arbitrary JSON. The normalizer reads a fixed set of
//! field paths under `detail` and substitutes literal defaults for anything
//! missing, blank, or not a string. Normalization never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::core::clock::rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder for missing alarm fields.
pub const UNKNOWN_FIELD: &str = "Unknown";
/// Placeholder for a missing state reason.
pub const NO_REASON_PROVIDED: &str = "No reason provided";

/// Field path for the alarm name.
const ALARM_NAME_PATH: &[&str] = &["detail", "alarmName"];
/// Field path for the alarm state value.
const STATE_VALUE_PATH: &[&str] = &["detail", "state", "value"];
/// Field path for the alarm state reason.
const STATE_REASON_PATH: &[&str] = &["detail", "state", "reason"];
/// Field path for the state transition timestamp.
const STATE_TIMESTAMP_PATH: &[&str] = &["detail", "state", "timestamp"];
/// Field path for the metric name.
const METRIC_NAME_PATH: &[&str] = &["detail", "configuration", "metricName"];
/// Field path for the metric namespace.
const NAMESPACE_PATH: &[&str] = &["detail", "configuration", "namespace"];

// ============================================================================
// SECTION: Alarm Record
// ============================================================================

/// Immutable snapshot of the alarm that triggered an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRecord {
    /// Alarm name.
    pub alarm_name: String,
    /// Alarm state value (for example `ALARM`).
    pub state: String,
    /// Human-readable state reason.
    pub reason: String,
    /// Metric name the alarm watches.
    pub metric_name: String,
    /// Metric namespace.
    pub namespace: String,
    /// State transition timestamp, or the receive time when absent.
    pub timestamp: String,
}

impl AlarmRecord {
    /// Normalizes an inbound event into an alarm record.
    ///
    /// `received_at` supplies the timestamp when the event carries none.
    #[must_use]
    pub fn from_event(event: &Value, received_at: OffsetDateTime) -> Self {
        Self {
            alarm_name: field_or(event, ALARM_NAME_PATH, UNKNOWN_FIELD),
            state: field_or(event, STATE_VALUE_PATH, UNKNOWN_FIELD),
            reason: field_or(event, STATE_REASON_PATH, NO_REASON_PROVIDED),
            metric_name: field_or(event, METRIC_NAME_PATH, UNKNOWN_FIELD),
            namespace: field_or(event, NAMESPACE_PATH, UNKNOWN_FIELD),
            timestamp: string_at(event, STATE_TIMESTAMP_PATH)
                .unwrap_or_else(|| rfc3339(received_at)),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a string field or returns the default.
fn field_or(event: &Value, path: &[&str], default: &str) -> String {
    string_at(event, path).unwrap_or_else(|| default.to_string())
}

/// Walks a field path and returns a non-blank string value.
fn string_at(event: &Value, path: &[&str]) -> Option<String> {
    let mut current = event;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    let text = current.as_str()?;
    if text.trim().is_empty() { None } else { Some(text.to_string()) }
}
