// crates/remediation-core/src/core/clock.rs
// ============================================================================
// Module: Remediation Gate Time Helpers
// Description: Timestamp formatting shared by the alarm and audit records.
// Purpose: Render invocation times consistently without panicking.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Alarm timestamps and audit records use RFC 3339 text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Formats a timestamp as RFC 3339, falling back to unix seconds.
#[must_use]
pub fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}
