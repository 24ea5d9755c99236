// crates/remediation-core/src/core/knowledge.rs
// ============================================================================
// Module: Static Knowledge Table
// Description: Short remediation guidance keyed by metric name.
// Purpose: Provide retrieval context without any network dependency.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A read-only table of one-line SRE guidance per metric. Unknown metrics get
//! general guidance.

// ============================================================================
// SECTION: Table
// ============================================================================

/// Guidance returned for metrics without a dedicated entry.
pub const GENERAL_GUIDANCE: &str = "General SRE best practices apply for this metric";

/// Metric name to guidance text.
const KNOWLEDGE_TABLE: &[(&str, &str)] = &[
    ("CPUUtilization", "High CPU usually indicates need for scaling or process optimization"),
    (
        "DatabaseConnections",
        "Connection pool exhaustion requires service restart or pool increase",
    ),
    ("DiskSpaceUtilization", "Disk space issues need log cleanup or storage expansion"),
    ("MemoryUtilization", "Memory issues may require container restart or memory increase"),
];

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Returns the guidance text for a metric.
#[must_use]
pub fn knowledge_for(metric_name: &str) -> &'static str {
    KNOWLEDGE_TABLE
        .iter()
        .find(|(metric, _)| *metric == metric_name)
        .map_or(GENERAL_GUIDANCE, |(_, guidance)| *guidance)
}
