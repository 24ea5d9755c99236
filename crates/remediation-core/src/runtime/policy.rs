// crates/remediation-core/src/runtime/policy.rs
// ============================================================================
// Module: Action Policy
// Description: Metric-table resolution with the security escalation overlay.
// Purpose: Produce the single action descriptor the safety gate evaluates.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Resolution is total: the catalog always yields a descriptor. When the
//! alarm name mentions a security keyword the descriptor is replaced with
//! `escalate` at maximum confidence, ahead of the metric table and ahead of
//! anything the model suggested.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::ActionCatalog;
use crate::core::ActionDescriptor;
use crate::core::ActionKind;
use crate::core::AlarmRecord;
use crate::core::Confidence;
use crate::core::ReasoningResult;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Lowercase alarm-name keywords that force escalation.
pub const SECURITY_KEYWORDS: &[&str] = &["security", "breach", "unauthorized", "intrusion"];

/// Reasoning attached to security overrides.
pub const SECURITY_OVERRIDE_REASONING: &str = "Security incident detected - escalating to humans";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Returns the first security keyword found in the alarm name.
#[must_use]
pub fn security_keyword(alarm_name: &str) -> Option<&'static str> {
    let lowered = alarm_name.to_lowercase();
    SECURITY_KEYWORDS.iter().copied().find(|keyword| lowered.contains(keyword))
}

/// Resolves the action for an alarm, applying the security overlay.
#[must_use]
pub fn resolve_action(
    catalog: ActionCatalog,
    alarm: &AlarmRecord,
    reasoning: &ReasoningResult,
) -> ActionDescriptor {
    if security_keyword(&alarm.alarm_name).is_some() {
        return ActionDescriptor {
            kind: ActionKind::Escalate,
            description: "Escalate security incident to on-call humans".to_string(),
            parameters: BTreeMap::new(),
            command: None,
            reasoning: SECURITY_OVERRIDE_REASONING.to_string(),
            confidence: Confidence::MAX,
            safety_override: true,
        };
    }
    catalog.resolve(&alarm.metric_name, reasoning)
}
