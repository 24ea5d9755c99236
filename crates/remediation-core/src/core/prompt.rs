// crates/remediation-core/src/core/prompt.rs
// ============================================================================
// Module: Prompt Builder
// Description: Reasoning prompt and retrieval query construction.
// Purpose: Render alarm fields and retrieved context into model input text.
// Dependencies: crate::core::{alarm, catalog, context}
// ============================================================================

//! ## Overview
//! Two prompt styles exist. The free-text style asks for a root cause, a
//! recommended action, and a 1-10 confidence score. The JSON style asks for
//! an object with `action`, `confidence`, and `reasoning` and lists the
//! action tokens the catalog can resolve.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::action::ActionKind;
use crate::core::alarm::AlarmRecord;
use crate::core::catalog::ActionCatalog;
use crate::core::context::RetrievedContext;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Prompt style requested by a reasoning client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    /// Numbered free-text answer with a confidence line.
    #[default]
    FreeText,
    /// JSON object with `action`, `confidence`, and `reasoning`.
    Json,
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the retrieval query for an alarm.
#[must_use]
pub fn retrieval_query(alarm: &AlarmRecord) -> String {
    format!("CloudWatch alarm: {} - {}", alarm.alarm_name, alarm.reason)
}

/// Builds the reasoning prompt for an alarm.
#[must_use]
pub fn build_prompt(
    style: PromptStyle,
    catalog: ActionCatalog,
    alarm: &AlarmRecord,
    context: Option<&RetrievedContext>,
) -> String {
    let mut prompt = String::from(
        "You are an expert Site Reliability Engineer. Analyze this CloudWatch alarm and \
         recommend an action.\n\n",
    );
    let knowledge = context
        .filter(|context| context.successful)
        .and_then(|context| context.knowledge.as_deref());
    if let Some(knowledge) = knowledge {
        let _ = write!(prompt, "Retrieved SRE Knowledge:\n{knowledge}\n\n");
    }
    let _ = writeln!(prompt, "Alarm Details:");
    let _ = writeln!(prompt, "- Name: {}", alarm.alarm_name);
    let _ = writeln!(prompt, "- State: {}", alarm.state);
    let _ = writeln!(prompt, "- Reason: {}", alarm.reason);
    let _ = writeln!(prompt, "- Metric: {}", alarm.metric_name);
    let _ = writeln!(prompt, "- Namespace: {}", alarm.namespace);
    if knowledge.is_none() {
        let summary = if context.is_some_and(RetrievedContext::is_available) {
            "Retrieved context available"
        } else {
            "No context retrieved"
        };
        let _ = writeln!(prompt, "- Context: {summary}");
    }
    prompt.push('\n');
    match style {
        PromptStyle::FreeText => {
            prompt.push_str(
                "Provide:\n1. Root cause (1-2 sentences)\n2. Recommended action (specific)\n3. \
                 Confidence (1-10)\n",
            );
        }
        PromptStyle::Json => {
            let _ = write!(
                prompt,
                "Provide your response in JSON format with:\n- action: one of [{}]\n- \
                 confidence: integer 1-10\n- reasoning: brief explanation\n\nResponse:",
                allowed_actions(catalog).join(", ")
            );
        }
    }
    prompt
}

/// Lists the action tokens the catalog can produce, plus the manual actions.
fn allowed_actions(catalog: ActionCatalog) -> Vec<&'static str> {
    let mut actions: Vec<&'static str> =
        catalog.entries().map(|entry| entry.kind().as_str()).collect();
    actions.push(ActionKind::Investigate.as_str());
    actions.push(ActionKind::Escalate.as_str());
    actions
}
