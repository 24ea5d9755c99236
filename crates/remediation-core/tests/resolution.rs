// crates/remediation-core/tests/resolution.rs
// ============================================================================
// Module: Action Resolution Tests
// Description: Catalog lookup, security overlay, and safety gate decisions.
// Purpose: Ensure resolution is total and the gate dispatches only when allowed.
// Dependencies: remediation-core
// ============================================================================

//! Action catalog, policy overlay, and safety gate tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use common::RecordingExecutor;
use common::alarm_event;
use common::received_at;
use remediation_core::ActionCatalog;
use remediation_core::ActionKind;
use remediation_core::AlarmRecord;
use remediation_core::CommandSpec;
use remediation_core::Confidence;
use remediation_core::DispatchMode;
use remediation_core::GateDecision;
use remediation_core::GateState;
use remediation_core::OperatingMode;
use remediation_core::PromptStyle;
use remediation_core::ReasoningResult;
use remediation_core::SafetyGate;
use remediation_core::build_prompt;
use remediation_core::resolve_action;
use remediation_core::runtime::security_keyword;

fn reasoning(confidence: i64) -> ReasoningResult {
    ReasoningResult {
        text: "model says so".to_string(),
        confidence: Confidence::clamped(confidence),
        model: "test-model".to_string(),
        success: true,
        structured: false,
        suggested_action: None,
    }
}

fn alarm(name: &str, metric: &str) -> AlarmRecord {
    AlarmRecord::from_event(&alarm_event(name, metric), received_at())
}

#[test]
fn base_table_maps_the_three_metrics() {
    let catalog = ActionCatalog::base();
    let cases = [
        ("CPUUtilization", ActionKind::ScaleInstance),
        ("DatabaseConnections", ActionKind::RestartService),
        ("DiskSpaceUtilization", ActionKind::CleanupLogs),
    ];
    for (metric, kind) in cases {
        let descriptor = catalog.resolve(metric, &reasoning(8));
        assert_eq!(descriptor.kind, kind);
        assert_eq!(descriptor.reasoning, "model says so");
        assert_eq!(descriptor.confidence.value(), 8);
        assert!(descriptor.command.is_some());
        assert!(!descriptor.safety_override);
    }
}

#[test]
fn extended_metrics_need_the_extended_catalog() {
    assert_eq!(
        ActionCatalog::base().resolve("MemoryUtilization", &reasoning(8)).kind,
        ActionKind::Investigate
    );
    assert_eq!(
        ActionCatalog::extended().resolve("MemoryUtilization", &reasoning(8)).kind,
        ActionKind::RestartContainerIncreaseMemory
    );
    assert_eq!(ActionCatalog::base().entries().count(), 3);
    assert_eq!(ActionCatalog::extended().entries().count(), 12);
}

#[test]
fn unmapped_metric_resolves_to_investigate_without_command() {
    let descriptor = ActionCatalog::extended().resolve("Unknown", &reasoning(9));

    assert_eq!(descriptor.kind, ActionKind::Investigate);
    assert_eq!(descriptor.description, "Manual investigation required");
    assert!(descriptor.command.is_none());
    assert!(descriptor.parameters.is_empty());
}

#[test]
fn shell_templates_render_parameters() {
    let descriptor = ActionCatalog::extended().resolve("DNSQueryTime", &reasoning(8));

    assert!(matches!(descriptor.command, Some(CommandSpec::Shell { .. })));
    assert_eq!(
        descriptor.rendered_shell_command().as_deref(),
        Some("sudo systemctl restart dns-cache")
    );
}

#[test]
fn security_keywords_force_escalation() {
    for name in ["unauthorized-api-access", "prod-SECURITY-group-change", "db-Breach", "ids-intrusion"]
    {
        let descriptor = resolve_action(
            ActionCatalog::base(),
            &alarm(name, "CPUUtilization"),
            &reasoning(1),
        );
        assert_eq!(descriptor.kind, ActionKind::Escalate, "{name}");
        assert_eq!(descriptor.confidence, Confidence::MAX);
        assert!(descriptor.safety_override);
        assert!(descriptor.command.is_none());
    }
    assert_eq!(security_keyword("prod-web-cpu-high"), None);
}

#[test]
fn gate_checks_mode_then_confidence_then_command() {
    let catalog = ActionCatalog::base();
    let active = SafetyGate::new(OperatingMode::Active, "test");
    let dry_run = SafetyGate::new(OperatingMode::DryRun, "test");

    let confident = catalog.resolve("CPUUtilization", &reasoning(9));
    let unsure = catalog.resolve("CPUUtilization", &reasoning(6));
    let manual = catalog.resolve("Unknown", &reasoning(9));

    assert_eq!(dry_run.decide(&confident), GateDecision::Skip(GateState::SkippedDryRun));
    assert_eq!(dry_run.decide(&unsure), GateDecision::Skip(GateState::SkippedDryRun));
    assert_eq!(active.decide(&unsure), GateDecision::Skip(GateState::SkippedLowConfidence));
    assert_eq!(active.decide(&manual), GateDecision::Skip(GateState::SkippedManualAction));
    let GateDecision::Dispatch(request) = active.decide(&confident) else {
        panic!("expected dispatch");
    };
    assert_eq!(request.mode, DispatchMode::Automation);
    assert_eq!(request.document, "RemediationGate-ScaleAutoScalingGroup");
    assert_eq!(request.comment, "test: Scale EC2 Auto Scaling Group");
}

#[test]
fn scale_out_starts_a_single_automation_execution() {
    let gate = SafetyGate::new(OperatingMode::Active, "Remediation gate");
    let executor = RecordingExecutor::accepting();
    let descriptor = ActionCatalog::base().resolve("CPUUtilization", &reasoning(8));

    let outcome = gate.evaluate(&descriptor, executor.as_ref());

    assert_eq!(outcome.state, GateState::Executed);
    let request = outcome.request.unwrap();
    assert_eq!(request.mode, DispatchMode::Automation);
    assert_eq!(request.parameters["AutoScalingGroupName"], vec!["default-asg".to_string()]);
    assert_eq!(request.parameters["DesiredCapacity"], vec!["3".to_string()]);
    assert!(!request.parameters.contains_key("commands"));
    assert_eq!(executor.dispatch_count(), 1);
}

#[test]
fn document_actions_send_list_parameters() {
    let gate = SafetyGate::new(OperatingMode::Active, "Remediation gate");
    let executor = RecordingExecutor::accepting();
    let descriptor = ActionCatalog::base().resolve("DatabaseConnections", &reasoning(8));

    let outcome = gate.evaluate(&descriptor, executor.as_ref());

    assert_eq!(outcome.state, GateState::Executed);
    let request = outcome.request.unwrap();
    assert_eq!(request.document, "RemediationGate-RestartService");
    assert_eq!(request.parameters["ServiceName"], vec!["mysql".to_string()]);
    assert_eq!(executor.dispatch_count(), 1);
}

#[test]
fn dispatch_comment_is_bounded() {
    let gate = SafetyGate::new(OperatingMode::Active, "x".repeat(150));
    let descriptor = ActionCatalog::base().resolve("CPUUtilization", &reasoning(8));

    let GateDecision::Dispatch(request) = gate.decide(&descriptor) else {
        panic!("expected dispatch");
    };
    assert_eq!(request.comment.chars().count(), 100);
}

#[test]
fn json_prompt_lists_catalog_actions() {
    let prompt = build_prompt(
        PromptStyle::Json,
        ActionCatalog::base(),
        &alarm("prod-web-cpu-high", "CPUUtilization"),
        None,
    );

    assert!(prompt.contains(
        "action: one of [scale_instance, restart_service, cleanup_logs, investigate, escalate]"
    ));
    assert!(prompt.contains("- Context: No context retrieved"));
    assert!(prompt.ends_with("Response:"));
}

#[test]
fn free_text_prompt_asks_for_confidence() {
    let prompt = build_prompt(
        PromptStyle::FreeText,
        ActionCatalog::base(),
        &alarm("prod-web-cpu-high", "CPUUtilization"),
        None,
    );

    assert!(prompt.contains("- Name: prod-web-cpu-high"));
    assert!(prompt.contains("3. Confidence (1-10)"));
}
