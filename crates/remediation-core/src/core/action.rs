// crates/remediation-core/src/core/action.rs
// ============================================================================
// Module: Action Descriptors
// Description: Remediation action kinds, command specs, and resolved descriptors.
// Purpose: Describe what would be run for an alarm and why.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`ActionDescriptor`] is the resolved recommendation for one alarm: the
//! action kind, a human description, the parameter map, an optional command
//! spec for the execution backend, plus the model's reasoning and confidence.
//! Actions without a command (`investigate`, `escalate`) are for humans.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::confidence::Confidence;

// ============================================================================
// SECTION: Action Kind
// ============================================================================

/// Enumerated remediation action tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Scale out an Auto Scaling group.
    ScaleInstance,
    /// Restart a named service.
    RestartService,
    /// Delete old log files.
    CleanupLogs,
    /// Restart a container with a larger memory reservation.
    RestartContainerIncreaseMemory,
    /// Restart a JVM with a larger heap.
    RestartJvmIncreaseHeap,
    /// Restart a service with raised file descriptor limits.
    RestartServiceIncreaseLimits,
    /// Restart an application with a larger thread pool.
    RestartAppIncreaseThreads,
    /// Restart a service with network tuning.
    RestartServiceTuneNetwork,
    /// Move a volume to a faster performance tier.
    ScaleStoragePerformance,
    /// Force-restart a deadlocked application.
    RestartApplicationImmediately,
    /// Restart the DNS cache and resolver.
    RestartDnsCacheService,
    /// Restart a dependency chain of services.
    RestartDependentServices,
    /// Manual investigation required.
    Investigate,
    /// Hand the incident to humans.
    Escalate,
}

impl ActionKind {
    /// Returns the wire token for the action kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScaleInstance => "scale_instance",
            Self::RestartService => "restart_service",
            Self::CleanupLogs => "cleanup_logs",
            Self::RestartContainerIncreaseMemory => "restart_container_increase_memory",
            Self::RestartJvmIncreaseHeap => "restart_jvm_increase_heap",
            Self::RestartServiceIncreaseLimits => "restart_service_increase_limits",
            Self::RestartAppIncreaseThreads => "restart_app_increase_threads",
            Self::RestartServiceTuneNetwork => "restart_service_tune_network",
            Self::ScaleStoragePerformance => "scale_storage_performance",
            Self::RestartApplicationImmediately => "restart_application_immediately",
            Self::RestartDnsCacheService => "restart_dns_cache_service",
            Self::RestartDependentServices => "restart_dependent_services",
            Self::Investigate => "investigate",
            Self::Escalate => "escalate",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Command Spec
// ============================================================================

/// How an action is handed to the execution backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dispatch", rename_all = "snake_case")]
pub enum CommandSpec {
    /// Start an automation execution with the descriptor parameters.
    Automation {
        /// Automation document name.
        document: String,
    },
    /// Send a command document with the descriptor parameters.
    Document {
        /// Command document name.
        document: String,
    },
    /// Run a shell command rendered from `{Parameter}` placeholders.
    Shell {
        /// Shell command template.
        template: String,
    },
}

/// Renders `{Name}` placeholders from the parameter map.
///
/// Placeholders without a matching parameter are left untouched.
#[must_use]
pub fn render_template(template: &str, parameters: &BTreeMap<String, String>) -> String {
    parameters.iter().fold(template.to_string(), |rendered, (name, value)| {
        rendered.replace(&format!("{{{name}}}"), value)
    })
}

// ============================================================================
// SECTION: Action Descriptor
// ============================================================================

/// Resolved remediation recommendation for one alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action kind.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Human-readable description.
    pub description: String,
    /// Action parameters.
    pub parameters: BTreeMap<String, String>,
    /// Command spec, absent for manual actions.
    pub command: Option<CommandSpec>,
    /// Reasoning text attached from the model or the policy.
    pub reasoning: String,
    /// Confidence attached from the model or the policy.
    pub confidence: Confidence,
    /// True when a safety policy replaced the resolved action.
    pub safety_override: bool,
}

impl ActionDescriptor {
    /// Returns the rendered shell command for shell specs.
    #[must_use]
    pub fn rendered_shell_command(&self) -> Option<String> {
        match &self.command {
            Some(CommandSpec::Shell {
                template,
            }) => Some(render_template(template, &self.parameters)),
            _ => None,
        }
    }
}
