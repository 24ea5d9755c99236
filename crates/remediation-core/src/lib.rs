// crates/remediation-core/src/lib.rs
// ============================================================================
// Module: Remediation Gate Core Library
// Description: Public API surface for the Remediation Gate core.
// Purpose: Expose the decision model, collaborator interfaces, and pipeline.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Remediation Gate core turns a monitoring alarm event into a remediation
//! decision: normalize the alarm, gather optional context, ask a reasoning
//! model for an assessment, resolve a fixed action for the metric, and gate
//! execution on operating mode and confidence. Every invocation leaves exactly
//! one audit record. Network-facing collaborators are reached only through
//! the traits in [`interfaces`], so the pipeline stays backend-agnostic.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ApiCredentials;
pub use interfaces::AuditError;
pub use interfaces::AuditStore;
pub use interfaces::ContextRetriever;
pub use interfaces::ExecutionBackend;
pub use interfaces::ExecutionError;
pub use interfaces::ReasoningClient;
pub use interfaces::ReasoningError;
pub use interfaces::RetrievalError;
pub use interfaces::SecretError;
pub use interfaces::SecretStore;
pub use runtime::DEFAULT_COMMENT_PREFIX;
pub use runtime::DecisionEvent;
pub use runtime::DecisionReport;
pub use runtime::EventLevel;
pub use runtime::EventSink;
pub use runtime::FileEventSink;
pub use runtime::GateDecision;
pub use runtime::GateOutcome;
pub use runtime::InMemoryAuditStore;
pub use runtime::InvocationBody;
pub use runtime::InvocationIdGenerator;
pub use runtime::InvocationResult;
pub use runtime::NoopEventSink;
pub use runtime::PipelineConfig;
pub use runtime::PipelineError;
pub use runtime::PipelineStage;
pub use runtime::RemediationPipeline;
pub use runtime::SafetyGate;
pub use runtime::StderrEventSink;
pub use runtime::resolve_action;
