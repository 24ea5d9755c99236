// crates/remediation-core/src/runtime/mod.rs
// ============================================================================
// Module: Remediation Gate Runtime
// Description: Policy overlay, safety gate, event sinks, and the pipeline.
// Purpose: Execute the decision steps against pluggable collaborators.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime wires the pure core types to the collaborator traits. Each
//! invocation is independent; the only shared state is the read-only action
//! and knowledge tables.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod events;
pub mod gate;
pub mod ids;
pub mod invocation;
pub mod pipeline;
pub mod policy;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use events::DecisionEvent;
pub use events::EventLevel;
pub use events::EventSink;
pub use events::FileEventSink;
pub use events::NoopEventSink;
pub use events::PipelineStage;
pub use events::StderrEventSink;
pub use gate::GateDecision;
pub use gate::GateOutcome;
pub use gate::SafetyGate;
pub use ids::InvocationIdGenerator;
pub use invocation::InvocationBody;
pub use invocation::InvocationResult;
pub use pipeline::DEFAULT_COMMENT_PREFIX;
pub use pipeline::DecisionReport;
pub use pipeline::PipelineConfig;
pub use pipeline::PipelineError;
pub use pipeline::RemediationPipeline;
pub use policy::SECURITY_KEYWORDS;
pub use policy::resolve_action;
pub use policy::security_keyword;
pub use store::InMemoryAuditStore;
