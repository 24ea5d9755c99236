// crates/remediation-core/src/core/mod.rs
// ============================================================================
// Module: Remediation Gate Core Types
// Description: Canonical decision model for alarm remediation.
// Purpose: Provide stable, serializable types shared by every pipeline step.
// Dependencies: serde, regex, time
// ============================================================================

//! ## Overview
//! Core types describe the alarm snapshot, the reasoning result, the resolved
//! action, the gate and execution outcome, and the audit record that ties
//! them together. These types are pure data plus deterministic helpers; none
//! of them perform I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod action;
pub mod alarm;
pub mod audit;
pub mod catalog;
pub mod clock;
pub mod confidence;
pub mod context;
pub mod execution;
pub mod knowledge;
pub mod mode;
pub mod prompt;
pub mod reasoning;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::ActionDescriptor;
pub use action::ActionKind;
pub use action::CommandSpec;
pub use alarm::AlarmRecord;
pub use alarm::NO_REASON_PROVIDED;
pub use alarm::UNKNOWN_FIELD;
pub use audit::AuditKey;
pub use audit::AuditRecord;
pub use audit::DecisionOutcome;
pub use audit::InvocationId;
pub use catalog::ActionCatalog;
pub use catalog::CatalogEntry;
pub use clock::rfc3339;
pub use confidence::Confidence;
pub use confidence::DEFAULT_CONFIDENCE;
pub use confidence::EXECUTION_CONFIDENCE_THRESHOLD;
pub use confidence::MAX_CONFIDENCE;
pub use confidence::extract_confidence;
pub use confidence::extract_confidence_or_default;
pub use context::ContextSource;
pub use context::RetrievedContext;
pub use execution::DispatchMode;
pub use execution::DispatchReceipt;
pub use execution::ExecutionRequest;
pub use execution::ExecutionResult;
pub use execution::ExecutionStatus;
pub use execution::GateState;
pub use execution::SHELL_DOCUMENT;
pub use knowledge::knowledge_for;
pub use mode::ModeParseError;
pub use mode::OperatingMode;
pub use prompt::PromptStyle;
pub use prompt::build_prompt;
pub use prompt::retrieval_query;
pub use reasoning::ModelOutput;
pub use reasoning::ReasoningResult;
pub use reasoning::StructuredAssessment;
pub use reasoning::parse_model_output;
