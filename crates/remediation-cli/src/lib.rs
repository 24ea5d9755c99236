// crates/remediation-cli/src/lib.rs
// ============================================================================
// Module: Remediation Gate CLI Library
// Description: Wiring and command helpers for the remediation-gate binary.
// Purpose: Keep command behavior testable outside the binary entry point.
// Dependencies: remediation-aws, remediation-config, remediation-core, remediation-providers
// ============================================================================

//! ## Overview
//! The binary parses arguments and writes output; everything it runs lives
//! here: collaborator wiring, single-event invocation, and the offline
//! resolution preview.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod invoke;
pub mod preview;
pub mod wiring;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use invoke::invoke;
pub use preview::Preview;
pub use preview::PreviewRequest;
pub use preview::preview;
pub use wiring::WiringError;
pub use wiring::build_event_sink;
pub use wiring::build_pipeline;
