// crates/remediation-config/src/lib.rs
// ============================================================================
// Module: Remediation Gate Config Library
// Description: Canonical configuration model and validation.
// Purpose: Single source of truth for remediation-gate.toml semantics.
// Dependencies: remediation-core, serde, toml
// ============================================================================

//! ## Overview
//! `remediation-config` defines the configuration model for the remediation
//! gate, layers deployment environment variables over the optional TOML
//! file, and validates the result fail-closed before any collaborator is
//! built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
