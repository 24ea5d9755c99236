// crates/remediation-cli/src/invoke.rs
// ============================================================================
// Module: Invocation Entry
// Description: Runs one event through a configured pipeline.
// Purpose: Map setup failures onto the same response shape as runtime failures.
// Dependencies: remediation-config, remediation-core, serde_json, time
// ============================================================================

//! ## Overview
//! Configuration and wiring failures surface as a 500 [`InvocationResult`]
//! carrying a [`PipelineError::Configuration`] message, so callers always
//! receive the `{statusCode, body}` shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use remediation_config::ConfigError;
use remediation_config::RemediationConfig;
use remediation_core::InvocationResult;
use remediation_core::PipelineError;
use serde_json::Value;
use time::OffsetDateTime;

use crate::wiring::build_pipeline;

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// Runs `event` through the pipeline described by `config`.
#[must_use]
pub fn invoke(
    config: Result<RemediationConfig, ConfigError>,
    event: &Value,
    received_at: OffsetDateTime,
) -> InvocationResult {
    let config = match config {
        Ok(config) => config,
        Err(err) => return configuration_failure(&err.to_string()),
    };
    match build_pipeline(&config) {
        Ok(pipeline) => pipeline.handle(event, received_at),
        Err(err) => configuration_failure(&err.to_string()),
    }
}

/// Builds the 500 response for a setup failure.
fn configuration_failure(detail: &str) -> InvocationResult {
    InvocationResult::failure(&PipelineError::Configuration(detail.to_string()).to_string())
}
