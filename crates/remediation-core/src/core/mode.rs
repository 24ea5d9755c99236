// crates/remediation-core/src/core/mode.rs
// ============================================================================
// Module: Operating Mode
// Description: Process-wide switch between observation and execution.
// Purpose: Decide whether resolved actions may be dispatched at all.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The operating mode is read once from configuration. `DRY_RUN` (the
//! default) computes and logs every decision but never dispatches; `ACTIVE`
//! allows the safety gate to dispatch when confidence permits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Operating Mode
// ============================================================================

/// Operating mode for the remediation pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    /// Observation only: actions are computed and logged, never dispatched.
    #[default]
    DryRun,
    /// Execution permitted subject to the confidence threshold.
    Active,
}

impl OperatingMode {
    /// Returns the canonical configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DryRun => "DRY_RUN",
            Self::Active => "ACTIVE",
        }
    }

    /// Returns true when the mode allows dispatching commands.
    #[must_use]
    pub const fn permits_execution(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized operating mode label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operating mode: {0} (expected DRY_RUN or ACTIVE)")]
pub struct ModeParseError(pub String);

impl FromStr for OperatingMode {
    type Err = ModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "DRY_RUN" | "DRYRUN" => Ok(Self::DryRun),
            "ACTIVE" => Ok(Self::Active),
            _ => Err(ModeParseError(value.trim().to_string())),
        }
    }
}
