// crates/remediation-core/src/core/confidence.rs
// ============================================================================
// Module: Confidence Scores
// Description: Bounded confidence values and free-text extraction.
// Purpose: Keep every confidence in [0, 10] and recover scores from model prose.
// Dependencies: regex, serde
// ============================================================================

//! ## Overview
//! Confidence is an integer from 0 to 10 reported by the reasoning model.
//! Out-of-range inputs are clamped on construction and on deserialization, so
//! a [`Confidence`] value can never leave the range. Extraction from prose is
//! a best-effort scan for the word `confidence` followed by digits; a nearby
//! unrelated number may be picked up, which is an accepted limitation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Highest confidence value.
pub const MAX_CONFIDENCE: u8 = 10;
/// Confidence used when a successful model response carries no score.
pub const DEFAULT_CONFIDENCE: u8 = 5;
/// Minimum confidence required before an action may be dispatched.
pub const EXECUTION_CONFIDENCE_THRESHOLD: u8 = 7;

/// Case-insensitive `confidence` token followed by separators and digits.
static CONFIDENCE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)confidence[:\s]*(\d+)").ok());

// ============================================================================
// SECTION: Confidence
// ============================================================================

/// Confidence score clamped to `[0, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    /// No confidence; used for failed reasoning.
    pub const ZERO: Self = Self(0);
    /// Default confidence for responses without an explicit score.
    pub const DEFAULT: Self = Self(DEFAULT_CONFIDENCE);
    /// Maximum confidence; used by safety overrides.
    pub const MAX: Self = Self(MAX_CONFIDENCE);

    /// Builds a confidence value, clamping into `[0, 10]`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(0, i64::from(MAX_CONFIDENCE));
        Self(u8::try_from(bounded).unwrap_or(MAX_CONFIDENCE))
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true when the score meets the execution threshold.
    #[must_use]
    pub const fn meets_execution_threshold(self) -> bool {
        self.0 >= EXECUTION_CONFIDENCE_THRESHOLD
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for Confidence {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts the first `confidence: N` score from free text.
///
/// Digits too long to fit an `i64` clamp to the maximum.
#[must_use]
pub fn extract_confidence(text: &str) -> Option<Confidence> {
    let pattern = CONFIDENCE_PATTERN.as_ref()?;
    let digits = pattern.captures(text)?.get(1)?.as_str();
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(Confidence::clamped(value))
}

/// Extracts a confidence score, returning the default when none is present.
#[must_use]
pub fn extract_confidence_or_default(text: &str) -> Confidence {
    extract_confidence(text).unwrap_or_default()
}
