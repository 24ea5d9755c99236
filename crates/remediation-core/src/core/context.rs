// crates/remediation-core/src/core/context.rs
// ============================================================================
// Module: Retrieved Context
// Description: Outcome of the optional context-retrieval step.
// Purpose: Carry knowledge text and retrieval status into the prompt and audit.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Retrieval is advisory. A context either carries static knowledge text, a
//! success flag from an embedding endpoint, or both. A failed lookup becomes
//! a fallback context with `successful = false` rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Where a retrieved context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// Static knowledge table keyed by metric name.
    KnowledgeBase,
    /// External embedding endpoint.
    Embedding,
    /// Fallback after a failed lookup.
    Fallback,
}

/// Context gathered for the reasoning prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedContext {
    /// Query text sent to the retrieval endpoint.
    pub query: String,
    /// Context source.
    pub source: ContextSource,
    /// Knowledge text to include in the prompt.
    pub knowledge: Option<String>,
    /// Embedding model identifier, when an endpoint was called.
    pub embedding_model: Option<String>,
    /// Length of the returned embedding vector (opaque beyond this).
    pub embedding_dimensions: usize,
    /// Whether retrieval succeeded.
    pub successful: bool,
    /// Failure detail for fallback contexts.
    pub error: Option<String>,
}

impl RetrievedContext {
    /// Builds a fallback context for a failed lookup.
    #[must_use]
    pub fn fallback(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            source: ContextSource::Fallback,
            knowledge: None,
            embedding_model: None,
            embedding_dimensions: 0,
            successful: false,
            error: Some(error.into()),
        }
    }

    /// Returns true when the context has anything worth telling the model.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.successful && (self.knowledge.is_some() || self.embedding_dimensions > 0)
    }
}
