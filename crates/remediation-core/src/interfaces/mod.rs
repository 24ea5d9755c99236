// crates/remediation-core/src/interfaces/mod.rs
// ============================================================================
// Module: Remediation Gate Interfaces
// Description: Backend-agnostic collaborator contracts for the pipeline.
// Purpose: Keep network-facing retrieval, reasoning, execution, and storage pluggable.
// Dependencies: thiserror, crate::core
// ============================================================================

//! ## Overview
//! The pipeline talks to five external collaborators: a secret store, a
//! context retriever, a reasoning model, an execution backend, and an audit
//! store. Each is a narrow request/response trait with its own error enum.
//! Implementations must bound every call with a timeout; the pipeline itself
//! never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::AlarmRecord;
use crate::core::AuditKey;
use crate::core::DispatchReceipt;
use crate::core::ExecutionRequest;
use crate::core::PromptStyle;
use crate::core::RetrievedContext;

// ============================================================================
// SECTION: Secrets
// ============================================================================

/// API credentials resolved from a secret store.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// Bearer API key for inference endpoints.
    api_key: String,
}

impl ApiCredentials {
    /// Wraps an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials").field("api_key", &"<redacted>").finish()
    }
}

/// Secret store errors.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The secret could not be fetched.
    #[error("secret fetch failed: {0}")]
    Fetch(String),
    /// The secret was fetched but is unusable.
    #[error("secret invalid: {0}")]
    Invalid(String),
}

/// Source of API credentials.
pub trait SecretStore: Send + Sync {
    /// Resolves the API credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError`] when the secret is missing or malformed.
    fn api_credentials(&self) -> Result<ApiCredentials, SecretError>;
}

// ============================================================================
// SECTION: Retrieval
// ============================================================================

/// Context retrieval errors.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Endpoint unreachable or timed out.
    #[error("retrieval transport error: {0}")]
    Transport(String),
    /// Endpoint returned a non-success status.
    #[error("retrieval endpoint returned status {0}")]
    Status(u16),
    /// Response could not be interpreted.
    #[error("retrieval response invalid: {0}")]
    Invalid(String),
}

/// Optional context lookup ahead of reasoning.
pub trait ContextRetriever: Send + Sync {
    /// Retrieves context for an alarm.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] on any failure; callers fall back to an
    /// empty context.
    fn retrieve(
        &self,
        alarm: &AlarmRecord,
        credentials: Option<&ApiCredentials>,
    ) -> Result<RetrievedContext, RetrievalError>;
}

// ============================================================================
// SECTION: Reasoning
// ============================================================================

/// Reasoning client errors.
#[derive(Debug, Error)]
pub enum ReasoningError {
    /// Endpoint unreachable or timed out.
    #[error("reasoning transport error: {0}")]
    Transport(String),
    /// Endpoint returned a non-success status.
    #[error("reasoning endpoint returned status {0}")]
    Status(u16),
    /// Response did not carry generated text.
    #[error("reasoning response invalid: {0}")]
    Invalid(String),
}

/// Language-model completion endpoint.
pub trait ReasoningClient: Send + Sync {
    /// Returns the model identifier recorded in results.
    fn model(&self) -> &str;

    /// Returns the prompt style this client expects.
    fn prompt_style(&self) -> PromptStyle;

    /// Sends a prompt and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError`] on transport, status, or shape failures.
    fn complete(
        &self,
        prompt: &str,
        credentials: Option<&ApiCredentials>,
    ) -> Result<String, ReasoningError>;
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Execution backend errors.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The backend rejected or failed the dispatch.
    #[error("dispatch failed: {0}")]
    Dispatch(String),
    /// Execution is not available in this deployment.
    #[error("execution backend disabled")]
    Disabled,
}

/// Command-execution service.
pub trait ExecutionBackend: Send + Sync {
    /// Dispatches a request and returns the tracking reference.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the backend does not accept the request.
    fn dispatch(&self, request: &ExecutionRequest) -> Result<DispatchReceipt, ExecutionError>;
}

// ============================================================================
// SECTION: Audit Storage
// ============================================================================

/// Audit store errors.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Storage I/O failure.
    #[error("audit store io error: {0}")]
    Io(String),
    /// Record could not be serialized.
    #[error("audit record serialization failed: {0}")]
    Serialization(String),
}

/// Durable append-only audit storage.
pub trait AuditStore: Send + Sync {
    /// Writes one JSON record and returns its location.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the write fails.
    fn put(&self, key: &AuditKey, body: &[u8]) -> Result<String, AuditError>;
}
