// crates/remediation-providers/src/retrieval.rs
// ============================================================================
// Module: Context Retrievers
// Description: Static knowledge-table and embedding-endpoint retrievers.
// Purpose: Supply optional prompt context without ever blocking the pipeline.
// Dependencies: remediation-core, serde_json, crate::transport
// ============================================================================

//! ## Overview
//! [`KnowledgeBaseRetriever`] answers from the in-memory guidance table and
//! never fails. [`EmbeddingRetriever`] posts the alarm query to an embedding
//! endpoint and keeps only the vector length as a success signal; it can
//! also attach the static guidance so the prompt carries knowledge text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use remediation_core::AlarmRecord;
use remediation_core::ApiCredentials;
use remediation_core::ContextRetriever;
use remediation_core::ContextSource;
use remediation_core::RetrievalError;
use remediation_core::RetrievedContext;
use remediation_core::knowledge_for;
use remediation_core::retrieval_query;
use serde_json::Value;
use serde_json::json;

use crate::transport::InferenceTransport;

// ============================================================================
// SECTION: Knowledge Base
// ============================================================================

/// Retriever backed by the static guidance table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBaseRetriever;

impl ContextRetriever for KnowledgeBaseRetriever {
    fn retrieve(
        &self,
        alarm: &AlarmRecord,
        _credentials: Option<&ApiCredentials>,
    ) -> Result<RetrievedContext, RetrievalError> {
        Ok(RetrievedContext {
            query: retrieval_query(alarm),
            source: ContextSource::KnowledgeBase,
            knowledge: Some(knowledge_for(&alarm.metric_name).to_string()),
            embedding_model: None,
            embedding_dimensions: 0,
            successful: true,
            error: None,
        })
    }
}

// ============================================================================
// SECTION: Embedding Endpoint
// ============================================================================

/// Retriever that calls an embedding endpoint.
pub struct EmbeddingRetriever {
    /// Transport to the endpoint.
    transport: Arc<dyn InferenceTransport>,
    /// Embedding model identifier.
    model: String,
    /// Whether static guidance is attached on success.
    attach_knowledge: bool,
}

impl EmbeddingRetriever {
    /// Creates an embedding retriever.
    #[must_use]
    pub fn new(
        transport: Arc<dyn InferenceTransport>,
        model: impl Into<String>,
        attach_knowledge: bool,
    ) -> Self {
        Self {
            transport,
            model: model.into(),
            attach_knowledge,
        }
    }
}

impl ContextRetriever for EmbeddingRetriever {
    fn retrieve(
        &self,
        alarm: &AlarmRecord,
        credentials: Option<&ApiCredentials>,
    ) -> Result<RetrievedContext, RetrievalError> {
        let query = retrieval_query(alarm);
        let payload = json!({ "input": [query], "model": self.model });
        let response = self.transport.post_json(&payload, credentials)?;
        let dimensions = embedding_dimensions(&response).ok_or_else(|| {
            RetrievalError::Invalid("response carried no embedding".to_string())
        })?;
        Ok(RetrievedContext {
            query,
            source: ContextSource::Embedding,
            knowledge: self
                .attach_knowledge
                .then(|| knowledge_for(&alarm.metric_name).to_string()),
            embedding_model: Some(self.model.clone()),
            embedding_dimensions: dimensions,
            successful: true,
            error: None,
        })
    }
}

/// Returns the vector length from `data[0].embedding` or a top-level `embedding`.
fn embedding_dimensions(response: &Value) -> Option<usize> {
    response
        .pointer("/data/0/embedding")
        .or_else(|| response.get("embedding"))
        .and_then(Value::as_array)
        .map(Vec::len)
}
