// crates/remediation-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Shared alarm events and recording collaborator fakes.
// Purpose: Drive the pipeline end to end without any network.
// Dependencies: remediation-core, serde_json, time
// ============================================================================

//! Shared fixtures for remediation-core integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only fixtures may panic on poisoned mutexes."
)]

use std::sync::Arc;
use std::sync::Mutex;

use remediation_core::AlarmRecord;
use remediation_core::ApiCredentials;
use remediation_core::AuditError;
use remediation_core::AuditKey;
use remediation_core::AuditStore;
use remediation_core::ContextRetriever;
use remediation_core::ContextSource;
use remediation_core::DecisionEvent;
use remediation_core::DispatchReceipt;
use remediation_core::EventSink;
use remediation_core::ExecutionBackend;
use remediation_core::ExecutionError;
use remediation_core::ExecutionRequest;
use remediation_core::PromptStyle;
use remediation_core::ReasoningClient;
use remediation_core::ReasoningError;
use remediation_core::RetrievalError;
use remediation_core::RetrievedContext;
use remediation_core::SecretError;
use remediation_core::SecretStore;
use remediation_core::knowledge_for;
use remediation_core::retrieval_query;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Events
// ============================================================================

/// 2026-01-15T12:30:00Z.
pub const FIXED_UNIX: i64 = 1_768_480_200;

/// Fixed receive time used across tests.
pub fn received_at() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(FIXED_UNIX).unwrap()
}

/// Builds a fully populated alarm event.
pub fn alarm_event(alarm_name: &str, metric_name: &str) -> Value {
    json!({
        "source": "aws.cloudwatch",
        "detail": {
            "alarmName": alarm_name,
            "state": {
                "value": "ALARM",
                "reason": "Threshold Crossed: 1 datapoint greater than the threshold (80.0).",
                "timestamp": "2026-01-15T12:29:58.000+0000"
            },
            "configuration": {
                "metricName": metric_name,
                "namespace": "AWS/EC2"
            }
        }
    })
}

// ============================================================================
// SECTION: Reasoning
// ============================================================================

/// Reasoner that returns a scripted response and records prompts.
pub struct ScriptedReasoner {
    /// Prompt style reported to the pipeline.
    pub style: PromptStyle,
    /// Scripted response.
    pub response: Result<String, u16>,
    /// Prompts received.
    pub prompts: Mutex<Vec<String>>,
    /// Whether credentials accompanied each call.
    pub saw_credentials: Mutex<Vec<bool>>,
}

impl ScriptedReasoner {
    /// Reasoner answering with free text.
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            style: PromptStyle::FreeText,
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
            saw_credentials: Mutex::new(Vec::new()),
        })
    }

    /// Reasoner answering with a JSON prompt style.
    pub fn answering_json(text: &str) -> Arc<Self> {
        Arc::new(Self {
            style: PromptStyle::Json,
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
            saw_credentials: Mutex::new(Vec::new()),
        })
    }

    /// Reasoner whose endpoint returns the given status.
    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            style: PromptStyle::FreeText,
            response: Err(status),
            prompts: Mutex::new(Vec::new()),
            saw_credentials: Mutex::new(Vec::new()),
        })
    }

    /// Reasoner reporting the given confidence in free text.
    pub fn with_confidence(confidence: u8) -> Arc<Self> {
        Self::answering(&format!(
            "1. Root cause: sustained load.\n2. Recommended action: scale out.\n3. Confidence: \
             {confidence}"
        ))
    }

    /// Returns the recorded prompts.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ReasoningClient for ScriptedReasoner {
    fn model(&self) -> &str {
        "test-model"
    }

    fn prompt_style(&self) -> PromptStyle {
        self.style
    }

    fn complete(
        &self,
        prompt: &str,
        credentials: Option<&ApiCredentials>,
    ) -> Result<String, ReasoningError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.saw_credentials.lock().unwrap().push(credentials.is_some());
        self.response.clone().map_err(ReasoningError::Status)
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Execution backend that records requests.
#[derive(Default)]
pub struct RecordingExecutor {
    /// Requests received.
    pub requests: Mutex<Vec<ExecutionRequest>>,
    /// Failure to return instead of a receipt.
    pub failure: Option<String>,
}

impl RecordingExecutor {
    /// Backend that accepts every request.
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backend that rejects every request.
    pub fn rejecting(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(detail.to_string()),
        })
    }

    /// Returns the number of dispatches received.
    pub fn dispatch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Returns the recorded requests.
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ExecutionBackend for RecordingExecutor {
    fn dispatch(&self, request: &ExecutionRequest) -> Result<DispatchReceipt, ExecutionError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        if let Some(detail) = &self.failure {
            return Err(ExecutionError::Dispatch(detail.clone()));
        }
        Ok(DispatchReceipt {
            reference_id: format!("cmd-{:04}", requests.len()),
            mode: request.mode,
        })
    }
}

// ============================================================================
// SECTION: Storage
// ============================================================================

/// Audit store that rejects every write but counts attempts.
#[derive(Default)]
pub struct FailingAuditStore {
    /// Write attempts.
    pub attempts: Mutex<usize>,
}

impl AuditStore for FailingAuditStore {
    fn put(&self, _key: &AuditKey, _body: &[u8]) -> Result<String, AuditError> {
        *self.attempts.lock().unwrap() += 1;
        Err(AuditError::Io("bucket unavailable".to_string()))
    }
}

// ============================================================================
// SECTION: Secrets and Retrieval
// ============================================================================

/// Secret store with a fixed answer.
pub struct StaticSecrets(pub Option<String>);

impl SecretStore for StaticSecrets {
    fn api_credentials(&self) -> Result<ApiCredentials, SecretError> {
        self.0
            .as_ref()
            .map(ApiCredentials::new)
            .ok_or_else(|| SecretError::Fetch("ResourceNotFoundException".to_string()))
    }
}

/// Retriever backed by the static knowledge table.
pub struct TableRetriever;

impl ContextRetriever for TableRetriever {
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

/// Retriever whose endpoint is down.
pub struct DownRetriever;

impl ContextRetriever for DownRetriever {
    fn retrieve(
        &self,
        _alarm: &AlarmRecord,
        _credentials: Option<&ApiCredentials>,
    ) -> Result<RetrievedContext, RetrievalError> {
        Err(RetrievalError::Status(503))
    }
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Event sink that keeps every event.
#[derive(Default)]
pub struct RecordingEvents {
    /// Events received.
    pub events: Mutex<Vec<DecisionEvent>>,
}

impl RecordingEvents {
    /// Returns the labels of recorded events in order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|event| event.event).collect()
    }
}

impl EventSink for RecordingEvents {
    fn record(&self, event: &DecisionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
