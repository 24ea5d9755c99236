// crates/remediation-core/src/runtime/pipeline.rs
// ============================================================================
// Module: Remediation Pipeline
// Description: Sequential alarm-to-decision pipeline with best-effort audit.
// Purpose: Run one alarm event through every step and always leave a record.
// Dependencies: serde_json, thiserror, time, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! One invocation runs strictly in order: normalize, resolve secrets,
//! retrieve context, reason, resolve the action, gate, then persist the
//! audit record. Transport and parse failures become fallback values in the
//! step that saw them. Only configuration failures (for example a missing
//! secret) stop the pipeline, and even then the partial record is written.
//! Audit write failures are logged and never change the response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::core::ActionCatalog;
use crate::core::AlarmRecord;
use crate::core::AuditKey;
use crate::core::AuditRecord;
use crate::core::GateState;
use crate::core::InvocationId;
use crate::core::OperatingMode;
use crate::core::PromptStyle;
use crate::core::ReasoningResult;
use crate::core::RetrievedContext;
use crate::core::build_prompt;
use crate::core::retrieval_query;
use crate::interfaces::ApiCredentials;
use crate::interfaces::AuditStore;
use crate::interfaces::ContextRetriever;
use crate::interfaces::ExecutionBackend;
use crate::interfaces::ReasoningClient;
use crate::interfaces::SecretStore;
use crate::runtime::events::DecisionEvent;
use crate::runtime::events::EventLevel;
use crate::runtime::events::EventSink;
use crate::runtime::events::NoopEventSink;
use crate::runtime::events::PipelineStage;
use crate::runtime::gate::GateOutcome;
use crate::runtime::gate::SafetyGate;
use crate::runtime::ids::InvocationIdGenerator;
use crate::runtime::invocation::InvocationBody;
use crate::runtime::invocation::InvocationResult;
use crate::runtime::policy::resolve_action;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default prefix for dispatch comments.
pub const DEFAULT_COMMENT_PREFIX: &str = "Remediation gate";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Process-wide pipeline configuration, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Operating mode.
    pub mode: OperatingMode,
    /// Action catalog.
    pub catalog: ActionCatalog,
    /// Optional audit key prefix.
    pub audit_prefix: Option<String>,
    /// Prefix for dispatch comments.
    pub comment_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::DryRun,
            catalog: ActionCatalog::base(),
            audit_prefix: None,
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Unrecoverable per-invocation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The API secret could not be resolved.
    #[error("secret unavailable: {0}")]
    Secret(String),
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Everything one invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionReport {
    /// Identifier of this invocation.
    pub invocation_id: InvocationId,
    /// Audit record, complete or partial.
    pub record: AuditRecord,
    /// Key the record was written under.
    pub audit_key: AuditKey,
    /// Store location when the write succeeded.
    pub audit_location: Option<String>,
    /// Failure that stopped the pipeline, if any.
    pub failure: Option<PipelineError>,
}

impl DecisionReport {
    /// Converts the report into the caller-facing response.
    #[must_use]
    pub fn invocation_result(&self) -> InvocationResult {
        if let Some(failure) = &self.failure {
            return InvocationResult::failure(&failure.to_string());
        }
        let Some(action) = &self.record.action else {
            return InvocationResult::failure("pipeline finished without an action");
        };
        InvocationResult::success(&InvocationBody::new(
            &self.record.alarm.alarm_name,
            action.kind,
            action.confidence,
            self.record.mode,
            self.record.gate_state,
            action.safety_override,
            &action.reasoning,
        ))
    }
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Alarm remediation pipeline.
pub struct RemediationPipeline {
    /// Pipeline configuration.
    config: PipelineConfig,
    /// Safety gate derived from the configuration.
    gate: SafetyGate,
    /// Reasoning model client.
    reasoner: Arc<dyn ReasoningClient>,
    /// Execution backend.
    executor: Arc<dyn ExecutionBackend>,
    /// Audit store.
    audit: Arc<dyn AuditStore>,
    /// Optional secret store.
    secrets: Option<Arc<dyn SecretStore>>,
    /// Optional context retriever.
    retriever: Option<Arc<dyn ContextRetriever>>,
    /// Decision event sink.
    events: Arc<dyn EventSink>,
    /// Per-invocation identifier source.
    ids: InvocationIdGenerator,
}

impl RemediationPipeline {
    /// Builds a pipeline from its required collaborators.
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        reasoner: Arc<dyn ReasoningClient>,
        executor: Arc<dyn ExecutionBackend>,
        audit: Arc<dyn AuditStore>,
    ) -> Self {
        let gate = SafetyGate::new(config.mode, config.comment_prefix.clone());
        Self {
            config,
            gate,
            reasoner,
            executor,
            audit,
            secrets: None,
            retriever: None,
            events: Arc::new(NoopEventSink),
            ids: InvocationIdGenerator::new(),
        }
    }

    /// Attaches a secret store; a fetch failure then fails the invocation.
    #[must_use]
    pub fn with_secrets(mut self, secrets: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Attaches a context retriever.
    #[must_use]
    pub fn with_retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Replaces the decision event sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Replaces the invocation id generator.
    #[must_use]
    pub fn with_invocation_ids(mut self, ids: InvocationIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handles one event and returns the caller-facing response.
    #[must_use]
    pub fn handle(&self, event: &Value, received_at: OffsetDateTime) -> InvocationResult {
        self.run(event, received_at).invocation_result()
    }

    /// Runs one event through the pipeline and persists the audit record.
    #[must_use]
    pub fn run(&self, event: &Value, received_at: OffsetDateTime) -> DecisionReport {
        let alarm = AlarmRecord::from_event(event, received_at);
        self.emit(
            "alarm_received",
            &alarm,
            PipelineStage::Normalize,
            EventLevel::Info,
            format!("metric {} state {}", alarm.metric_name, alarm.state),
        );
        let invocation_id = self.ids.issue();
        let mut record =
            AuditRecord::new(invocation_id.clone(), self.config.mode, alarm.clone(), received_at);
        let failure = self.decide(&alarm, &mut record).err();
        if let Some(err) = &failure {
            record.fail(err.to_string());
            self.emit(
                "invocation_failed",
                &alarm,
                PipelineStage::Secrets,
                EventLevel::Error,
                err.to_string(),
            );
        }
        let audit_key = AuditKey::for_record(
            &alarm.alarm_name,
            received_at,
            &invocation_id,
            self.config.audit_prefix.as_deref(),
        );
        let audit_location = self.persist(&alarm, &audit_key, &record);
        DecisionReport {
            invocation_id,
            record,
            audit_key,
            audit_location,
            failure,
        }
    }

    /// Runs every decision step, filling the record as it goes.
    fn decide(&self, alarm: &AlarmRecord, record: &mut AuditRecord) -> Result<(), PipelineError> {
        let credentials = self.credentials()?;
        let context = self.retrieve(alarm, credentials.as_ref());
        record.retrieved_context.clone_from(&context);

        let reasoning = self.reason(alarm, context.as_ref(), credentials.as_ref());
        record.reasoning = Some(reasoning.clone());

        let action = resolve_action(self.config.catalog, alarm, &reasoning);
        if action.safety_override {
            self.emit(
                "safety_override",
                alarm,
                PipelineStage::Resolve,
                EventLevel::Warn,
                format!("alarm name flagged as security incident; forcing {}", action.kind),
            );
        }
        record.action = Some(action.clone());

        let outcome = self.gate.evaluate(&action, self.executor.as_ref());
        self.emit_gate_outcome(alarm, &action.kind.to_string(), &outcome);
        record.gate_state = outcome.state;
        record.execution_request = outcome.request;
        record.execution = Some(outcome.execution);
        Ok(())
    }

    /// Resolves API credentials when a secret store is attached.
    fn credentials(&self) -> Result<Option<ApiCredentials>, PipelineError> {
        self.secrets.as_ref().map_or(Ok(None), |secrets| {
            secrets
                .api_credentials()
                .map(Some)
                .map_err(|err| PipelineError::Secret(err.to_string()))
        })
    }

    /// Retrieves context, substituting a fallback on failure.
    fn retrieve(
        &self,
        alarm: &AlarmRecord,
        credentials: Option<&ApiCredentials>,
    ) -> Option<RetrievedContext> {
        let retriever = self.retriever.as_ref()?;
        match retriever.retrieve(alarm, credentials) {
            Ok(context) => Some(context),
            Err(err) => {
                self.emit(
                    "retrieval_fallback",
                    alarm,
                    PipelineStage::Retrieve,
                    EventLevel::Warn,
                    err.to_string(),
                );
                Some(RetrievedContext::fallback(retrieval_query(alarm), err.to_string()))
            }
        }
    }

    /// Asks the model for an assessment, substituting a zero-confidence failure.
    fn reason(
        &self,
        alarm: &AlarmRecord,
        context: Option<&RetrievedContext>,
        credentials: Option<&ApiCredentials>,
    ) -> ReasoningResult {
        let style = self.reasoner.prompt_style();
        let prompt = build_prompt(style, self.config.catalog, alarm, context);
        match self.reasoner.complete(&prompt, credentials) {
            Ok(text) => {
                let reasoning = ReasoningResult::from_model_text(self.reasoner.model(), &text);
                if style == PromptStyle::Json && !reasoning.structured {
                    self.emit(
                        "parse_fallback",
                        alarm,
                        PipelineStage::Reason,
                        EventLevel::Warn,
                        "model output carried no JSON assessment; using raw text",
                    );
                }
                reasoning
            }
            Err(err) => {
                self.emit(
                    "reasoning_failed",
                    alarm,
                    PipelineStage::Reason,
                    EventLevel::Error,
                    err.to_string(),
                );
                ReasoningResult::failed(self.reasoner.model(), &err.to_string())
            }
        }
    }

    /// Emits the event matching a terminal gate state.
    fn emit_gate_outcome(&self, alarm: &AlarmRecord, action: &str, outcome: &GateOutcome) {
        let (event, level, message) = match outcome.state {
            GateState::SkippedDryRun => {
                ("dry_run_intent", EventLevel::Info, format!("would execute {action}"))
            }
            GateState::SkippedLowConfidence => (
                "low_confidence_skip",
                EventLevel::Info,
                format!("confidence below threshold; not executing {action}"),
            ),
            GateState::SkippedManualAction => (
                "manual_action_skip",
                EventLevel::Info,
                format!("{action} requires a human"),
            ),
            GateState::Executed => (
                "dispatch_accepted",
                EventLevel::Info,
                format!(
                    "{action} dispatched as {}",
                    outcome.execution.reference_id.as_deref().unwrap_or_default()
                ),
            ),
            GateState::ExecutionError => (
                "dispatch_failed",
                EventLevel::Error,
                outcome.execution.failure_detail.clone().unwrap_or_default(),
            ),
            GateState::Pending => return,
        };
        self.emit(event, alarm, PipelineStage::Gate, level, message);
    }

    /// Writes the audit record; failures are logged only.
    fn persist(&self, alarm: &AlarmRecord, key: &AuditKey, record: &AuditRecord) -> Option<String> {
        let written = record
            .to_json_bytes()
            .map_err(|err| err.to_string())
            .and_then(|body| self.audit.put(key, &body).map_err(|err| err.to_string()));
        match written {
            Ok(location) => {
                self.emit(
                    "audit_written",
                    alarm,
                    PipelineStage::Audit,
                    EventLevel::Info,
                    location.clone(),
                );
                Some(location)
            }
            Err(err) => {
                self.emit("audit_write_failed", alarm, PipelineStage::Audit, EventLevel::Error, err);
                None
            }
        }
    }

    /// Sends one event to the sink.
    fn emit(
        &self,
        event: &'static str,
        alarm: &AlarmRecord,
        stage: PipelineStage,
        level: EventLevel,
        message: impl Into<String>,
    ) {
        self.events.record(&DecisionEvent::new(event, &alarm.alarm_name, stage, level, message));
    }
}
