// crates/remediation-cli/src/wiring.rs
// ============================================================================
// Module: Pipeline Wiring
// Description: Builds pipeline collaborators from validated configuration.
// Purpose: Map each config section onto one concrete collaborator.
// Dependencies: remediation-aws, remediation-config, remediation-providers
// ============================================================================

//! ## Overview
//! Wiring is the only place that knows which concrete collaborator backs
//! each trait. AWS clients share one [`SdkContext`], created only when a
//! section actually selects an AWS backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use remediation_aws::AwsError;
use remediation_aws::AwsSettings;
use remediation_aws::DisabledExecutionBackend;
use remediation_aws::InstanceTarget;
use remediation_aws::S3AuditSettings;
use remediation_aws::S3AuditStore;
use remediation_aws::SageMakerSettings;
use remediation_aws::SageMakerTransport;
use remediation_aws::SdkContext;
use remediation_aws::SecretsManagerStore;
use remediation_aws::SsmExecutionBackend;
use remediation_aws::SsmSettings;
use remediation_config::AuditStoreKind;
use remediation_config::EventSinkKind;
use remediation_config::ExecutionBackendKind;
use remediation_config::RemediationConfig;
use remediation_config::ResponseShape;
use remediation_config::RetrievalStrategy;
use remediation_config::SecretSource;
use remediation_config::TransportConfig;
use remediation_core::AuditError;
use remediation_core::AuditStore;
use remediation_core::ContextRetriever;
use remediation_core::EventSink;
use remediation_core::ExecutionBackend;
use remediation_core::FileEventSink;
use remediation_core::NoopEventSink;
use remediation_core::ReasoningClient;
use remediation_core::RemediationPipeline;
use remediation_core::SecretStore;
use remediation_core::StderrEventSink;
use remediation_providers::ChatCompletionReasoner;
use remediation_providers::EmbeddingRetriever;
use remediation_providers::EnvSecretStore;
use remediation_providers::FileAuditStore;
use remediation_providers::GenerationSettings;
use remediation_providers::HttpTransport;
use remediation_providers::HttpTransportConfig;
use remediation_providers::InferenceTransport;
use remediation_providers::KnowledgeBaseRetriever;
use remediation_providers::TextGenerationReasoner;
use remediation_providers::TransportError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while building collaborators.
#[derive(Debug, Error)]
pub enum WiringError {
    /// AWS client setup failed.
    #[error("aws setup failed: {0}")]
    Aws(#[from] AwsError),
    /// HTTP transport setup failed.
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
    /// Audit store setup failed.
    #[error("audit store setup failed: {0}")]
    Audit(#[from] AuditError),
    /// Event sink setup failed.
    #[error("event sink setup failed: {0}")]
    Events(String),
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds collaborators, creating the AWS runtime on first use.
#[derive(Default)]
struct Wiring {
    /// Shared AWS runtime.
    aws: Option<SdkContext>,
}

impl Wiring {
    /// Returns the shared AWS context, creating it if needed.
    fn aws(&mut self) -> Result<SdkContext, WiringError> {
        if let Some(context) = &self.aws {
            return Ok(context.clone());
        }
        let context = SdkContext::new()?;
        self.aws = Some(context.clone());
        Ok(context)
    }

    /// Builds an inference transport.
    fn transport(
        &mut self,
        transport: &TransportConfig,
        timeout_ms: u64,
    ) -> Result<Arc<dyn InferenceTransport>, WiringError> {
        match transport {
            TransportConfig::Http {
                url,
                allow_http,
            } => {
                let config = HttpTransportConfig {
                    allow_http: *allow_http,
                    timeout_ms,
                    ..HttpTransportConfig::for_url(url.clone())
                };
                Ok(Arc::new(HttpTransport::new(&config)?))
            }
            TransportConfig::Sagemaker {
                endpoint,
                region,
            } => {
                let settings = SageMakerSettings {
                    client: AwsSettings {
                        region: region.clone(),
                        timeout_ms,
                        ..AwsSettings::default()
                    },
                    ..SageMakerSettings::for_endpoint(endpoint.clone())
                };
                Ok(Arc::new(SageMakerTransport::new(&self.aws()?, &settings)?))
            }
        }
    }

    /// Builds the reasoning client.
    fn reasoner(
        &mut self,
        config: &RemediationConfig,
    ) -> Result<Arc<dyn ReasoningClient>, WiringError> {
        let reasoning = &config.reasoning;
        let transport = self.transport(&reasoning.transport, reasoning.timeout_ms)?;
        let settings = GenerationSettings {
            model: reasoning.model.clone(),
            max_tokens: reasoning.max_tokens,
            temperature: reasoning.temperature,
        };
        let reasoner: Arc<dyn ReasoningClient> = match reasoning.shape {
            ResponseShape::ChatCompletion => {
                Arc::new(ChatCompletionReasoner::new(transport, settings))
            }
            ResponseShape::TextGeneration => {
                Arc::new(TextGenerationReasoner::new(transport, settings))
            }
        };
        Ok(reasoner)
    }

    /// Builds the optional context retriever.
    fn retriever(
        &mut self,
        config: &RemediationConfig,
    ) -> Result<Option<Arc<dyn ContextRetriever>>, WiringError> {
        let retrieval = &config.retrieval;
        let retriever: Arc<dyn ContextRetriever> = match retrieval.strategy {
            RetrievalStrategy::None => return Ok(None),
            RetrievalStrategy::KnowledgeBase => Arc::new(KnowledgeBaseRetriever),
            RetrievalStrategy::Embedding => {
                let transport = self.transport(&retrieval.transport, retrieval.timeout_ms)?;
                Arc::new(EmbeddingRetriever::new(
                    transport,
                    retrieval.model.clone(),
                    retrieval.attach_knowledge,
                ))
            }
        };
        Ok(Some(retriever))
    }

    /// Builds the optional secret store.
    fn secrets(
        &mut self,
        config: &RemediationConfig,
    ) -> Result<Option<Arc<dyn SecretStore>>, WiringError> {
        let secrets = &config.secrets;
        let store: Arc<dyn SecretStore> = match secrets.source {
            SecretSource::None => return Ok(None),
            SecretSource::Env => Arc::new(EnvSecretStore::new(
                secrets.env_var.clone(),
                secrets.api_key_field.clone(),
            )),
            SecretSource::SecretsManager => {
                let settings = AwsSettings {
                    region: secrets.region.clone(),
                    ..AwsSettings::default()
                };
                Arc::new(SecretsManagerStore::new(
                    &self.aws()?,
                    &settings,
                    secrets.secret_id.clone().unwrap_or_default(),
                    secrets.api_key_field.clone(),
                )?)
            }
        };
        Ok(Some(store))
    }

    /// Builds the audit store.
    fn audit(&mut self, config: &RemediationConfig) -> Result<Arc<dyn AuditStore>, WiringError> {
        let audit = &config.audit;
        let store: Arc<dyn AuditStore> = match audit.store {
            AuditStoreKind::File => Arc::new(FileAuditStore::new(audit.directory.clone())?),
            AuditStoreKind::S3 => {
                let settings = S3AuditSettings {
                    bucket: audit.bucket.clone().unwrap_or_default(),
                    client: AwsSettings {
                        region: audit.region.clone(),
                        endpoint: audit.endpoint.clone(),
                        ..AwsSettings::default()
                    },
                    force_path_style: audit.force_path_style,
                };
                Arc::new(S3AuditStore::new(&self.aws()?, &settings)?)
            }
        };
        Ok(store)
    }

    /// Builds the execution backend.
    fn executor(
        &mut self,
        config: &RemediationConfig,
    ) -> Result<Arc<dyn ExecutionBackend>, WiringError> {
        let execution = &config.execution;
        let backend: Arc<dyn ExecutionBackend> = match execution.backend {
            ExecutionBackendKind::Disabled => Arc::new(DisabledExecutionBackend),
            ExecutionBackendKind::Ssm => {
                let settings = SsmSettings {
                    client: AwsSettings {
                        region: execution.region.clone(),
                        ..AwsSettings::default()
                    },
                    targets: execution
                        .targets
                        .iter()
                        .map(|target| {
                            InstanceTarget::tag(target.tag_key.clone(), target.values.clone())
                        })
                        .collect(),
                };
                Arc::new(SsmExecutionBackend::new(&self.aws()?, &settings)?)
            }
        };
        Ok(backend)
    }
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Builds the decision event sink.
///
/// # Errors
///
/// Returns [`WiringError::Events`] when the event file cannot be opened.
pub fn build_event_sink(config: &RemediationConfig) -> Result<Arc<dyn EventSink>, WiringError> {
    let events = &config.events;
    let sink: Arc<dyn EventSink> = match events.sink {
        EventSinkKind::Stderr => Arc::new(StderrEventSink),
        EventSinkKind::None => Arc::new(NoopEventSink),
        EventSinkKind::File => {
            let path = events.path.as_deref().unwrap_or_default();
            let sink = FileEventSink::new(Path::new(path))
                .map_err(|err| WiringError::Events(err.to_string()))?;
            Arc::new(sink)
        }
    };
    Ok(sink)
}

/// Builds a ready-to-run pipeline from validated configuration.
///
/// # Errors
///
/// Returns [`WiringError`] when any collaborator cannot be constructed.
pub fn build_pipeline(config: &RemediationConfig) -> Result<RemediationPipeline, WiringError> {
    let mut wiring = Wiring::default();
    let reasoner = wiring.reasoner(config)?;
    let executor = wiring.executor(config)?;
    let audit = wiring.audit(config)?;
    let mut pipeline =
        RemediationPipeline::new(config.to_pipeline_config(), reasoner, executor, audit)
            .with_events(build_event_sink(config)?);
    if let Some(retriever) = wiring.retriever(config)? {
        pipeline = pipeline.with_retriever(retriever);
    }
    if let Some(secrets) = wiring.secrets(config)? {
        pipeline = pipeline.with_secrets(secrets);
    }
    Ok(pipeline)
}
