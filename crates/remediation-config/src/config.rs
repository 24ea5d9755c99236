// crates/remediation-config/src/config.rs
// ============================================================================
// Module: Remediation Gate Configuration
// Description: Configuration loading, environment overrides, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: remediation-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is read from a TOML file when one is named (CLI flag or
//! `REMEDIATION_GATE_CONFIG`), otherwise built-in defaults apply. The
//! deployment environment variables (`MODE`, `S3_BUCKET`, `SECRETS_ARN`,
//! `LLAMA_ENDPOINT`, `RETRIEVAL_ENDPOINT`) are layered on top through an
//! injected lookup, then the whole model is validated. Any invalid input
//! fails the load; nothing is silently corrected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use remediation_core::ActionCatalog;
use remediation_core::DEFAULT_COMMENT_PREFIX;
use remediation_core::OperatingMode;
use remediation_core::PipelineConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "REMEDIATION_GATE_CONFIG";
/// Environment variable selecting the operating mode.
pub const MODE_ENV_VAR: &str = "MODE";
/// Environment variable naming the audit bucket.
pub const S3_BUCKET_ENV_VAR: &str = "S3_BUCKET";
/// Environment variable naming the API key secret.
pub const SECRETS_ARN_ENV_VAR: &str = "SECRETS_ARN";
/// Environment variable naming the reasoning endpoint.
pub const LLAMA_ENDPOINT_ENV_VAR: &str = "LLAMA_ENDPOINT";
/// Environment variable naming the retrieval endpoint.
pub const RETRIEVAL_ENDPOINT_ENV_VAR: &str = "RETRIEVAL_ENDPOINT";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Upper bound for any outbound timeout.
pub const MAX_TIMEOUT_MS: u64 = 120_000;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Default chat-completion URL.
const DEFAULT_REASONING_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";
/// Default embeddings URL.
const DEFAULT_RETRIEVAL_URL: &str = "https://integrate.api.nvidia.com/v1/embeddings";
/// Default reasoning model.
const DEFAULT_REASONING_MODEL: &str = "meta/llama-3.1-nemotron-70b-instruct";
/// Default embedding model.
const DEFAULT_EMBEDDING_MODEL: &str = "nvidia/nv-embedqa-e5-v5";

/// Variable lookup used for overrides.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Root
// ============================================================================

/// Validated remediation gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemediationConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: OperatingMode,
    /// Reasoning endpoint settings.
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    /// Context retrieval settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// API secret settings.
    #[serde(default)]
    pub secrets: SecretsConfig,
    /// Audit storage settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Execution backend settings.
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Action catalog settings.
    #[serde(default)]
    pub actions: ActionsConfig,
    /// Decision event settings.
    #[serde(default)]
    pub events: EventsConfig,
}

impl RemediationConfig {
    /// Loads configuration using the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, &|name| std::env::var(name).ok())
    }

    /// Loads configuration using an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with(path: Option<&Path>, lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let mut config = match resolve_path(path, lookup)? {
            Some(resolved) => Self::read_file(&resolved)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration text without overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads and parses a config file under the size and encoding limits.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let file = File::open(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let limit = u64::try_from(MAX_CONFIG_FILE_SIZE)
            .map_err(|_| ConfigError::Invalid("config size limit exceeds u64".to_string()))?;
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Applies deployment environment variables on top of the file.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unrecognized `MODE`.
    pub fn apply_env_overrides(&mut self, lookup: EnvLookup<'_>) -> Result<(), ConfigError> {
        let read = |name: &str| {
            lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
        };
        if let Some(mode) = read(MODE_ENV_VAR) {
            self.mode = mode
                .parse::<OperatingMode>()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        if let Some(bucket) = read(S3_BUCKET_ENV_VAR) {
            self.audit.store = AuditStoreKind::S3;
            self.audit.bucket = Some(bucket);
        }
        if let Some(secret_id) = read(SECRETS_ARN_ENV_VAR) {
            self.secrets.source = SecretSource::SecretsManager;
            self.secrets.secret_id = Some(secret_id);
        }
        if let Some(endpoint) = read(LLAMA_ENDPOINT_ENV_VAR) {
            self.reasoning.transport = TransportConfig::from_endpoint(&endpoint);
        }
        if let Some(endpoint) = read(RETRIEVAL_ENDPOINT_ENV_VAR) {
            self.retrieval.transport = TransportConfig::from_endpoint(&endpoint);
            self.retrieval.strategy = RetrievalStrategy::Embedding;
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any section is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reasoning.validate()?;
        self.retrieval.validate()?;
        self.secrets.validate()?;
        self.audit.validate()?;
        self.execution.validate()?;
        self.events.validate()
    }

    /// Builds the core pipeline configuration.
    #[must_use]
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            mode: self.mode,
            catalog: self.actions.catalog(),
            audit_prefix: self.audit.prefix.clone(),
            comment_prefix: self.execution.comment_prefix.clone(),
        }
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Where inference payloads are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    /// HTTPS endpoint with bearer authentication.
    Http {
        /// Endpoint URL.
        url: String,
        /// Allow cleartext `http://` URLs (explicit opt-in).
        #[serde(default)]
        allow_http: bool,
    },
    /// SageMaker runtime endpoint with IAM authentication.
    Sagemaker {
        /// Endpoint name.
        endpoint: String,
        /// Region override.
        #[serde(default)]
        region: Option<String>,
    },
}

impl TransportConfig {
    /// Interprets an override value: URLs select HTTP, anything else names an endpoint.
    #[must_use]
    pub fn from_endpoint(value: &str) -> Self {
        if value.starts_with("https://") || value.starts_with("http://") {
            Self::Http {
                url: value.to_string(),
                allow_http: false,
            }
        } else {
            Self::Sagemaker {
                endpoint: value.to_string(),
                region: None,
            }
        }
    }

    /// Validates the transport target.
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        match self {
            Self::Http {
                url,
                allow_http,
            } => {
                let trimmed = url.trim();
                if trimmed.starts_with("http://") {
                    if !allow_http {
                        return Err(ConfigError::Invalid(format!(
                            "{section}.transport.url uses http:// without allow_http"
                        )));
                    }
                } else if !trimmed.starts_with("https://") {
                    return Err(ConfigError::Invalid(format!(
                        "{section}.transport.url must include https://"
                    )));
                }
                Ok(())
            }
            Self::Sagemaker {
                endpoint, ..
            } => {
                if endpoint.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{section}.transport.endpoint must be set"
                    )));
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// SECTION: Reasoning
// ============================================================================

/// Response shape spoken by the reasoning endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// Chat-completion messages API.
    #[default]
    ChatCompletion,
    /// Raw text generation (`inputs`/`generated_text`).
    TextGeneration,
}

/// Reasoning endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReasoningConfig {
    /// Response shape.
    #[serde(default)]
    pub shape: ResponseShape,
    /// Transport target.
    #[serde(default = "default_reasoning_transport")]
    pub transport: TransportConfig,
    /// Model identifier.
    #[serde(default = "default_reasoning_model")]
    pub model: String,
    /// Maximum generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Request timeout in milliseconds.
    #[serde(default = "default_reasoning_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            shape: ResponseShape::default(),
            transport: default_reasoning_transport(),
            model: default_reasoning_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_reasoning_timeout_ms(),
        }
    }
}

impl ReasoningConfig {
    /// Validates reasoning settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.transport.validate("reasoning")?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("reasoning.model must be set".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "reasoning.max_tokens must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid("reasoning.temperature out of range".to_string()));
        }
        validate_timeout("reasoning.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Retrieval
// ============================================================================

/// Context retrieval strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    /// No retrieval step.
    #[default]
    None,
    /// Static guidance keyed by metric name.
    KnowledgeBase,
    /// Embedding endpoint lookup.
    Embedding,
}

/// Context retrieval settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Retrieval strategy.
    #[serde(default)]
    pub strategy: RetrievalStrategy,
    /// Transport target for the embedding strategy.
    #[serde(default = "default_retrieval_transport")]
    pub transport: TransportConfig,
    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_retrieval_timeout_ms")]
    pub timeout_ms: u64,
    /// Attach static guidance to successful embedding lookups.
    #[serde(default = "default_true")]
    pub attach_knowledge: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: RetrievalStrategy::default(),
            transport: default_retrieval_transport(),
            model: default_embedding_model(),
            timeout_ms: default_retrieval_timeout_ms(),
            attach_knowledge: true,
        }
    }
}

impl RetrievalConfig {
    /// Validates retrieval settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy != RetrievalStrategy::Embedding {
            return Ok(());
        }
        self.transport.validate("retrieval")?;
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("retrieval.model must be set".to_string()));
        }
        validate_timeout("retrieval.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Secrets
// ============================================================================

/// Where the inference API key comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSource {
    /// No credentials (IAM-authenticated endpoints).
    #[default]
    None,
    /// Environment variable.
    Env,
    /// AWS Secrets Manager.
    SecretsManager,
}

/// API secret settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsConfig {
    /// Secret source.
    #[serde(default)]
    pub source: SecretSource,
    /// Secret ARN or name for Secrets Manager.
    #[serde(default)]
    pub secret_id: Option<String>,
    /// Environment variable for the env source.
    #[serde(default = "default_secret_env_var")]
    pub env_var: String,
    /// JSON field holding the key.
    #[serde(default = "default_api_key_field")]
    pub api_key_field: String,
    /// Region override for Secrets Manager.
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            source: SecretSource::default(),
            secret_id: None,
            env_var: default_secret_env_var(),
            api_key_field: default_api_key_field(),
            region: None,
        }
    }
}

impl SecretsConfig {
    /// Validates secret settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            SecretSource::None => Ok(()),
            SecretSource::Env => {
                if self.env_var.trim().is_empty() {
                    return Err(ConfigError::Invalid("secrets.env_var must be set".to_string()));
                }
                Ok(())
            }
            SecretSource::SecretsManager => {
                if self.secret_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
                    return Err(ConfigError::Invalid(
                        "secrets.secret_id is required for secrets_manager".to_string(),
                    ));
                }
                if self.api_key_field.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "secrets.api_key_field must be set".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStoreKind {
    /// Local directory.
    #[default]
    File,
    /// S3 bucket.
    S3,
}

/// Audit storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Store backend.
    #[serde(default)]
    pub store: AuditStoreKind,
    /// Bucket for the S3 store.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Optional key prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Region override for S3.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom S3 endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Force path-style addressing.
    #[serde(default)]
    pub force_path_style: bool,
    /// Root directory for the file store.
    #[serde(default = "default_audit_directory")]
    pub directory: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            store: AuditStoreKind::default(),
            bucket: None,
            prefix: None,
            region: None,
            endpoint: None,
            force_path_style: false,
            directory: default_audit_directory(),
        }
    }
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.store {
            AuditStoreKind::S3 => {
                if self.bucket.as_deref().is_none_or(|bucket| bucket.trim().is_empty()) {
                    return Err(ConfigError::Invalid(
                        "audit.bucket must be set for the s3 store".to_string(),
                    ));
                }
                if let Some(endpoint) = &self.endpoint {
                    let trimmed = endpoint.trim();
                    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
                        return Err(ConfigError::Invalid(
                            "audit.endpoint must include http:// or https://".to_string(),
                        ));
                    }
                }
                Ok(())
            }
            AuditStoreKind::File => validate_path_string("audit.directory", &self.directory),
        }
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Execution backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionBackendKind {
    /// Systems Manager.
    #[default]
    Ssm,
    /// Refuse every dispatch.
    Disabled,
}

/// Run Command instance selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Tag key, without the `tag:` prefix.
    pub tag_key: String,
    /// Accepted tag values.
    pub values: Vec<String>,
}

/// Execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: ExecutionBackendKind,
    /// Run Command targets.
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
    /// Prefix for dispatch comments.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
    /// Region override for Systems Manager.
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            backend: ExecutionBackendKind::default(),
            targets: default_targets(),
            comment_prefix: default_comment_prefix(),
            region: None,
        }
    }
}

impl ExecutionConfig {
    /// Validates execution settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == ExecutionBackendKind::Disabled {
            return Ok(());
        }
        if self.targets.is_empty() {
            return Err(ConfigError::Invalid("execution.targets must not be empty".to_string()));
        }
        for target in &self.targets {
            if target.tag_key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "execution.targets.tag_key must be non-empty".to_string(),
                ));
            }
            if target.values.iter().all(|value| value.trim().is_empty()) {
                return Err(ConfigError::Invalid(
                    "execution.targets.values must contain a value".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Actions And Events
// ============================================================================

/// Action catalog settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionsConfig {
    /// Use the extended metric table.
    #[serde(default)]
    pub extended_catalog: bool,
}

impl ActionsConfig {
    /// Returns the configured catalog.
    #[must_use]
    pub const fn catalog(self) -> ActionCatalog {
        if self.extended_catalog { ActionCatalog::extended() } else { ActionCatalog::base() }
    }
}

/// Decision event sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard events.
    None,
}

/// Decision event settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: EventSinkKind,
    /// Output path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl EventsConfig {
    /// Validates event settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sink != EventSinkKind::File {
            return Ok(());
        }
        let Some(path) = &self.path else {
            return Err(ConfigError::Invalid("events.path is required for the file sink".to_string()));
        };
        validate_path_string("events.path", path)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default reasoning transport.
fn default_reasoning_transport() -> TransportConfig {
    TransportConfig::Http {
        url: DEFAULT_REASONING_URL.to_string(),
        allow_http: false,
    }
}

/// Default retrieval transport.
fn default_retrieval_transport() -> TransportConfig {
    TransportConfig::Http {
        url: DEFAULT_RETRIEVAL_URL.to_string(),
        allow_http: false,
    }
}

/// Default reasoning model.
fn default_reasoning_model() -> String {
    DEFAULT_REASONING_MODEL.to_string()
}

/// Default embedding model.
fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

/// Default maximum generated tokens.
const fn default_max_tokens() -> u32 {
    300
}

/// Default sampling temperature.
const fn default_temperature() -> f64 {
    0.1
}

/// Default reasoning timeout.
const fn default_reasoning_timeout_ms() -> u64 {
    60_000
}

/// Default retrieval timeout.
const fn default_retrieval_timeout_ms() -> u64 {
    30_000
}

/// Serde helper for `true` defaults.
const fn default_true() -> bool {
    true
}

/// Default variable for the env secret source.
fn default_secret_env_var() -> String {
    "NVIDIA_API_KEY".to_string()
}

/// Default JSON field holding the key.
fn default_api_key_field() -> String {
    "nvidia_api_key".to_string()
}

/// Default file-store directory.
fn default_audit_directory() -> String {
    "remediation-audit".to_string()
}

/// Default Run Command targets.
fn default_targets() -> Vec<TargetConfig> {
    vec![TargetConfig {
        tag_key: "Environment".to_string(),
        values: vec!["production".to_string()],
    }]
}

/// Default dispatch comment prefix.
fn default_comment_prefix() -> String {
    DEFAULT_COMMENT_PREFIX.to_string()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the CLI flag or the environment.
fn resolve_path(path: Option<&Path>, lookup: EnvLookup<'_>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    match lookup(CONFIG_ENV_VAR).filter(|value| !value.trim().is_empty()) {
        Some(env_path) => {
            if env_path.len() > MAX_TOTAL_PATH_LENGTH {
                return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
            }
            Ok(Some(PathBuf::from(env_path)))
        }
        None => Ok(None),
    }
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a timeout against the allowed range.
fn validate_timeout(field: &str, timeout_ms: u64) -> Result<(), ConfigError> {
    if timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Invalid(format!("{field} must be between 1 and {MAX_TIMEOUT_MS}")));
    }
    Ok(())
}
