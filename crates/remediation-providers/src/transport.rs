// crates/remediation-providers/src/transport.rs
// ============================================================================
// Module: Inference Transport
// Description: JSON request/response seam for model and embedding endpoints.
// Purpose: Let one request shape run over HTTP or a managed model endpoint.
// Dependencies: remediation-core, reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! An [`InferenceTransport`] posts one JSON payload and returns one JSON
//! document. [`HttpTransport`] does so with a bounded blocking request: the
//! scheme is restricted to HTTPS unless cleartext is explicitly allowed,
//! URLs with embedded credentials are rejected, redirects are not followed,
//! and response bodies are size-capped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use remediation_core::ApiCredentials;
use remediation_core::ReasoningError;
use remediation_core::RetrievalError;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Transport configuration is invalid.
    #[error("transport misconfigured: {0}")]
    Config(String),
    /// Request failed before a response arrived (including timeouts).
    #[error("request failed: {0}")]
    Request(String),
    /// Endpoint returned a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),
    /// Response body was not acceptable JSON.
    #[error("invalid response: {0}")]
    Invalid(String),
}

impl From<TransportError> for ReasoningError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => Self::Status(status),
            TransportError::Invalid(detail) => Self::Invalid(detail),
            other @ (TransportError::Config(_) | TransportError::Request(_)) => {
                Self::Transport(other.to_string())
            }
        }
    }
}

impl From<TransportError> for RetrievalError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => Self::Status(status),
            TransportError::Invalid(detail) => Self::Invalid(detail),
            other @ (TransportError::Config(_) | TransportError::Request(_)) => {
                Self::Transport(other.to_string())
            }
        }
    }
}

/// JSON-in, JSON-out endpoint.
pub trait InferenceTransport: Send + Sync {
    /// Posts a payload and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on request, status, or decoding failures.
    fn post_json(
        &self,
        payload: &Value,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, TransportError>;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Configuration for [`HttpTransport`].
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` URLs.
/// - `timeout_ms` applies to the full request lifecycle.
/// - `max_response_bytes` is a hard upper bound on response bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Endpoint URL.
    pub url: String,
    /// Allow cleartext HTTP.
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size, in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl HttpTransportConfig {
    /// Builds a configuration with default limits for the URL.
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            allow_http: false,
            timeout_ms: 30_000,
            max_response_bytes: 1024 * 1024,
            user_agent: "remediation-gate/0.1".to_string(),
        }
    }
}

/// Blocking HTTP transport that posts JSON with optional bearer auth.
pub struct HttpTransport {
    /// Parsed endpoint URL.
    url: Url,
    /// Maximum response size, in bytes.
    max_response_bytes: usize,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpTransport {
    /// Creates a transport after validating the URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`] for invalid URLs or client setup failures.
    pub fn new(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let url = Url::parse(&config.url)
            .map_err(|_| TransportError::Config(format!("invalid url: {}", config.url)))?;
        validate_url(&url, config.allow_http)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| TransportError::Config("http client build failed".to_string()))?;
        Ok(Self {
            url,
            max_response_bytes: config.max_response_bytes,
            client,
        })
    }
}

impl InferenceTransport for HttpTransport {
    fn post_json(
        &self,
        payload: &Value,
        credentials: Option<&ApiCredentials>,
    ) -> Result<Value, TransportError> {
        let body =
            serde_json::to_vec(payload).map_err(|err| TransportError::Invalid(err.to_string()))?;
        let mut request =
            self.client.post(self.url.clone()).header(CONTENT_TYPE, "application/json").body(body);
        if let Some(credentials) = credentials {
            request = request.header(AUTHORIZATION, format!("Bearer {}", credentials.api_key()));
        }
        let mut response = request.send().map_err(|err| {
            if err.is_timeout() {
                TransportError::Request("request timed out".to_string())
            } else {
                TransportError::Request("http request failed".to_string())
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let bytes = read_response_limited(&mut response, self.max_response_bytes)?;
        serde_json::from_slice(&bytes).map_err(|err| TransportError::Invalid(err.to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates URL scheme and rejects embedded credentials.
fn validate_url(url: &Url, allow_http: bool) -> Result<(), TransportError> {
    match url.scheme() {
        "https" => {}
        "http" if allow_http => {}
        other => {
            return Err(TransportError::Config(format!("unsupported url scheme: {other}")));
        }
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(TransportError::Config("url credentials are not allowed".to_string()));
    }
    if url.host_str().is_none() {
        return Err(TransportError::Config("url host required".to_string()));
    }
    Ok(())
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, TransportError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| TransportError::Config("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(TransportError::Invalid("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|_| TransportError::Request("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(TransportError::Invalid("response exceeds size limit".to_string()));
    }
    Ok(buf)
}
