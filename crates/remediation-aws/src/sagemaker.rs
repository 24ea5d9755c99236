// crates/remediation-aws/src/sagemaker.rs
// ============================================================================
// Module: SageMaker Endpoint Transport
// Description: JSON inference calls against a SageMaker runtime endpoint.
// Purpose: Run reasoning and retrieval clients against hosted model endpoints.
// Dependencies: aws-sdk-sagemakerruntime, remediation-providers, serde_json
// ============================================================================

//! ## Overview
//! Implements [`InferenceTransport`] so the same reasoning and retrieval
//! clients work over HTTP or over an endpoint. Authentication is the IAM
//! role of the caller; API credentials are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_sdk_sagemakerruntime::Client;
use aws_sdk_sagemakerruntime::primitives::Blob;
use remediation_core::ApiCredentials;
use remediation_providers::InferenceTransport;
use remediation_providers::TransportError;
use serde_json::Value;

use crate::sdk::AwsError;
use crate::sdk::AwsSettings;
use crate::sdk::SdkContext;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default response size cap, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Configuration for [`SageMakerTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SageMakerSettings {
    /// Endpoint name.
    pub endpoint_name: String,
    /// Client settings.
    pub client: AwsSettings,
    /// Maximum response size, in bytes.
    pub max_response_bytes: usize,
}

impl SageMakerSettings {
    /// Builds settings with default limits for an endpoint.
    #[must_use]
    pub fn for_endpoint(endpoint_name: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            client: AwsSettings::default(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Transport backed by `InvokeEndpoint`.
pub struct SageMakerTransport {
    /// Runtime client handle.
    client: Client,
    /// Endpoint name.
    endpoint_name: String,
    /// Maximum response size, in bytes.
    max_response_bytes: usize,
    /// Runtime used to drive the client.
    context: SdkContext,
}

impl SageMakerTransport {
    /// Creates a transport for one endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError`] when the endpoint name is blank or loading fails.
    pub fn new(context: &SdkContext, settings: &SageMakerSettings) -> Result<Self, AwsError> {
        if settings.endpoint_name.trim().is_empty() {
            return Err(AwsError::Invalid("endpoint name must be set".to_string()));
        }
        let shared = context.load_config(&settings.client)?;
        Ok(Self {
            client: Client::new(&shared),
            endpoint_name: settings.endpoint_name.clone(),
            max_response_bytes: settings.max_response_bytes,
            context: context.clone(),
        })
    }
}

impl InferenceTransport for SageMakerTransport {
    fn post_json(
        &self,
        payload: &Value,
        _credentials: Option<&ApiCredentials>,
    ) -> Result<Value, TransportError> {
        let body =
            serde_json::to_vec(payload).map_err(|err| TransportError::Invalid(err.to_string()))?;
        let call = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body));
        let bytes = self
            .context
            .block_on(async move {
                let output = call.send().await.map_err(|err| AwsError::Backend(err.to_string()))?;
                Ok(output.body().map(|blob| blob.as_ref().to_vec()).unwrap_or_default())
            })
            .map_err(|err| TransportError::Request(err.to_string()))?;
        decode_endpoint_body(&bytes, self.max_response_bytes)
    }
}

/// Decodes an endpoint response body under a size limit.
///
/// # Errors
///
/// Returns [`TransportError::Invalid`] for oversized or non-JSON bodies.
pub fn decode_endpoint_body(bytes: &[u8], max_bytes: usize) -> Result<Value, TransportError> {
    if bytes.len() > max_bytes {
        return Err(TransportError::Invalid("response exceeds size limit".to_string()));
    }
    serde_json::from_slice(bytes).map_err(|err| TransportError::Invalid(err.to_string()))
}
