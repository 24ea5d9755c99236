// crates/remediation-aws/src/secrets_manager.rs
// ============================================================================
// Module: Secrets Manager Store
// Description: Inference API credentials read from AWS Secrets Manager.
// Purpose: Resolve the model API key once per invocation.
// Dependencies: aws-sdk-secretsmanager, remediation-providers
// ============================================================================

//! ## Overview
//! The secret string is a JSON object holding the key under a configured
//! field, or the bare key. Binary secrets are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_sdk_secretsmanager::Client;
use remediation_core::ApiCredentials;
use remediation_core::SecretError;
use remediation_core::SecretStore;
use remediation_providers::credentials_from_secret;

use crate::sdk::AwsError;
use crate::sdk::AwsSettings;
use crate::sdk::SdkContext;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Secret store backed by Secrets Manager.
pub struct SecretsManagerStore {
    /// Secrets Manager client handle.
    client: Client,
    /// Secret ARN or name.
    secret_id: String,
    /// JSON field holding the key.
    field: String,
    /// Runtime used to drive the client.
    context: SdkContext,
}

impl SecretsManagerStore {
    /// Creates a store for one secret.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError`] when the secret id is blank or loading fails.
    pub fn new(
        context: &SdkContext,
        settings: &AwsSettings,
        secret_id: impl Into<String>,
        field: impl Into<String>,
    ) -> Result<Self, AwsError> {
        let secret_id = secret_id.into();
        if secret_id.trim().is_empty() {
            return Err(AwsError::Invalid("secret id must be set".to_string()));
        }
        let shared = context.load_config(settings)?;
        Ok(Self {
            client: Client::new(&shared),
            secret_id,
            field: field.into(),
            context: context.clone(),
        })
    }
}

impl SecretStore for SecretsManagerStore {
    fn api_credentials(&self) -> Result<ApiCredentials, SecretError> {
        let call = self.client.get_secret_value().secret_id(&self.secret_id);
        let raw = self
            .context
            .block_on(async move {
                let output = call.send().await.map_err(|err| AwsError::Backend(err.to_string()))?;
                Ok(output.secret_string().map(ToString::to_string))
            })
            .map_err(|err| SecretError::Fetch(err.to_string()))?
            .ok_or_else(|| SecretError::Invalid("secret has no string value".to_string()))?;
        credentials_from_secret(&raw, &self.field)
    }
}
