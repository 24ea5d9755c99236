// crates/remediation-providers/src/secrets.rs
// ============================================================================
// Module: Environment Secret Store
// Description: API credentials read from an environment variable.
// Purpose: Resolve the inference API key for local and container deployments.
// Dependencies: remediation-core
// ============================================================================

//! ## Overview
//! The variable may hold the key itself or a JSON object carrying the key
//! under a configured field, mirroring the managed secret layout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use remediation_core::ApiCredentials;
use remediation_core::SecretError;
use remediation_core::SecretStore;
use serde_json::Value;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Lookup function used to read variables.
type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Secret store backed by an environment variable.
pub struct EnvSecretStore {
    /// Variable name.
    variable: String,
    /// Field holding the key when the value is a JSON object.
    field: String,
    /// Variable lookup.
    lookup: Box<EnvLookup>,
}

impl EnvSecretStore {
    /// Reads from the process environment.
    #[must_use]
    pub fn new(variable: impl Into<String>, field: impl Into<String>) -> Self {
        Self::with_lookup(variable, field, |name| std::env::var(name).ok())
    }

    /// Reads through a custom lookup.
    #[must_use]
    pub fn with_lookup(
        variable: impl Into<String>,
        field: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            variable: variable.into(),
            field: field.into(),
            lookup: Box::new(lookup),
        }
    }
}

impl SecretStore for EnvSecretStore {
    fn api_credentials(&self) -> Result<ApiCredentials, SecretError> {
        let raw = (self.lookup)(&self.variable)
            .ok_or_else(|| SecretError::Fetch(format!("{} is not set", self.variable)))?;
        credentials_from_secret(&raw, &self.field)
    }
}

/// Extracts the API key from a raw secret string.
///
/// JSON objects are searched for `field`; any other non-blank value is the key.
///
/// # Errors
///
/// Returns [`SecretError::Invalid`] when the key is blank or the field is missing.
pub fn credentials_from_secret(raw: &str, field: &str) -> Result<ApiCredentials, SecretError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed)
            .map_err(|_| SecretError::Invalid("secret is not valid json".to_string()))?;
        let key = value
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SecretError::Invalid(format!("secret field {field} missing")))?;
        return Ok(ApiCredentials::new(key));
    }
    if trimmed.is_empty() {
        return Err(SecretError::Invalid("secret is empty".to_string()));
    }
    Ok(ApiCredentials::new(trimmed))
}
