// crates/remediation-aws/src/sdk.rs
// ============================================================================
// Module: AWS SDK Context
// Description: Owned Tokio runtime and shared SDK configuration loading.
// Purpose: Let blocking collaborators drive async AWS clients.
// Dependencies: aws-config, tokio
// ============================================================================

//! ## Overview
//! The pipeline is synchronous while the AWS SDK is async. [`SdkContext`]
//! owns a multi-thread runtime shared by every AWS collaborator and blocks
//! on SDK futures, stepping onto a helper thread when already inside a
//! current-thread runtime. Every client built from [`SdkContext::load_config`]
//! carries an operation timeout covering retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::SdkConfig;
use aws_config::timeout::TimeoutConfig;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;
use tokio::runtime::RuntimeFlavor;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by AWS collaborators before a domain error applies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AwsError {
    /// Invalid configuration input.
    #[error("aws configuration invalid: {0}")]
    Invalid(String),
    /// Runtime or local I/O failure.
    #[error("aws runtime error: {0}")]
    Io(String),
    /// The service returned an error.
    #[error("aws service error: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Default operation timeout for AWS calls, in milliseconds.
pub const DEFAULT_AWS_TIMEOUT_MS: u64 = 30_000;

/// Upper bound for an AWS operation timeout, in milliseconds.
pub const MAX_AWS_TIMEOUT_MS: u64 = 300_000;

/// Per-service client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    /// Region override; falls back to the environment chain.
    pub region: Option<String>,
    /// Custom endpoint URL (for local emulators).
    pub endpoint: Option<String>,
    /// Operation timeout in milliseconds, including retries.
    pub timeout_ms: u64,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            timeout_ms: DEFAULT_AWS_TIMEOUT_MS,
        }
    }
}

impl AwsSettings {
    /// Builds the SDK timeout configuration for these settings.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Invalid`] when the timeout is zero or above
    /// [`MAX_AWS_TIMEOUT_MS`].
    pub fn timeout_config(&self) -> Result<TimeoutConfig, AwsError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_AWS_TIMEOUT_MS {
            return Err(AwsError::Invalid(format!(
                "timeout_ms must be between 1 and {MAX_AWS_TIMEOUT_MS}"
            )));
        }
        Ok(TimeoutConfig::builder()
            .operation_timeout(Duration::from_millis(self.timeout_ms))
            .build())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Runtime shared by AWS collaborators.
#[derive(Clone)]
pub struct SdkContext {
    /// Tokio runtime for blocking SDK calls.
    runtime: Option<Arc<Runtime>>,
}

impl Drop for SdkContext {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            let _ = std::thread::spawn(move || drop(runtime));
        }
    }
}

impl SdkContext {
    /// Creates a context with its own runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Io`] when the runtime cannot be built.
    pub fn new() -> Result<Self, AwsError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| AwsError::Io(err.to_string()))?;
        Ok(Self {
            runtime: Some(Arc::new(runtime)),
        })
    }

    /// Loads shared SDK configuration with optional region and endpoint and
    /// the configured operation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError`] when the endpoint is blank, the timeout is out of
    /// range, or loading fails.
    pub fn load_config(&self, settings: &AwsSettings) -> Result<SdkConfig, AwsError> {
        let region = settings.region.clone();
        let endpoint = settings.endpoint.clone();
        if endpoint.as_deref().is_some_and(|value| value.trim().is_empty()) {
            return Err(AwsError::Invalid("endpoint must not be blank".to_string()));
        }
        let timeouts = settings.timeout_config()?;
        self.block_on(async move {
            let mut loader =
                aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
            if let Some(region) = region {
                loader = loader.region(Region::new(region));
            }
            if let Some(endpoint) = endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            Ok(loader.load().await)
        })
    }

    /// Blocks on an SDK future.
    ///
    /// # Errors
    ///
    /// Returns the future's error, or [`AwsError::Io`] when the runtime is gone.
    pub fn block_on<F, T>(&self, future: F) -> Result<T, AwsError>
    where
        F: Future<Output = Result<T, AwsError>> + Send + 'static,
        T: Send + 'static,
    {
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| AwsError::Io("aws runtime closed".to_string()))?;
        if let Ok(handle) = Handle::try_current() {
            if matches!(handle.runtime_flavor(), RuntimeFlavor::MultiThread) {
                return tokio::task::block_in_place(|| handle.block_on(future));
            }
            let (tx, rx) = std::sync::mpsc::sync_channel(1);
            std::thread::spawn(move || {
                let result = Runtime::new()
                    .map_err(|err| AwsError::Io(err.to_string()))
                    .and_then(|runtime| runtime.block_on(future));
                let _ = tx.send(result);
            });
            return rx
                .recv()
                .unwrap_or_else(|_| Err(AwsError::Io("aws helper thread failed".to_string())));
        }
        runtime.block_on(future)
    }
}
