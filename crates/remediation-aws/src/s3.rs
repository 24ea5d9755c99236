// crates/remediation-aws/src/s3.rs
// ============================================================================
// Module: S3 Audit Store
// Description: Audit records written as JSON objects to an S3 bucket.
// Purpose: Durable per-invocation audit trail for managed deployments.
// Dependencies: aws-sdk-s3, remediation-core
// ============================================================================

//! ## Overview
//! Each record is one `put_object` with content type `application/json`.
//! Keys come fully formed from [`AuditKey`]; the store adds nothing to them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use remediation_core::AuditError;
use remediation_core::AuditKey;
use remediation_core::AuditStore;

use crate::sdk::AwsError;
use crate::sdk::AwsSettings;
use crate::sdk::SdkContext;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for [`S3AuditStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3AuditSettings {
    /// Bucket name.
    pub bucket: String,
    /// Client settings.
    pub client: AwsSettings,
    /// Force path-style addressing (for S3-compatible stores).
    pub force_path_style: bool,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// S3-backed audit store.
pub struct S3AuditStore {
    /// S3 client handle.
    client: Client,
    /// Bucket name.
    bucket: String,
    /// Runtime used to drive the client.
    context: SdkContext,
}

impl S3AuditStore {
    /// Creates a store for the configured bucket.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError`] when the bucket is blank or configuration fails.
    pub fn new(context: &SdkContext, settings: &S3AuditSettings) -> Result<Self, AwsError> {
        if settings.bucket.trim().is_empty() {
            return Err(AwsError::Invalid("bucket must be set".to_string()));
        }
        let shared = context.load_config(&settings.client)?;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if settings.force_path_style {
            builder = builder.force_path_style(true);
        }
        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: settings.bucket.clone(),
            context: context.clone(),
        })
    }
}

impl AuditStore for S3AuditStore {
    fn put(&self, key: &AuditKey, body: &[u8]) -> Result<String, AuditError> {
        let client = self.client.clone();
        let bucket = self.bucket.clone();
        let object_key = key.as_str().to_string();
        let bytes = body.to_vec();
        self.context
            .block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type("application/json")
                    .body(ByteStream::from(bytes))
                    .send()
                    .await
                    .map_err(|err| AwsError::Backend(err.to_string()))?;
                Ok(())
            })
            .map_err(|err| AuditError::Io(err.to_string()))?;
        Ok(object_uri(&self.bucket, key))
    }
}

/// Formats the `s3://bucket/key` location of a record.
#[must_use]
pub fn object_uri(bucket: &str, key: &AuditKey) -> String {
    format!("s3://{bucket}/{}", key.as_str())
}
