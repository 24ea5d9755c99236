// crates/remediation-aws/src/lib.rs
// ============================================================================
// Module: Remediation Gate AWS Collaborators
// Description: AWS-backed audit, execution, secret, and inference adapters.
// Purpose: Run the remediation pipeline against managed AWS services.
// Dependencies: aws-config, aws-sdk-*, tokio, remediation-core
// ============================================================================

//! ## Overview
//! Each adapter implements one `remediation-core` collaborator trait over a
//! blocking facade. All adapters share a single [`SdkContext`] runtime:
//! - [`S3AuditStore`] writes audit records.
//! - [`SsmExecutionBackend`] dispatches Run Command and Automation requests.
//! - [`SecretsManagerStore`] resolves inference API credentials.
//! - [`SageMakerTransport`] carries inference payloads to hosted endpoints.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod s3;
pub mod sagemaker;
pub mod sdk;
pub mod secrets_manager;
pub mod ssm;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use s3::S3AuditSettings;
pub use s3::S3AuditStore;
pub use s3::object_uri;
pub use sagemaker::SageMakerSettings;
pub use sagemaker::SageMakerTransport;
pub use sagemaker::decode_endpoint_body;
pub use sdk::AwsError;
pub use sdk::AwsSettings;
pub use sdk::DEFAULT_AWS_TIMEOUT_MS;
pub use sdk::MAX_AWS_TIMEOUT_MS;
pub use sdk::SdkContext;
pub use secrets_manager::SecretsManagerStore;
pub use ssm::DisabledExecutionBackend;
pub use ssm::InstanceTarget;
pub use ssm::SsmExecutionBackend;
pub use ssm::SsmSettings;
pub use ssm::sdk_parameters;
