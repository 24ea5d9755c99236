// crates/remediation-aws/src/ssm.rs
// ============================================================================
// Module: Systems Manager Execution Backend
// Description: Dispatches gate-approved requests through Run Command or Automation.
// Purpose: Turn an ExecutionRequest into exactly one Systems Manager call.
// Dependencies: aws-sdk-ssm, remediation-core
// ============================================================================

//! ## Overview
//! Run Command requests target instances by tag; Automation requests carry
//! their own parameters and start a single execution. The backend never
//! polls for completion: acceptance by the service is the success signal and
//! the returned command or execution id becomes the audit reference.
//!
//! [`DisabledExecutionBackend`] refuses every dispatch and is used when a
//! deployment must never execute, regardless of mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;

use aws_sdk_ssm::Client;
use aws_sdk_ssm::types::Target;
use remediation_core::DispatchMode;
use remediation_core::DispatchReceipt;
use remediation_core::ExecutionBackend;
use remediation_core::ExecutionError;
use remediation_core::ExecutionRequest;

use crate::sdk::AwsError;
use crate::sdk::AwsSettings;
use crate::sdk::SdkContext;

// ============================================================================
// SECTION: Targets
// ============================================================================

/// Instance selector for Run Command, expressed as a resource tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTarget {
    /// Tag key, without the `tag:` prefix.
    pub tag_key: String,
    /// Accepted tag values.
    pub values: Vec<String>,
}

impl InstanceTarget {
    /// Selects instances whose `tag_key` tag has one of `values`.
    #[must_use]
    pub fn tag(tag_key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
            values,
        }
    }

    /// Returns the Systems Manager target key (`tag:<key>`).
    #[must_use]
    pub fn target_key(&self) -> String {
        format!("tag:{}", self.tag_key)
    }

    /// Converts to the SDK target type.
    fn to_sdk(&self) -> Target {
        Target::builder().key(self.target_key()).set_values(Some(self.values.clone())).build()
    }
}

impl Default for InstanceTarget {
    fn default() -> Self {
        Self::tag("Environment", vec!["production".to_string()])
    }
}

/// Configuration for [`SsmExecutionBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsmSettings {
    /// Client settings.
    pub client: AwsSettings,
    /// Run Command targets.
    pub targets: Vec<InstanceTarget>,
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// Execution backend backed by Systems Manager.
pub struct SsmExecutionBackend {
    /// SSM client handle.
    client: Client,
    /// Run Command targets.
    targets: Vec<InstanceTarget>,
    /// Runtime used to drive the client.
    context: SdkContext,
}

impl SsmExecutionBackend {
    /// Creates a backend.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError`] when no targets are configured or loading fails.
    pub fn new(context: &SdkContext, settings: &SsmSettings) -> Result<Self, AwsError> {
        if settings.targets.is_empty() {
            return Err(AwsError::Invalid("at least one instance target is required".to_string()));
        }
        let incomplete = settings
            .targets
            .iter()
            .any(|target| target.tag_key.trim().is_empty() || target.values.is_empty());
        if incomplete {
            return Err(AwsError::Invalid("instance targets need a tag key and values".to_string()));
        }
        let shared = context.load_config(&settings.client)?;
        Ok(Self {
            client: Client::new(&shared),
            targets: settings.targets.clone(),
            context: context.clone(),
        })
    }

    /// Sends a Run Command request and returns the command id.
    fn send_command(&self, request: &ExecutionRequest) -> Result<String, AwsError> {
        let call = self
            .client
            .send_command()
            .document_name(&request.document)
            .set_targets(Some(self.targets.iter().map(InstanceTarget::to_sdk).collect()))
            .set_parameters(Some(sdk_parameters(&request.parameters)))
            .comment(&request.comment);
        self.context.block_on(async move {
            let output = call.send().await.map_err(|err| AwsError::Backend(err.to_string()))?;
            output
                .command()
                .and_then(|command| command.command_id())
                .map(ToString::to_string)
                .ok_or_else(|| AwsError::Backend("response carried no command id".to_string()))
        })
    }

    /// Starts an Automation execution and returns its id.
    fn start_automation(&self, request: &ExecutionRequest) -> Result<String, AwsError> {
        let call = self
            .client
            .start_automation_execution()
            .document_name(&request.document)
            .set_parameters(Some(sdk_parameters(&request.parameters)));
        self.context.block_on(async move {
            let output = call.send().await.map_err(|err| AwsError::Backend(err.to_string()))?;
            output.automation_execution_id().map(ToString::to_string).ok_or_else(|| {
                AwsError::Backend("response carried no automation execution id".to_string())
            })
        })
    }
}

impl ExecutionBackend for SsmExecutionBackend {
    fn dispatch(&self, request: &ExecutionRequest) -> Result<DispatchReceipt, ExecutionError> {
        let reference_id = match request.mode {
            DispatchMode::RunCommand => self.send_command(request),
            DispatchMode::Automation => self.start_automation(request),
        }
        .map_err(|err| ExecutionError::Dispatch(err.to_string()))?;
        Ok(DispatchReceipt {
            reference_id,
            mode: request.mode,
        })
    }
}

/// Converts ordered request parameters to the SDK map shape.
#[must_use]
pub fn sdk_parameters(parameters: &BTreeMap<String, Vec<String>>) -> HashMap<String, Vec<String>> {
    parameters.iter().map(|(name, values)| (name.clone(), values.clone())).collect()
}

// ============================================================================
// SECTION: Disabled Backend
// ============================================================================

/// Backend that refuses every dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledExecutionBackend;

impl ExecutionBackend for DisabledExecutionBackend {
    fn dispatch(&self, _request: &ExecutionRequest) -> Result<DispatchReceipt, ExecutionError> {
        Err(ExecutionError::Disabled)
    }
}
