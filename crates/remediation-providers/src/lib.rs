// crates/remediation-providers/src/lib.rs
// ============================================================================
// Module: Remediation Gate Providers
// Description: HTTP and local implementations of the pipeline collaborators.
// Purpose: Reach model and embedding endpoints and local storage.
// Dependencies: remediation-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the network-facing reasoning and retrieval clients built
//! on a JSON [`InferenceTransport`], an environment-variable secret store,
//! and a filesystem audit store. Every outbound call is bounded by a timeout
//! and a response size limit.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit_file;
pub mod reasoning;
pub mod retrieval;
pub mod secrets;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit_file::FileAuditStore;
pub use reasoning::ChatCompletionReasoner;
pub use reasoning::GenerationSettings;
pub use reasoning::TextGenerationReasoner;
pub use reasoning::chat_completion_text;
pub use reasoning::generated_text;
pub use retrieval::EmbeddingRetriever;
pub use retrieval::KnowledgeBaseRetriever;
pub use secrets::EnvSecretStore;
pub use secrets::credentials_from_secret;
pub use transport::HttpTransport;
pub use transport::HttpTransportConfig;
pub use transport::InferenceTransport;
pub use transport::TransportError;
