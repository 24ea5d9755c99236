// crates/remediation-providers/tests/local_stores.rs
// ============================================================================
// Module: Local Store Tests
// Description: File audit store, environment secrets, and response parsing.
// Purpose: Verify collaborators that never touch the network.
// Dependencies: remediation-core, remediation-providers, tempfile
// ============================================================================

//! Local collaborator tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::fs;

use common::sample_alarm;
use remediation_core::AuditError;
use remediation_core::AuditKey;
use remediation_core::AuditStore;
use remediation_core::ContextRetriever;
use remediation_core::ContextSource;
use remediation_core::InvocationId;
use remediation_core::SecretError;
use remediation_core::SecretStore;
use remediation_providers::EnvSecretStore;
use remediation_providers::FileAuditStore;
use remediation_providers::KnowledgeBaseRetriever;
use remediation_providers::chat_completion_text;
use remediation_providers::credentials_from_secret;
use remediation_providers::generated_text;
use serde_json::json;
use time::OffsetDateTime;

// ============================================================================
// SECTION: File Audit Store
// ============================================================================

#[test]
fn file_store_writes_record_under_dated_path() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileAuditStore::new(dir.path().join("audit")).unwrap();
    let at = OffsetDateTime::from_unix_timestamp(1_768_480_200).unwrap();
    let key = AuditKey::for_record("prod-web-cpu-high", at, &InvocationId::new("7"), None);

    let location = store.put(&key, b"{\"ok\":true}").unwrap();

    let expected = store.root().join("logs/2026/01/15/prod-web-cpu-high-1768480200000-7.json");
    assert_eq!(location, expected.display().to_string());
    assert_eq!(fs::read(&expected).unwrap(), b"{\"ok\":true}");
    assert!(!expected.with_extension("json.tmp").exists());
}

#[test]
fn file_store_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileAuditStore::new(dir.path()).unwrap();
    let at = OffsetDateTime::from_unix_timestamp(1_768_480_200).unwrap();
    let key = AuditKey::for_record("disk-full", at, &InvocationId::new("7"), Some("audit"));

    store.put(&key, b"first").unwrap();
    let err = store.put(&key, b"second").unwrap_err();

    assert!(matches!(err, AuditError::Io(_)));
    let path = dir.path().join(key.as_str());
    assert_eq!(fs::read(path).unwrap(), b"first");
}

// ============================================================================
// SECTION: Secrets
// ============================================================================

#[test]
fn env_secret_reads_json_field() {
    let store = EnvSecretStore::with_lookup("NVIDIA_SECRET", "api_key", |name| {
        (name == "NVIDIA_SECRET").then(|| r#"{"api_key":"nvapi-abc"}"#.to_string())
    });

    let credentials = store.api_credentials().unwrap();

    assert_eq!(credentials.api_key(), "nvapi-abc");
    assert!(!format!("{credentials:?}").contains("nvapi-abc"));
}

#[test]
fn env_secret_missing_variable_is_fetch_error() {
    let store = EnvSecretStore::with_lookup("NVIDIA_SECRET", "api_key", |_| None);

    let err = store.api_credentials().unwrap_err();

    assert!(matches!(err, SecretError::Fetch(_)));
}

#[test]
fn raw_secret_values_are_used_verbatim() {
    assert_eq!(credentials_from_secret("  nvapi-raw \n", "api_key").unwrap().api_key(), "nvapi-raw");
    assert!(matches!(credentials_from_secret("   ", "api_key"), Err(SecretError::Invalid(_))));
    assert!(matches!(
        credentials_from_secret(r#"{"token":"x"}"#, "api_key"),
        Err(SecretError::Invalid(_))
    ));
    assert!(matches!(credentials_from_secret("{broken", "api_key"), Err(SecretError::Invalid(_))));
}

// ============================================================================
// SECTION: Knowledge Base
// ============================================================================

#[test]
fn knowledge_base_retriever_uses_static_guidance() {
    let context =
        KnowledgeBaseRetriever.retrieve(&sample_alarm("UnhealthyHostCount"), None).unwrap();

    assert_eq!(context.source, ContextSource::KnowledgeBase);
    assert!(context.successful);
    assert!(context.is_available());
    assert_eq!(context.embedding_dimensions, 0);
    assert!(context.knowledge.is_some());
}

// ============================================================================
// SECTION: Response Shapes
// ============================================================================

#[test]
fn generated_text_accepts_known_layouts() {
    assert_eq!(generated_text(&json!([{"generated_text": "a"}])).as_deref(), Some("a"));
    assert_eq!(generated_text(&json!({"generated_text": "b"})).as_deref(), Some("b"));
    assert_eq!(generated_text(&json!({"outputs": "c"})).as_deref(), Some("c"));
    assert_eq!(generated_text(&json!({"outputs": ["d"]})).as_deref(), Some("d"));
    assert_eq!(generated_text(&json!({"choices": [{"text": "e"}]})).as_deref(), Some("e"));
    assert_eq!(generated_text(&json!({"result": "f"})), None);
    assert_eq!(generated_text(&json!([])), None);
}

#[test]
fn chat_completion_text_requires_message_content() {
    let ok = json!({"choices": [{"message": {"content": "Confidence: 9"}}]});
    let missing = json!({"choices": [{"message": {}}]});

    assert_eq!(chat_completion_text(&ok).as_deref(), Some("Confidence: 9"));
    assert_eq!(chat_completion_text(&missing), None);
}
