// crates/remediation-cli/tests/invoke_end_to_end.rs
// ============================================================================
// Module: Invocation End-to-End Tests
// Description: Full pipeline runs against a local reasoning server.
// Purpose: Verify wiring, response shape, and audit persistence together.
// Dependencies: remediation-cli, remediation-config, tempfile, tiny_http
// ============================================================================

//! End-to-end invocation tests over a real socket and a temp audit directory.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::thread;
use std::thread::JoinHandle;

use remediation_cli::build_pipeline;
use remediation_cli::invoke;
use remediation_config::AuditConfig;
use remediation_config::ConfigError;
use remediation_config::EventSinkKind;
use remediation_config::EventsConfig;
use remediation_config::ExecutionBackendKind;
use remediation_config::ExecutionConfig;
use remediation_config::ReasoningConfig;
use remediation_config::RemediationConfig;
use remediation_config::TransportConfig;
use remediation_core::OperatingMode;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use time::OffsetDateTime;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// 2026-01-15T10:00:00Z.
const RECEIVED_AT: i64 = 1_768_471_200;

fn received_at() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(RECEIVED_AT).unwrap()
}

fn reasoning_server(content: &str) -> (String, JoinHandle<Value>) {
    let (url, handle) = reasoning_server_for(content, 1);
    (url, thread::spawn(move || handle.join().unwrap().remove(0)))
}

fn reasoning_server_for(content: &str, requests: usize) -> (String, JoinHandle<Vec<Value>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
        .to_string();
    let handle = thread::spawn(move || {
        let mut received = Vec::with_capacity(requests);
        for _ in 0 .. requests {
            let mut request = server.recv().unwrap();
            let mut raw = String::new();
            request.as_reader().read_to_string(&mut raw).unwrap();
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            request.respond(Response::from_string(body.clone()).with_header(header)).unwrap();
            received.push(serde_json::from_str(&raw).unwrap());
        }
        received
    });
    (format!("http://{addr}/v1/chat/completions"), handle)
}

fn local_config(url: &str, audit_dir: &Path, mode: OperatingMode) -> RemediationConfig {
    RemediationConfig {
        mode,
        reasoning: ReasoningConfig {
            transport: TransportConfig::Http {
                url: url.to_string(),
                allow_http: true,
            },
            timeout_ms: 5_000,
            ..ReasoningConfig::default()
        },
        audit: AuditConfig {
            directory: audit_dir.to_string_lossy().to_string(),
            ..AuditConfig::default()
        },
        execution: ExecutionConfig {
            backend: ExecutionBackendKind::Disabled,
            ..ExecutionConfig::default()
        },
        events: EventsConfig {
            sink: EventSinkKind::None,
            ..EventsConfig::default()
        },
        ..RemediationConfig::default()
    }
}

fn cpu_alarm(alarm_name: &str) -> Value {
    json!({
        "detail": {
            "alarmName": alarm_name,
            "state": {"value": "ALARM", "reason": "Threshold Crossed"},
            "configuration": {"metricName": "CPUUtilization"}
        }
    })
}

fn audit_files(audit_dir: &Path, alarm_name: &str) -> Vec<PathBuf> {
    let day = audit_dir.join("logs/2026/01/15");
    let prefix = format!("{alarm_name}-{RECEIVED_AT}000-");
    let mut files: Vec<PathBuf> = fs::read_dir(day)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".json"))
        })
        .collect();
    files.sort();
    files
}

fn read_audit(audit_dir: &Path, alarm_name: &str) -> Value {
    let files = audit_files(audit_dir, alarm_name);
    assert_eq!(files.len(), 1, "expected one audit record, found {files:?}");
    serde_json::from_slice(&fs::read(&files[0]).unwrap()).unwrap()
}

#[test]
fn dry_run_invocation_returns_200_and_writes_audit() {
    let audit_dir = TempDir::new().unwrap();
    let (url, handle) = reasoning_server("High load from a traffic spike. Confidence: 8");
    let config = local_config(&url, audit_dir.path(), OperatingMode::DryRun);

    let result = invoke(Ok(config), &cpu_alarm("prod-web-cpu-high"), received_at());
    let sent = handle.join().unwrap();

    assert_eq!(result.status_code, 200);
    let body: Value = serde_json::from_str(&result.body).unwrap();
    assert_eq!(body["action"], "scale_instance");
    assert_eq!(body["confidence"], 8);
    assert_eq!(body["mode"], "DRY_RUN");
    assert_eq!(body["state"], "SKIPPED_DRY_RUN");
    assert!(sent["messages"][0]["content"].as_str().unwrap().contains("CPUUtilization"));

    let record = read_audit(audit_dir.path(), "prod-web-cpu-high");
    assert_eq!(record["gate_state"], "SKIPPED_DRY_RUN");
    assert_eq!(record["action"]["type"], "scale_instance");
    assert!(record["execution_request"].is_null());
}

#[test]
fn active_dispatch_failure_is_recorded_not_fatal() {
    let audit_dir = TempDir::new().unwrap();
    let (url, handle) = reasoning_server("Scale out now. Confidence: 9");
    let config = local_config(&url, audit_dir.path(), OperatingMode::Active);

    let pipeline = build_pipeline(&config).unwrap();
    let result = pipeline.handle(&cpu_alarm("prod-web-cpu-high"), received_at());
    handle.join().unwrap();

    assert_eq!(result.status_code, 200);
    let record = read_audit(audit_dir.path(), "prod-web-cpu-high");
    assert_eq!(record["gate_state"], "EXECUTION_ERROR");
    assert_eq!(record["execution_request"]["document"], "RemediationGate-ScaleAutoScalingGroup");
}

#[test]
fn repeated_alarm_in_the_same_second_writes_two_records() {
    let audit_dir = TempDir::new().unwrap();
    let (url, handle) = reasoning_server_for("Still hot. Confidence: 8", 2);
    let config = local_config(&url, audit_dir.path(), OperatingMode::DryRun);

    let pipeline = build_pipeline(&config).unwrap();
    let first = pipeline.handle(&cpu_alarm("prod-web-cpu-high"), received_at());
    let second = pipeline.handle(&cpu_alarm("prod-web-cpu-high"), received_at());
    handle.join().unwrap();

    assert_eq!(first.status_code, 200);
    assert_eq!(second.status_code, 200);
    let files = audit_files(audit_dir.path(), "prod-web-cpu-high");
    assert_eq!(files.len(), 2);
    for file in &files {
        let record: Value = serde_json::from_slice(&fs::read(file).unwrap()).unwrap();
        assert_eq!(record["gate_state"], "SKIPPED_DRY_RUN");
    }
}

#[test]
fn low_confidence_reply_is_not_executed() {
    let audit_dir = TempDir::new().unwrap();
    let (url, handle) = reasoning_server("Unclear signal. Confidence: 4");
    let config = local_config(&url, audit_dir.path(), OperatingMode::Active);

    let result = invoke(Ok(config), &cpu_alarm("prod-web-cpu-high"), received_at());
    handle.join().unwrap();

    let body: Value = serde_json::from_str(&result.body).unwrap();
    assert_eq!(body["state"], "SKIPPED_LOW_CONFIDENCE");
    assert_eq!(body["confidence"], 4);
}

#[test]
fn configuration_failure_returns_500() {
    let result = invoke(
        Err(ConfigError::Invalid("audit.bucket must be set".to_string())),
        &cpu_alarm("prod-web-cpu-high"),
        received_at(),
    );

    assert_eq!(result.status_code, 500);
    let body: Value = serde_json::from_str(&result.body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("configuration error:"));
}

#[test]
fn missing_secret_fails_and_still_writes_partial_record() {
    let audit_dir = TempDir::new().unwrap();
    let mut config = local_config(
        "http://127.0.0.1:9/v1/chat/completions",
        audit_dir.path(),
        OperatingMode::DryRun,
    );
    config.secrets.source = remediation_config::SecretSource::Env;
    config.secrets.env_var = "REMEDIATION_GATE_TEST_SECRET_THAT_IS_NEVER_SET".to_string();

    let result = invoke(Ok(config), &cpu_alarm("prod-secret-missing"), received_at());

    assert_eq!(result.status_code, 500);
    let record = read_audit(audit_dir.path(), "prod-secret-missing");
    assert!(record["error"].as_str().unwrap().contains("secret unavailable"));
    assert!(record["reasoning"].is_null());
}
