// crates/remediation-providers/tests/common/mod.rs
// ============================================================================
// Module: Provider Test Fixtures
// Description: One-shot local HTTP servers and sample alarms.
// Purpose: Exercise HTTP collaborators against real sockets.
// Dependencies: remediation-core, tiny_http, time
// ============================================================================

//! Shared fixtures for remediation-providers integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only fixtures may panic on setup failures."
)]

use std::thread;
use std::thread::JoinHandle;

use remediation_core::AlarmRecord;
use remediation_providers::HttpTransport;
use remediation_providers::HttpTransportConfig;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use time::OffsetDateTime;

/// Request captured by a one-shot server.
#[derive(Debug, Default)]
pub struct CapturedRequest {
    /// Request body decoded as JSON.
    pub body: Value,
    /// Authorization header value, if any.
    pub authorization: Option<String>,
    /// Content-Type header value, if any.
    pub content_type: Option<String>,
}

/// Starts a server answering one request with `status` and `body`.
pub fn one_shot_server(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = body.to_string();
    let handle = thread::spawn(move || {
        let mut captured = CapturedRequest::default();
        if let Ok(mut request) = server.recv() {
            let mut raw = String::new();
            let _ = request.as_reader().read_to_string(&mut raw);
            captured.body = serde_json::from_str(&raw).unwrap_or(Value::Null);
            for header in request.headers() {
                if header.field.equiv("Authorization") {
                    captured.authorization = Some(header.value.as_str().to_string());
                }
                if header.field.equiv("Content-Type") {
                    captured.content_type = Some(header.value.as_str().to_string());
                }
            }
            let content_type =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response = Response::from_string(body).with_status_code(status).with_header(content_type);
            let _ = request.respond(response);
        }
        captured
    });
    (format!("http://{addr}/v1/endpoint"), handle)
}

/// Builds a transport that may reach the local server.
pub fn local_transport(url: &str) -> HttpTransport {
    HttpTransport::new(&HttpTransportConfig {
        allow_http: true,
        timeout_ms: 5_000,
        ..HttpTransportConfig::for_url(url)
    })
    .unwrap()
}

/// Sample normalized alarm.
pub fn sample_alarm(metric_name: &str) -> AlarmRecord {
    let event = json!({
        "detail": {
            "alarmName": "prod-web-cpu-high",
            "state": {"value": "ALARM", "reason": "Threshold Crossed"},
            "configuration": {"metricName": metric_name, "namespace": "AWS/EC2"}
        }
    });
    AlarmRecord::from_event(&event, OffsetDateTime::UNIX_EPOCH)
}
