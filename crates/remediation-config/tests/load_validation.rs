//! Config load and override tests for remediation-config.
// crates/remediation-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards, overrides, and section checks.
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use remediation_config::AuditStoreKind;
use remediation_config::ConfigError;
use remediation_config::RemediationConfig;
use remediation_config::RetrievalStrategy;
use remediation_config::SecretSource;
use remediation_config::TransportConfig;
use remediation_core::OperatingMode;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: BTreeMap<String, String> =
        pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
    move |name| vars.get(name).cloned()
}

fn assert_invalid(result: Result<RemediationConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn defaults_apply_without_file_or_environment() -> TestResult {
    let config = RemediationConfig::load_with(None, &env(&[])).map_err(|err| err.to_string())?;
    if config.mode != OperatingMode::DryRun {
        return Err("default mode must be DRY_RUN".to_string());
    }
    if config.audit.store != AuditStoreKind::File || config.secrets.source != SecretSource::None {
        return Err("defaults must not require cloud resources".to_string());
    }
    let pipeline = config.to_pipeline_config();
    if pipeline.catalog.entries().count() != 3 || pipeline.audit_prefix.is_some() {
        return Err("default pipeline config must use the base catalog".to_string());
    }
    Ok(())
}

#[test]
fn deployment_variables_override_file_values() -> TestResult {
    let file = write_config(
        br#"
mode = "DRY_RUN"

[audit]
store = "file"
directory = "/tmp/audit"
prefix = "gate"

[actions]
extended_catalog = true
"#,
    )?;
    let lookup = env(&[
        ("MODE", " active "),
        ("S3_BUCKET", "intellinemo-agent-logs"),
        ("SECRETS_ARN", "arn:aws:secretsmanager:us-east-1:123:secret:nvidia"),
        ("LLAMA_ENDPOINT", "autocloudops-llama3-nim-endpoint"),
        ("RETRIEVAL_ENDPOINT", "https://retrieval.example.com/v1/embeddings"),
    ]);
    let config = RemediationConfig::load_with(Some(file.path()), &lookup)
        .map_err(|err| err.to_string())?;

    if config.mode != OperatingMode::Active {
        return Err("MODE must override the file".to_string());
    }
    if config.audit.store != AuditStoreKind::S3
        || config.audit.bucket.as_deref() != Some("intellinemo-agent-logs")
    {
        return Err("S3_BUCKET must select the s3 store".to_string());
    }
    if config.secrets.source != SecretSource::SecretsManager {
        return Err("SECRETS_ARN must select secrets manager".to_string());
    }
    if !matches!(&config.reasoning.transport, TransportConfig::Sagemaker { endpoint, .. } if endpoint == "autocloudops-llama3-nim-endpoint")
    {
        return Err("endpoint names must select the sagemaker transport".to_string());
    }
    if config.retrieval.strategy != RetrievalStrategy::Embedding {
        return Err("RETRIEVAL_ENDPOINT must enable embedding retrieval".to_string());
    }
    let pipeline = config.to_pipeline_config();
    if pipeline.catalog.entries().count() != 12 || pipeline.audit_prefix.as_deref() != Some("gate") {
        return Err("file settings must survive overrides".to_string());
    }
    Ok(())
}

#[test]
fn config_path_can_come_from_environment() -> TestResult {
    let file = write_config(b"mode = \"ACTIVE\"\n")?;
    let path = file.path().to_string_lossy().to_string();
    let config = RemediationConfig::load_with(None, &env(&[("REMEDIATION_GATE_CONFIG", path.as_str())]))
        .map_err(|err| err.to_string())?;
    if config.mode != OperatingMode::Active {
        return Err("config file from environment was not read".to_string());
    }
    Ok(())
}

#[test]
fn blank_variables_are_ignored() -> TestResult {
    let config = RemediationConfig::load_with(None, &env(&[("MODE", "  "), ("S3_BUCKET", "")]))
        .map_err(|err| err.to_string())?;
    if config.mode != OperatingMode::DryRun || config.audit.store != AuditStoreKind::File {
        return Err("blank overrides must be treated as unset".to_string());
    }
    Ok(())
}

#[test]
fn unknown_mode_is_rejected() -> TestResult {
    assert_invalid(
        RemediationConfig::load_with(None, &env(&[("MODE", "LIVE")])),
        "unknown operating mode",
    )
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(
        RemediationConfig::load_with(Some(path), &env(&[])),
        "config path component too long",
    )
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let file = write_config(&vec![b'#'; 1_048_577])?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "config file exceeds size limit",
    )
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let file = write_config(&[0xFF, 0xFE, 0xFF])?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "config file must be utf-8",
    )
}

#[test]
fn load_rejects_unknown_fields() -> TestResult {
    let file = write_config(b"[audit]\nbuket = \"typo\"\n")?;
    match RemediationConfig::load_with(Some(file.path()), &env(&[])) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got ok={}", other.is_ok())),
    }
}

#[test]
fn s3_store_requires_bucket() -> TestResult {
    let file = write_config(b"[audit]\nstore = \"s3\"\n")?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "audit.bucket must be set",
    )
}

#[test]
fn cleartext_reasoning_url_requires_opt_in() -> TestResult {
    let denied = write_config(
        b"[reasoning.transport]\ntype = \"http\"\nurl = \"http://localhost:8000/v1/chat\"\n",
    )?;
    assert_invalid(
        RemediationConfig::load_with(Some(denied.path()), &env(&[])),
        "without allow_http",
    )?;
    let allowed = write_config(
        b"[reasoning.transport]\ntype = \"http\"\nurl = \"http://localhost:8000/v1/chat\"\nallow_http = true\n",
    )?;
    RemediationConfig::load_with(Some(allowed.path()), &env(&[]))
        .map(|_| ())
        .map_err(|err| err.to_string())
}

#[test]
fn timeouts_are_bounded() -> TestResult {
    let file = write_config(b"[reasoning]\ntimeout_ms = 600000\n")?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "reasoning.timeout_ms must be between",
    )
}

#[test]
fn secrets_manager_requires_secret_id() -> TestResult {
    let file = write_config(b"[secrets]\nsource = \"secrets_manager\"\n")?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "secrets.secret_id is required",
    )
}

#[test]
fn file_event_sink_requires_path() -> TestResult {
    let file = write_config(b"[events]\nsink = \"file\"\n")?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "events.path is required",
    )
}

#[test]
fn ssm_backend_requires_tagged_targets() -> TestResult {
    let file = write_config(b"[execution]\ntargets = []\n")?;
    assert_invalid(
        RemediationConfig::load_with(Some(file.path()), &env(&[])),
        "execution.targets must not be empty",
    )?;
    let disabled = write_config(b"[execution]\nbackend = \"disabled\"\ntargets = []\n")?;
    RemediationConfig::load_with(Some(disabled.path()), &env(&[]))
        .map(|_| ())
        .map_err(|err| err.to_string())
}
