// crates/dataplan-gate-config/tests/config_loading.rs
// ============================================================================
// Module: Config Loading Tests
// Description: File-based loading, validation, and data-plan resolution.
// ============================================================================
//! ## Overview
//! Writes configs and data plans into temporary directories and loads them
//! through the public API.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

use std::fs;
use std::path::Path;

use dataplan_gate_config::ConfigError;
use dataplan_gate_config::DEFAULT_DATA_PLAN_MAX_BYTES;
use dataplan_gate_config::GateConfig;
use dataplan_gate_config::read_data_plan;
use dataplan_gate_core::PolicyOverrides;
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn sample_plan() -> String {
    json!({
        "dtpn": {
            "blok": {"ev": true, "ea": false, "ua": false, "ui": false},
            "vers": {
                "version_document": {
                    "data_points": [{
                        "match": {"type": "screen_view", "criteria": {"screen_name": "Home"}},
                        "validator": {}
                    }]
                }
            }
        }
    })
    .to_string()
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn empty_config_applies_defaults() {
    let config: GateConfig = toml::from_str("").unwrap();

    assert!(config.data_plan.path.is_none());
    assert_eq!(config.data_plan.max_bytes, DEFAULT_DATA_PLAN_MAX_BYTES);
    assert_eq!(config.logging.filter, "info");
    assert_eq!(config.policy_overrides(), PolicyOverrides::default());
    assert!(config.validate().is_ok());
}

#[test]
fn config_without_data_plan_loads_no_document() {
    let config = GateConfig::default();

    assert!(config.load_data_plan().unwrap().is_none());
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn loads_config_and_resolves_relative_plan_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plan.json", &sample_plan());
    let config_path = write(
        dir.path(),
        "dataplan-gate.toml",
        r#"
[data_plan]
path = "plan.json"

[blocking]
block_user_attributes = true

[logging]
filter = "dataplan_gate=debug"
"#,
    );

    let config = GateConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.data_plan_path(), Some(dir.path().join("plan.json")));
    assert_eq!(config.logging.filter, "dataplan_gate=debug");
    assert_eq!(
        config.policy_overrides(),
        PolicyOverrides {
            block_user_attributes: Some(true),
            ..PolicyOverrides::default()
        }
    );

    let document = config.load_data_plan().unwrap().unwrap();
    assert_eq!(document.data_points.len(), 1);
    assert_eq!(document.policy.and_then(|policy| policy.block_events), Some(true));
}

#[test]
fn surrounding_whitespace_in_plan_path_is_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "plan.json", &sample_plan());
    let config_path =
        write(dir.path(), "dataplan-gate.toml", "[data_plan]\npath = \"  plan.json \"\n");

    let config = GateConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.data_plan_path(), Some(dir.path().join("plan.json")));
    assert!(config.load_data_plan().unwrap().is_some());
}

#[test]
fn missing_requested_config_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    assert!(matches!(GateConfig::load(Some(&missing)), Err(ConfigError::Io(_))));
    assert!(matches!(GateConfig::load_or_default(Some(&missing)), Err(ConfigError::Io(_))));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "bad.toml", "[blocking]\nblock_everything = true\n");

    assert!(matches!(GateConfig::load(Some(&path)), Err(ConfigError::Parse(_))));
}

#[test]
fn oversized_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    let path = write(dir.path(), "big.toml", &padding);

    let err = GateConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("size limit"));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn zero_data_plan_limit_is_invalid() {
    let config: GateConfig = toml::from_str("[data_plan]\nmax_bytes = 0\n").unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn blank_data_plan_path_is_invalid() {
    let config: GateConfig = toml::from_str("[data_plan]\npath = \"  \"\n").unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("data_plan.path must be non-empty"));
}

#[test]
fn blank_log_filter_is_invalid() {
    let config: GateConfig = toml::from_str("[logging]\nfilter = \"\"\n").unwrap();

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

// ============================================================================
// SECTION: Data Plan Files
// ============================================================================

#[test]
fn data_plan_larger_than_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "plan.json", &sample_plan());

    let err = read_data_plan(&path, 16).unwrap_err();
    assert!(err.to_string().contains("exceeds size limit"));
}

#[test]
fn malformed_data_plan_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "plan.json", "{\"dtpn\": [");

    assert!(matches!(read_data_plan(&path, 1024), Err(ConfigError::DataPlan(_))));
}
