//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global → Local: REPLACE per field (only fields present in a file change)
//! - Any → Env vars: REPLACE (explicit user override, see config_env_test.rs)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use seqtree::config::{local_config_path, Settings};
use seqtree::domain::TraversalOrder;
use seqtree::util::testing;

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_dir_that_does_not_exist_when_load_then_layer_is_skipped() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone");

    // Act
    let settings = Settings::load(Some(missing.as_path())).expect("load settings");

    // Assert
    assert!(!local_config_path(&missing).exists());
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_load_then_overrides_only_given_fields() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
[retry]
max_attempts = 5

[traversal]
order = "breadth"
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.retry.max_attempts, 5);
    assert_eq!(settings.traversal.order, TraversalOrder::Breadth);
    assert_eq!(
        settings.tokenizer,
        Settings::default().tokenizer,
        "tokenizer untouched by local config"
    );
}

#[test]
fn given_custom_delimiters_when_load_then_tokenizer_uses_them() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[tokenizer]\ndelimiters = \";|\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.tokenizer().delimiters(), &[';', '|']);
}

#[test]
fn given_zero_attempts_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[retry]\nmax_attempts = 0\n",
    )
    .unwrap();

    let result = Settings::load(Some(dir.path()));

    let message = result.unwrap_err().to_string();
    assert!(message.contains("max_attempts"), "got: {message}");
}

#[test]
fn given_malformed_local_config_when_load_then_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[retry\nmax_attempts = ").unwrap();

    let result = Settings::load(Some(dir.path()));

    let message = result.unwrap_err().to_string();
    assert!(message.contains(".seqtree.toml"), "got: {message}");
}

#[test]
fn given_unknown_order_in_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[traversal]\norder = \"sideways\"\n",
    )
    .unwrap();

    assert!(Settings::load(Some(dir.path())).is_err());
}

#[test]
fn given_loaded_settings_when_building_invoker_then_uses_configured_budget() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[retry]\nmax_attempts = 2\n").unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings.retry_invoker().unwrap().max_attempts(), 2);
}

#[test]
fn given_template_when_written_as_local_config_then_loads_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}
