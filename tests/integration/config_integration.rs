//! Integration tests for settings feeding the builder.

use cosmos_testcontainer::config::ConfigLoader;
use cosmos_testcontainer::container::{ContainerBuilder, ResourceConfiguration};
use cosmos_testcontainer::cosmos::{ARGS_ENV, DATABASE_ENV, PARTITION_COUNT_ENV};
use cosmos_testcontainer::wait::MarkerMatch;
use cosmos_testcontainer::CosmosDbBuilder;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_settings_file_seeds_builder() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("settings.toml");

    std::fs::write(
        &config_file,
        r#"
[emulator]
image = "registry.local/cosmos-emulator:test"
database = "inventory"
port = 9443
partition_count = 6
name = "cosmos-it"

[readiness]
timeout_secs = 30
poll_interval_ms = 500
marker_match = "contains"
"#,
    )
    .unwrap();

    let settings = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(settings.validate().is_ok());

    let builder = CosmosDbBuilder::from_settings(&settings);
    let spec = builder.plan().unwrap();
    assert_eq!(spec.image, "registry.local/cosmos-emulator:test");
    assert_eq!(spec.name.as_deref(), Some("cosmos-it"));
    assert_eq!(spec.env(DATABASE_ENV), Some("inventory"));
    assert_eq!(spec.env(PARTITION_COUNT_ENV), Some("6"));
    assert_eq!(spec.env(ARGS_ENV), Some("/Port=9443"));
    assert_eq!(spec.host_port(9443), Some(9443));

    let wait = builder
        .configuration()
        .container()
        .wait_strategy_or_default();
    assert_eq!(wait.timeout, Duration::from_secs(30));
    assert_eq!(wait.poll_interval, Duration::from_millis(500));
    assert_eq!(wait.marker_match, MarkerMatch::Contains);
}

#[test]
fn test_caller_overrides_beat_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("settings.toml");
    std::fs::write(&config_file, "[emulator]\ndatabase = \"from-file\"\n").unwrap();

    let settings = ConfigLoader::load_from_file(&config_file).unwrap();
    let spec = CosmosDbBuilder::from_settings(&settings)
        .with_database("from-caller")
        .plan()
        .unwrap();

    assert_eq!(spec.env(DATABASE_ENV), Some("from-caller"));
}

#[test]
fn test_invalid_settings_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("settings.toml");
    std::fs::write(
        &config_file,
        "[emulator]\ndatabase = \"\"\n\n[readiness]\ntimeout_secs = 0\n",
    )
    .unwrap();

    let settings = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = settings.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}
