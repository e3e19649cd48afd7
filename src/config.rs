//! Settings System
//!
//! Layered settings for the emulator tooling: built-in defaults, a user-level file,
//! workspace files and environment overrides, merged by the `config` crate and
//! deserialized into [`EmulatorSettings`]. These settings seed
//! [`CosmosDbBuilder::from_settings`](crate::cosmos::CosmosDbBuilder::from_settings),
//! pick the container runtime, and configure logging.

use crate::cosmos::{COSMOS_DB_IMAGE, DEFAULT_DATABASE_NAME, DEFAULT_PARTITION_COUNT, DEFAULT_PORT};
use crate::logging::LoggingConfig;
use crate::runtime::docker::{DockerCli, DEFAULT_DOCKER_BINARY};
use crate::wait::{MarkerMatch, WaitStrategy, DEFAULT_POLL_INTERVAL, DEFAULT_STARTUP_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmulatorSettings {
    /// Builder defaults
    #[serde(default)]
    pub emulator: EmulatorDefaults,

    /// Readiness polling
    #[serde(default)]
    pub readiness: ReadinessConfig,

    /// Container runtime selection
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied to every builder created from settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorDefaults {
    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_partition_count")]
    pub partition_count: u32,

    /// Fixed container name (unset lets the runtime pick one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn default_image() -> String {
    COSMOS_DB_IMAGE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}

fn default_partition_count() -> u32 {
    DEFAULT_PARTITION_COUNT
}

impl Default for EmulatorDefaults {
    fn default() -> Self {
        Self {
            image: default_image(),
            port: default_port(),
            database: default_database(),
            partition_count: default_partition_count(),
            name: None,
        }
    }
}

/// Readiness polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub marker_match: MarkerMatch,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_STARTUP_TIMEOUT.as_secs()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            marker_match: MarkerMatch::default(),
        }
    }
}

impl ReadinessConfig {
    pub fn wait_strategy(&self) -> WaitStrategy {
        WaitStrategy::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
            .with_marker_match(self.marker_match)
    }
}

/// Container runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Docker-compatible client binary (docker, podman, ...)
    #[serde(default = "default_docker_binary")]
    pub docker_binary: String,

    /// Hostname published ports are reachable on
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_docker_binary() -> String {
    DEFAULT_DOCKER_BINARY.to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            docker_binary: default_docker_binary(),
            host: default_host(),
        }
    }
}

impl RuntimeConfig {
    pub fn docker(&self) -> DockerCli {
        DockerCli::new(self.docker_binary.clone(), self.host.clone())
    }
}

/// Settings validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Emulator(String),
    Readiness(String),
    Runtime(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Emulator(msg) => write!(f, "Emulator: {}", msg),
            ValidationError::Readiness(msg) => write!(f, "Readiness: {}", msg),
            ValidationError::Runtime(msg) => write!(f, "Runtime: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EmulatorSettings {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.emulator.image.trim().is_empty() {
            errors.push(ValidationError::Emulator("image cannot be empty".to_string()));
        }
        if self.emulator.database.trim().is_empty() {
            errors.push(ValidationError::Emulator(
                "database cannot be empty".to_string(),
            ));
        }
        if self.emulator.port == 0 {
            errors.push(ValidationError::Emulator("port cannot be 0".to_string()));
        }
        if self.emulator.partition_count == 0 {
            errors.push(ValidationError::Emulator(
                "partition_count must be at least 1".to_string(),
            ));
        }

        if self.readiness.timeout_secs == 0 {
            errors.push(ValidationError::Readiness(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.readiness.poll_interval_ms == 0 {
            errors.push(ValidationError::Readiness(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }

        if self.runtime.docker_binary.trim().is_empty() {
            errors.push(ValidationError::Runtime(
                "docker_binary cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
