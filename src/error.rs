//! Error types for building and running emulator containers.

use crate::runtime::ContainerId;
use std::time::Duration;
use thiserror::Error;

/// Container runtime errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Runtime I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("Unexpected runtime output: {0}")]
    InvalidOutput(String),
}

/// Errors surfaced from `build()` and `plan()`
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Container {container} did not report readiness within {timeout:?}")]
    ReadinessTimeout {
        container: ContainerId,
        timeout: Duration,
    },

    #[error("Container failed to start: {0}")]
    ProcessStartFailure(#[source] RuntimeError),

    #[error("Container runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl BuildError {
    pub(crate) fn missing(field: &'static str) -> Self {
        BuildError::MissingRequiredField { field }
    }
}

/// Settings and logging configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}
