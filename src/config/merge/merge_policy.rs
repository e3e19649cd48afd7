//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered in this order, later ones overriding earlier ones key by key:
//! built-in defaults, global file, workspace file, workspace env file, environment.

use crate::cosmos::{COSMOS_DB_IMAGE, DEFAULT_DATABASE_NAME, DEFAULT_PARTITION_COUNT, DEFAULT_PORT};
use crate::runtime::docker::DEFAULT_DOCKER_BINARY;
use crate::wait::{DEFAULT_POLL_INTERVAL, DEFAULT_STARTUP_TIMEOUT};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("emulator.image", COSMOS_DB_IMAGE)?
        .set_default("emulator.port", i64::from(DEFAULT_PORT))?
        .set_default("emulator.database", DEFAULT_DATABASE_NAME)?
        .set_default("emulator.partition_count", i64::from(DEFAULT_PARTITION_COUNT))?
        .set_default("readiness.timeout_secs", DEFAULT_STARTUP_TIMEOUT.as_secs() as i64)?
        .set_default(
            "readiness.poll_interval_ms",
            DEFAULT_POLL_INTERVAL.as_millis() as i64,
        )?
        .set_default("readiness.marker_match", "exact")?
        .set_default("runtime.docker_binary", DEFAULT_DOCKER_BINARY)?
        .set_default("runtime.host", "localhost")
}
