//! Cosmos DB emulator builder.

use crate::config::EmulatorSettings;
use crate::container::{ContainerBuilder, LaunchSpec, ResourceConfiguration};
use crate::cosmos::configuration::CosmosDbConfiguration;
use crate::cosmos::container::CosmosDbContainer;
use crate::cosmos::{
    port_argument, ARGS_ENV, DATABASE_ENV, EMULATOR_ACCOUNT_KEY, PARTITION_COUNT_ENV,
    STARTED_MARKERS,
};
use crate::error::BuildError;
use crate::runtime::ContainerRuntime;
use crate::wait::ReadinessPoller;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builder for [`CosmosDbContainer`]
#[derive(Debug, Clone, PartialEq)]
pub struct CosmosDbBuilder {
    configuration: CosmosDbConfiguration,
}

impl Default for CosmosDbBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmosDbBuilder {
    /// Builder preloaded with the emulator defaults and the well-known account key.
    pub fn new() -> Self {
        Self::with_account_key(EMULATOR_ACCOUNT_KEY)
    }

    /// Same defaults as [`CosmosDbBuilder::new`] with a different account key.
    pub fn with_account_key(account_key: impl Into<String>) -> Self {
        Self::from_configuration(CosmosDbConfiguration::emulator_defaults(account_key))
    }

    /// Defaults from loaded settings, applied on top of the built-in ones.
    pub fn from_settings(settings: &EmulatorSettings) -> Self {
        let emulator = &settings.emulator;
        let builder = Self::new()
            .with_image(emulator.image.clone())
            .with_port(emulator.port)
            .with_database(emulator.database.clone())
            .with_partition_count(emulator.partition_count)
            .with_wait_strategy(settings.readiness.wait_strategy());
        match &emulator.name {
            Some(name) => builder.with_name(name.clone()),
            None => builder,
        }
    }

    pub fn with_database(&self, database: impl Into<String>) -> Self {
        let database = database.into();
        self.merge(&CosmosDbConfiguration::with_database(database.clone()))
            .with_environment(DATABASE_ENV, database)
    }

    /// Move the emulator to `port`.
    ///
    /// The identity binding of the previous port is retired; a binding the
    /// caller remapped to another host port is kept.
    pub fn with_port(&self, port: u16) -> Self {
        let configuration = &self.configuration;
        let base = match configuration.port() {
            Some(previous)
                if previous != port
                    && configuration.container().port_bindings.get(&previous)
                        == Some(&previous) =>
            {
                Self::from_configuration(configuration.without_port_binding(previous))
            }
            _ => self.clone(),
        };
        base.merge(&CosmosDbConfiguration::with_port(port))
            .with_port_binding(port, port)
            .with_environment(ARGS_ENV, port_argument(port))
    }

    pub fn with_partition_count(&self, partition_count: u32) -> Self {
        self.merge(&CosmosDbConfiguration::with_partition_count(partition_count))
            .with_environment(PARTITION_COUNT_ENV, partition_count.to_string())
    }

    /// Validate and render the launch request without starting anything.
    pub fn plan(&self) -> Result<LaunchSpec, BuildError> {
        self.configuration.launch_spec()
    }
}

#[async_trait]
impl ContainerBuilder for CosmosDbBuilder {
    type Configuration = CosmosDbConfiguration;
    type Container = CosmosDbContainer;

    fn configuration(&self) -> &CosmosDbConfiguration {
        &self.configuration
    }

    fn from_configuration(configuration: CosmosDbConfiguration) -> Self {
        Self { configuration }
    }

    async fn build(self, runtime: Arc<dyn ContainerRuntime>) -> Result<CosmosDbContainer, BuildError> {
        let spec = self.plan()?;
        let wait_strategy = self.configuration.container().wait_strategy_or_default();
        debug!(image = %spec.image, ?wait_strategy, "Starting Cosmos DB emulator");

        let id = runtime
            .start(&spec)
            .await
            .map_err(BuildError::ProcessStartFailure)?;
        let started_at = Utc::now();

        let readiness = {
            let poller = ReadinessPoller::new(
                runtime.as_ref(),
                &id,
                STARTED_MARKERS,
                wait_strategy.marker_match,
            );
            wait_strategy.wait_until_ready(&poller).await
        };

        if let Err(e) = readiness {
            if let Err(stop_err) = runtime.stop(&id).await {
                warn!(container = %id, error = %stop_err, "Failed to stop container after readiness failure");
            }
            return Err(e);
        }

        info!(container = %id, "Cosmos DB emulator ready");
        Ok(CosmosDbContainer::new(
            runtime,
            id,
            self.configuration,
            spec,
            started_at,
        ))
    }
}
