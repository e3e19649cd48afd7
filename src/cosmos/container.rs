//! Launch handle for a started, ready emulator.

use crate::container::LaunchSpec;
use crate::cosmos::configuration::CosmosDbConfiguration;
use crate::error::RuntimeError;
use crate::runtime::{ContainerId, ContainerLogs, ContainerRuntime};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A running Cosmos DB emulator that has reported readiness
pub struct CosmosDbContainer {
    runtime: Arc<dyn ContainerRuntime>,
    id: ContainerId,
    host: String,
    configuration: CosmosDbConfiguration,
    launch_spec: LaunchSpec,
    started_at: DateTime<Utc>,
}

impl std::fmt::Debug for CosmosDbContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosDbContainer")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("launch_spec", &self.launch_spec)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl CosmosDbContainer {
    pub(crate) fn new(
        runtime: Arc<dyn ContainerRuntime>,
        id: ContainerId,
        configuration: CosmosDbConfiguration,
        launch_spec: LaunchSpec,
        started_at: DateTime<Utc>,
    ) -> Self {
        let host = runtime.host();
        Self {
            runtime,
            id,
            host,
            configuration,
            launch_spec,
            started_at,
        }
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    pub fn hostname(&self) -> &str {
        &self.host
    }

    pub fn configuration(&self) -> &CosmosDbConfiguration {
        &self.configuration
    }

    pub fn launch_spec(&self) -> &LaunchSpec {
        &self.launch_spec
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Host port the emulator endpoint is published on
    pub fn port(&self) -> u16 {
        // A built configuration always carries a port; the launch spec binds it.
        let port = self.configuration.port().unwrap_or_default();
        self.launch_spec.host_port(port).unwrap_or(port)
    }

    /// `AccountEndpoint=https://<host>:<port>;AccountKey=<key>`
    pub fn connection_string(&self) -> String {
        format!(
            "AccountEndpoint=https://{}:{};AccountKey={}",
            self.host,
            self.port(),
            self.configuration.credential().unwrap_or_default()
        )
    }

    pub async fn logs(&self, timestamps: bool) -> Result<ContainerLogs, RuntimeError> {
        self.runtime.logs(&self.id, timestamps).await
    }

    /// Stop and remove the container, consuming the handle.
    pub async fn stop(self) -> Result<(), RuntimeError> {
        self.runtime.stop(&self.id).await
    }
}
