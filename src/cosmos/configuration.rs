//! Cosmos DB emulator configuration.

use crate::container::{
    combine, ContainerConfiguration, LaunchSpec, PortBinding, ResourceConfiguration,
};
use crate::cosmos::{
    port_argument, ARGS_ENV, COSMOS_DB_IMAGE, DATABASE_ENV, DEFAULT_DATABASE_NAME,
    DEFAULT_PARTITION_COUNT, DEFAULT_PORT, PARTITION_COUNT_ENV,
};
use crate::error::BuildError;
use crate::wait::WaitStrategy;

/// Immutable launch parameters for one emulator container.
///
/// Every field is optional: `None` means "not set by this layer". Layers are
/// combined with [`ResourceConfiguration::merge`], where the newer layer wins
/// field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CosmosDbConfiguration {
    port: Option<u16>,
    database: Option<String>,
    partition_count: Option<u32>,
    credential: Option<String>,
    container: ContainerConfiguration,
}

impl CosmosDbConfiguration {
    pub fn new(
        port: Option<u16>,
        database: Option<String>,
        partition_count: Option<u32>,
        credential: Option<String>,
    ) -> Self {
        Self {
            port,
            database,
            partition_count,
            credential,
            container: ContainerConfiguration::default(),
        }
    }

    /// Fully populated base layer: a build on top of it needs no overrides.
    ///
    /// Carries the launch side effects of the typed defaults as well: the
    /// default port binding, the emulator environment and the wait strategy.
    pub fn emulator_defaults(credential: impl Into<String>) -> Self {
        let container = [
            ContainerConfiguration::with_image(COSMOS_DB_IMAGE),
            ContainerConfiguration::with_port_binding(DEFAULT_PORT, DEFAULT_PORT),
            ContainerConfiguration::with_environment(ARGS_ENV, port_argument(DEFAULT_PORT)),
            ContainerConfiguration::with_environment(DATABASE_ENV, DEFAULT_DATABASE_NAME),
            ContainerConfiguration::with_environment(
                PARTITION_COUNT_ENV,
                DEFAULT_PARTITION_COUNT.to_string(),
            ),
            ContainerConfiguration::with_wait_strategy(WaitStrategy::default()),
        ]
        .iter()
        .fold(ContainerConfiguration::default(), |acc, layer| {
            ContainerConfiguration::merge(&acc, layer)
        });

        Self {
            port: Some(DEFAULT_PORT),
            database: Some(DEFAULT_DATABASE_NAME.to_string()),
            partition_count: Some(DEFAULT_PARTITION_COUNT),
            credential: Some(credential.into()),
            container,
        }
    }

    /// Copy of this configuration without the binding for `container_port`.
    ///
    /// Merging only ever adds bindings, so a port override retires the binding
    /// of the port it replaces through this.
    pub fn without_port_binding(&self, container_port: u16) -> Self {
        let mut configuration = self.clone();
        configuration.container.port_bindings.remove(&container_port);
        configuration
    }

    pub fn with_port(port: u16) -> Self {
        Self {
            port: Some(port),
            ..Default::default()
        }
    }

    pub fn with_database(database: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            ..Default::default()
        }
    }

    pub fn with_partition_count(partition_count: u32) -> Self {
        Self {
            partition_count: Some(partition_count),
            ..Default::default()
        }
    }

    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
            ..Default::default()
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn partition_count(&self) -> Option<u32> {
        self.partition_count
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Render the launch request.
    ///
    /// The emulator environment is rendered from the typed fields here, so it
    /// always agrees with what the launch handle reports.
    pub fn launch_spec(&self) -> Result<LaunchSpec, BuildError> {
        self.validate()?;
        let port = self.port.ok_or_else(|| BuildError::missing("port"))?;
        let database = self
            .database
            .clone()
            .ok_or_else(|| BuildError::missing("database"))?;
        let partition_count = self
            .partition_count
            .ok_or_else(|| BuildError::missing("partition_count"))?;

        let mut spec = self.container.launch_spec()?;
        spec.environment.insert(DATABASE_ENV.to_string(), database);
        spec.environment
            .insert(PARTITION_COUNT_ENV.to_string(), partition_count.to_string());
        spec.environment
            .insert(ARGS_ENV.to_string(), port_argument(port));
        if spec.host_port(port).is_none() {
            spec.port_bindings.push(PortBinding {
                container_port: port,
                host_port: port,
            });
            spec.port_bindings.sort_by_key(|b| b.container_port);
        }
        Ok(spec)
    }
}

fn require_text(value: Option<&str>, field: &'static str) -> Result<(), BuildError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(BuildError::missing(field)),
    }
}

impl ResourceConfiguration for CosmosDbConfiguration {
    fn merge(old: &Self, new: &Self) -> Self {
        Self {
            port: combine(&old.port, &new.port),
            database: combine(&old.database, &new.database),
            partition_count: combine(&old.partition_count, &new.partition_count),
            credential: combine(&old.credential, &new.credential),
            container: ContainerConfiguration::merge(&old.container, &new.container),
        }
    }

    fn validate(&self) -> Result<(), BuildError> {
        self.container.validate()?;
        require_text(self.database.as_deref(), "database")?;
        if self.port.is_none() {
            return Err(BuildError::missing("port"));
        }
        if self.partition_count.is_none() {
            return Err(BuildError::missing("partition_count"));
        }
        require_text(self.credential.as_deref(), "credential")
    }

    fn container(&self) -> &ContainerConfiguration {
        &self.container
    }

    fn from_container(container: ContainerConfiguration) -> Self {
        Self {
            container,
            ..Default::default()
        }
    }
}
