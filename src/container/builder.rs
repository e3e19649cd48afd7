//! Builder interface shared by emulator modules.

use crate::container::configuration::{ContainerConfiguration, ResourceConfiguration};
use crate::error::BuildError;
use crate::runtime::ContainerRuntime;
use crate::wait::WaitStrategy;
use async_trait::async_trait;
use std::sync::Arc;

/// Functional builder over a concrete configuration and launch-handle type.
///
/// Every `with_*` call returns a new builder holding
/// `merge(current, delta)`; the receiver is left untouched, so a builder can be
/// branched freely.
#[async_trait]
pub trait ContainerBuilder: Sized + Send + Sync {
    type Configuration: ResourceConfiguration;
    type Container: Send;

    fn configuration(&self) -> &Self::Configuration;

    fn from_configuration(configuration: Self::Configuration) -> Self;

    fn merge(&self, delta: &Self::Configuration) -> Self {
        Self::from_configuration(Self::Configuration::merge(self.configuration(), delta))
    }

    fn merge_container(&self, delta: ContainerConfiguration) -> Self {
        self.merge(&Self::Configuration::from_container(delta))
    }

    fn with_image(&self, image: impl Into<String>) -> Self {
        self.merge_container(ContainerConfiguration::with_image(image))
    }

    fn with_name(&self, name: impl Into<String>) -> Self {
        self.merge_container(ContainerConfiguration::with_name(name))
    }

    fn with_environment(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.merge_container(ContainerConfiguration::with_environment(key, value))
    }

    fn with_port_binding(&self, container_port: u16, host_port: u16) -> Self {
        self.merge_container(ContainerConfiguration::with_port_binding(
            container_port,
            host_port,
        ))
    }

    fn with_wait_strategy(&self, wait_strategy: WaitStrategy) -> Self {
        self.merge_container(ContainerConfiguration::with_wait_strategy(wait_strategy))
    }

    fn validate(&self) -> Result<(), BuildError> {
        self.configuration().validate()
    }

    /// Validate, start, wait for readiness, and hand back the launch handle.
    async fn build(self, runtime: Arc<dyn ContainerRuntime>) -> Result<Self::Container, BuildError>;
}
