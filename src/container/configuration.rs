//! Container configuration and the right-biased merge contract.

use crate::container::launch::{LaunchSpec, PortBinding};
use crate::error::BuildError;
use crate::wait::WaitStrategy;
use std::collections::BTreeMap;

/// Immutable configuration that can be merged with a newer delta and validated
/// before launch.
///
/// `merge(old, new)` must be pure and right-biased: every field set in `new`
/// wins, every unset field falls back to `old`. `Default` is the empty delta and
/// therefore the identity of `merge`.
pub trait ResourceConfiguration: Clone + Default + Send + Sync {
    fn merge(old: &Self, new: &Self) -> Self;

    fn validate(&self) -> Result<(), BuildError>;

    /// Generic launch parameters carried by this configuration
    fn container(&self) -> &ContainerConfiguration;

    /// Delta that only carries generic launch parameters
    fn from_container(container: ContainerConfiguration) -> Self;
}

/// Newer value if set, else the older one.
pub fn combine<T: Clone>(old: &Option<T>, new: &Option<T>) -> Option<T> {
    new.as_ref().or(old.as_ref()).cloned()
}

/// Key-wise union; entries in `new` replace entries in `old`.
pub fn combine_map<K: Ord + Clone, V: Clone>(
    old: &BTreeMap<K, V>,
    new: &BTreeMap<K, V>,
) -> BTreeMap<K, V> {
    let mut merged = old.clone();
    merged.extend(new.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Launch parameters common to all containers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerConfiguration {
    pub image: Option<String>,
    pub name: Option<String>,
    pub environment: BTreeMap<String, String>,
    /// Container port to host port
    pub port_bindings: BTreeMap<u16, u16>,
    pub wait_strategy: Option<WaitStrategy>,
}

impl ContainerConfiguration {
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_environment(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut environment = BTreeMap::new();
        environment.insert(key.into(), value.into());
        Self {
            environment,
            ..Default::default()
        }
    }

    pub fn with_port_binding(container_port: u16, host_port: u16) -> Self {
        let mut port_bindings = BTreeMap::new();
        port_bindings.insert(container_port, host_port);
        Self {
            port_bindings,
            ..Default::default()
        }
    }

    pub fn with_wait_strategy(wait_strategy: WaitStrategy) -> Self {
        Self {
            wait_strategy: Some(wait_strategy),
            ..Default::default()
        }
    }

    /// Wait strategy to use at build time, falling back to the default one
    pub fn wait_strategy_or_default(&self) -> WaitStrategy {
        self.wait_strategy.clone().unwrap_or_default()
    }

    /// Render the launch request; fails when no image is configured.
    pub fn launch_spec(&self) -> Result<LaunchSpec, BuildError> {
        self.validate()?;
        Ok(LaunchSpec {
            image: self.image.clone().unwrap_or_default(),
            name: self.name.clone(),
            environment: self.environment.clone(),
            port_bindings: self
                .port_bindings
                .iter()
                .map(|(&container_port, &host_port)| PortBinding {
                    container_port,
                    host_port,
                })
                .collect(),
        })
    }
}

impl ResourceConfiguration for ContainerConfiguration {
    fn merge(old: &Self, new: &Self) -> Self {
        Self {
            image: combine(&old.image, &new.image),
            name: combine(&old.name, &new.name),
            environment: combine_map(&old.environment, &new.environment),
            port_bindings: combine_map(&old.port_bindings, &new.port_bindings),
            wait_strategy: combine(&old.wait_strategy, &new.wait_strategy),
        }
    }

    fn validate(&self) -> Result<(), BuildError> {
        match self.image.as_deref() {
            Some(image) if !image.trim().is_empty() => Ok(()),
            _ => Err(BuildError::missing("image")),
        }
    }

    fn container(&self) -> &ContainerConfiguration {
        self
    }

    fn from_container(container: ContainerConfiguration) -> Self {
        container
    }
}
