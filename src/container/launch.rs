//! Fully resolved launch request handed to a [`ContainerRuntime`](crate::runtime::ContainerRuntime).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host port a container port is published on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    pub container_port: u16,
    pub host_port: u16,
}

/// Launch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub environment: BTreeMap<String, String>,
    pub port_bindings: Vec<PortBinding>,
}

impl LaunchSpec {
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// Host port bound to `container_port`, if any
    pub fn host_port(&self, container_port: u16) -> Option<u16> {
        self.port_bindings
            .iter()
            .find(|b| b.container_port == container_port)
            .map(|b| b.host_port)
    }
}
