//! Container Runtime Abstraction
//!
//! The process-lifecycle collaborator used by builders: start a container from a
//! resolved [`LaunchSpec`], read its output, and stop it. Builders never talk to a
//! container engine directly; they go through [`ContainerRuntime`].

use crate::container::LaunchSpec;
use crate::error::RuntimeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod docker;

pub use docker::DockerCli;

/// Identifier of a started container, as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        ContainerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a container's accumulated output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerLogs {
    pub stdout: String,
    pub stderr: String,
}

/// Process lifecycle collaborator
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Create and start a container, returning its id
    async fn start(&self, spec: &LaunchSpec) -> Result<ContainerId, RuntimeError>;

    /// Stop and remove a container
    async fn stop(&self, id: &ContainerId) -> Result<(), RuntimeError>;

    /// Non-blocking snapshot of everything the container has written so far
    async fn logs(&self, id: &ContainerId, timestamps: bool) -> Result<ContainerLogs, RuntimeError>;

    /// Hostname under which bound ports are reachable
    fn host(&self) -> String {
        "localhost".to_string()
    }
}
