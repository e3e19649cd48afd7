//! Docker CLI runtime: drives `docker run/logs/stop/rm` through `tokio::process`.

use crate::container::LaunchSpec;
use crate::error::RuntimeError;
use crate::runtime::{ContainerId, ContainerLogs, ContainerRuntime};
use async_trait::async_trait;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const DEFAULT_DOCKER_BINARY: &str = "docker";

/// Runtime backed by the `docker` command line client
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
    host: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_DOCKER_BINARY, "localhost")
    }
}

impl DockerCli {
    pub fn new(binary: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            host: host.into(),
        }
    }

    async fn run(&self, args: &[String]) -> Result<Output, RuntimeError> {
        debug!(binary = %self.binary, ?args, "Invoking container runtime");
        let output = Command::new(&self.binary).args(args).output().await?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(RuntimeError::CommandFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Arguments for `docker run` that start `spec` detached
pub fn run_args(spec: &LaunchSpec) -> Vec<String> {
    let mut args = vec!["run".to_string(), "-d".to_string()];

    if let Some(name) = &spec.name {
        args.push("--name".to_string());
        args.push(name.clone());
    }

    for (key, value) in &spec.environment {
        args.push("-e".to_string());
        args.push(format!("{}={}", key, value));
    }

    for binding in &spec.port_bindings {
        args.push("-p".to_string());
        args.push(format!("{}:{}", binding.host_port, binding.container_port));
    }

    args.push(spec.image.clone());
    args
}

/// Arguments for `docker logs`
pub fn logs_args(id: &ContainerId, timestamps: bool) -> Vec<String> {
    let mut args = vec!["logs".to_string()];
    if timestamps {
        args.push("--timestamps".to_string());
    }
    args.push(id.to_string());
    args
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn start(&self, spec: &LaunchSpec) -> Result<ContainerId, RuntimeError> {
        let output = self.run(&run_args(spec)).await?;
        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(RuntimeError::InvalidOutput(
                "docker run did not print a container id".to_string(),
            ));
        }
        info!(container = %id, image = %spec.image, "Container started");
        Ok(ContainerId::new(id))
    }

    async fn stop(&self, id: &ContainerId) -> Result<(), RuntimeError> {
        // rm -f runs even when stop fails; the first failure is reported
        let stopped = self.run(&["stop".to_string(), id.to_string()]).await;
        if let Err(e) = &stopped {
            warn!(container = %id, error = %e, "docker stop failed, forcing removal");
        }
        let removed = self
            .run(&["rm".to_string(), "-f".to_string(), id.to_string()])
            .await;
        stopped?;
        removed?;
        info!(container = %id, "Container stopped");
        Ok(())
    }

    async fn logs(&self, id: &ContainerId, timestamps: bool) -> Result<ContainerLogs, RuntimeError> {
        let output = self.run(&logs_args(id, timestamps)).await?;
        Ok(ContainerLogs {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn host(&self) -> String {
        self.host.clone()
    }
}
