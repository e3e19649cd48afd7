//! CLI route: single route table and run context.

use crate::cli::parse::{BuilderOverrides, Commands};
use crate::config::{ConfigLoader, EmulatorSettings};
use crate::container::ContainerBuilder;
use crate::cosmos::CosmosDbBuilder;
use crate::runtime::ContainerRuntime;
use anyhow::{anyhow, Context, Result};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Runtime context for CLI execution: resolved settings.
pub struct RunContext {
    settings: EmulatorSettings,
}

impl RunContext {
    /// Load and validate settings from an explicit file or the workspace.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let settings = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        settings.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow!("Configuration validation failed:\n{}", error_msgs.join("\n"))
        })?;

        Ok(Self { settings })
    }

    pub fn from_settings(settings: EmulatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EmulatorSettings {
        &self.settings
    }

    /// Builder seeded from settings with command-line overrides applied last.
    pub fn builder(&self, overrides: &BuilderOverrides) -> CosmosDbBuilder {
        let mut builder = CosmosDbBuilder::from_settings(&self.settings);
        if let Some(database) = &overrides.database {
            builder = builder.with_database(database.clone());
        }
        if let Some(port) = overrides.port {
            builder = builder.with_port(port);
        }
        if let Some(partition_count) = overrides.partition_count {
            builder = builder.with_partition_count(partition_count);
        }
        if let Some(name) = &overrides.name {
            builder = builder.with_name(name.clone());
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            let strategy = self
                .settings
                .readiness
                .wait_strategy()
                .with_timeout(Duration::from_secs(timeout_secs));
            builder = builder.with_wait_strategy(strategy);
        }
        builder
    }

    pub async fn execute(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::Plan { overrides } => {
                let spec = self.builder(overrides).plan()?;
                Ok(serde_json::to_string_pretty(&spec)?)
            }
            Commands::Up { overrides, detach } => {
                let runtime: Arc<dyn ContainerRuntime> = Arc::new(self.settings.runtime.docker());
                self.up(overrides, runtime, *detach, tokio::signal::ctrl_c())
                    .await
            }
            Commands::Config => {
                toml::to_string_pretty(&self.settings).context("Failed to render settings")
            }
        }
    }

    /// Build the emulator; unless detached, keep it until `shutdown` resolves.
    ///
    /// The container is stopped whether `shutdown` resolves or fails.
    async fn up<F>(
        &self,
        overrides: &BuilderOverrides,
        runtime: Arc<dyn ContainerRuntime>,
        detach: bool,
        shutdown: F,
    ) -> Result<String>
    where
        F: Future<Output = std::io::Result<()>> + Send,
    {
        let container = self.builder(overrides).build(runtime).await?;
        let connection_string = container.connection_string();

        if detach {
            return Ok(format!("{}\n{}", container.id(), connection_string));
        }

        println!("{}", connection_string);
        info!(container = %container.id(), "Waiting for Ctrl-C");
        let signal = shutdown.await;

        let id = container.id().clone();
        let stopped = container.stop().await;
        if let Err(e) = signal {
            if let Err(stop_err) = &stopped {
                warn!(container = %id, error = %stop_err, "Failed to stop container after signal failure");
            }
            return Err(e).context("Failed to listen for Ctrl-C");
        }
        stopped?;
        Ok(format!("Stopped {}", id))
    }
}
