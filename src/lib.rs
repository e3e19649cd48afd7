//! cosmos-testcontainer: ephemeral Azure Cosmos DB emulators for integration tests
//!
//! Launch parameters are composed from immutable, mergeable configuration layers;
//! `build()` starts the emulator through a [`runtime::ContainerRuntime`] and only
//! returns once the emulator's output shows it has started.

pub mod cli;
pub mod config;
pub mod container;
pub mod cosmos;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod wait;

pub use container::ContainerBuilder;
pub use cosmos::{CosmosDbBuilder, CosmosDbConfiguration, CosmosDbContainer};
pub use error::{BuildError, ConfigError, RuntimeError};
