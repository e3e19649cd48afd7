//! Azure Cosmos DB Emulator
//!
//! Builder, configuration and launch handle for the Cosmos DB emulator image.
//!
//! ```rust,ignore
//! use cosmos_testcontainer::cosmos::CosmosDbBuilder;
//! use cosmos_testcontainer::container::ContainerBuilder;
//! use cosmos_testcontainer::runtime::DockerCli;
//! use std::sync::Arc;
//!
//! let container = CosmosDbBuilder::new()
//!     .with_database("orders")
//!     .with_port(8082)
//!     .build(Arc::new(DockerCli::default()))
//!     .await?;
//! let connection_string = container.connection_string();
//! ```

mod builder;
mod configuration;
mod container;

pub use builder::CosmosDbBuilder;
pub use configuration::CosmosDbConfiguration;
pub use container::CosmosDbContainer;

pub const COSMOS_DB_IMAGE: &str = "mcr.microsoft.com/cosmosdb/linux/azure-cosmos-emulator:latest";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_DATABASE_NAME: &str = "default";
pub const DEFAULT_PARTITION_COUNT: u32 = 2;

/// Well-known account key every Cosmos DB emulator accepts
pub const EMULATOR_ACCOUNT_KEY: &str =
    "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU9DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

pub const DATABASE_ENV: &str = "AZURE_COSMOS_EMULATOR_DATABASE";
pub const PARTITION_COUNT_ENV: &str = "AZURE_COSMOS_EMULATOR_PARTITION_COUNT";
pub const ARGS_ENV: &str = "AZURE_COSMOS_EMULATOR_ARGS";

/// Output the emulator prints once it accepts connections
pub const STARTED_MARKERS: &[&str] = &["Started"];

/// Emulator startup argument selecting the listening port
pub fn port_argument(port: u16) -> String {
    format!("/Port={}", port)
}
