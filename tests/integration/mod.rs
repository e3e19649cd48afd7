//! Integration tests for the Cosmos DB emulator builder

mod builder_lifecycle;
mod config_integration;
mod connection_string;
mod test_utils;
