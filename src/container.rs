//! Generic Container Model
//!
//! Launch parameters shared by every emulator module, the merge/validate contract
//! that concrete configurations implement, and the builder interface layered on top.
//! Concrete modules (see [`crate::cosmos`]) plug their own configuration and
//! launch-handle types into [`ContainerBuilder`].

mod builder;
mod configuration;
mod launch;

pub use builder::ContainerBuilder;
pub use configuration::{combine, combine_map, ContainerConfiguration, ResourceConfiguration};
pub use launch::{LaunchSpec, PortBinding};
