//! CLI domain: parse and route only.
//! No domain orchestration; the route table dispatches to the builder.

mod parse;
mod route;

pub use parse::{BuilderOverrides, Cli, Commands};
pub use route::RunContext;
