//! Workspace settings files: `config/config.toml`, then the active profile's
//! `config/<profile>.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selects the profile file; unset or blank means [`DEFAULT_PROFILE`].
pub const ENV_NAME_VAR: &str = "COSMOS_EMULATOR_ENV";
pub const DEFAULT_PROFILE: &str = "development";
const CONFIG_DIR: &str = "config";
const BASE_FILE: &str = "config.toml";

/// Active settings profile.
pub fn profile() -> String {
    resolve_profile(std::env::var(ENV_NAME_VAR).ok())
}

fn resolve_profile(value: Option<String>) -> String {
    value
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Workspace settings files that exist, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path, profile: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join(CONFIG_DIR);
    let mut files: Vec<PathBuf> = [
        config_dir.join(BASE_FILE),
        config_dir.join(format!("{}.toml", profile)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect();
    // a profile named "config" points back at the base file
    files.dedup();
    files
}

/// Layer the workspace files onto `builder`, base file first.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let profile = profile();
    let files = workspace_config_files(workspace_root, &profile);
    if files.is_empty() {
        debug!(workspace = %workspace_root.display(), %profile, "No workspace configuration files");
    }

    Ok(files.iter().fold(builder, |builder, path| {
        debug!(config_path = %path.display(), %profile, "Adding workspace configuration file");
        builder.add_source(File::from(path.as_path()))
    }))
}
