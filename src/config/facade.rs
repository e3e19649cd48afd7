//! Settings loader: assembles sources in merge-policy order and deserializes them.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::EmulatorSettings;
use crate::error::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`EmulatorSettings`] from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for a workspace: defaults, global file, workspace files, environment.
    pub fn load(workspace_root: &Path) -> Result<EmulatorSettings, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let settings: EmulatorSettings = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load settings from one explicit file; environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<EmulatorSettings, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?.add_source(File::from(path));
        let builder = environment::add_to_builder(builder);

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Location of the user-level settings file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
