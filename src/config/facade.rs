//! Loading entry points: layered sources in precedence order.

use super::merge::merge_policy;
use super::paths;
use super::sources::{environment, global_file, workspace_file};
use super::EstatConfig;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`EstatConfig`] from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Sources, lowest precedence first: built-in defaults, the global
    /// config file, `config/config.toml`, `config/{ESTAT_ENV}.toml`, then
    /// `ESTAT__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<EstatConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: EstatConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            version = %config.api.version,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<EstatConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the global config file, if it can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        paths::global_config_path()
    }
}
