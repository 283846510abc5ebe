//! Workspace config files: `config/config.toml`, then the file of the
//! selected environment, `config/{ESTAT_ENV}.toml`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Variable selecting the environment file.
pub const ENV_SELECTOR: &str = "ESTAT_ENV";

/// Environment used when `ESTAT_ENV` is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

const BASE_FILE: &str = "config";

/// Name of the selected environment.
///
/// The name becomes a file stem, so it must be a plain identifier: no path
/// separators, no dots, and not the base file's own name.
pub fn environment_name() -> Result<String, ConfigError> {
    let name = match std::env::var(ENV_SELECTOR) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => return Ok(DEFAULT_ENVIRONMENT.to_string()),
    };
    let plain = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !plain || name == BASE_FILE {
        return Err(ConfigError::Message(format!(
            "{}='{}' does not name a config environment",
            ENV_SELECTOR, name
        )));
    }
    Ok(name)
}

/// Existing workspace config files, lowest precedence first.
pub fn workspace_files(workspace_root: &Path, environment: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [BASE_FILE, environment]
        .iter()
        .map(|stem| config_dir.join(format!("{}.toml", stem)))
        .filter(|path| path.is_file())
        .collect()
}

/// Add the workspace config files to the builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let environment = environment_name()?;
    let files = workspace_files(workspace_root, &environment);
    debug!(
        environment = %environment,
        files = files.len(),
        "Workspace configuration files selected"
    );

    Ok(files.into_iter().fold(builder, |builder, path| {
        builder.add_source(File::from(path).required(true))
    }))
}
