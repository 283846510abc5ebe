//! Platform locations of configuration files.

use crate::settings::PACKAGE;
use std::path::PathBuf;

/// Global config file: `$XDG_CONFIG_HOME/estat/config.toml`, falling back
/// to `$HOME/.config/estat/config.toml`. `None` without either variable.
pub fn global_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join(PACKAGE).join("config.toml"))
}
