//! Integration tests for layered configuration loading

use estat::config::ConfigLoader;
use estat::settings::{ApiVersion, Format, Lang, Protocol};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

// Serializes tests that touch process environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: [&str; 5] = [
    "XDG_CONFIG_HOME",
    "HOME",
    "ESTAT_ENV",
    "ESTAT__API__LANG",
    "ESTAT__API__VERSION",
];

/// Run `f` with the given variables set and every other variable in
/// [`ENV_VARS`] removed, restoring the previous values afterwards.
fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let saved: Vec<(&str, Option<String>)> = ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

fn write_global(config_home: &Path, contents: &str) {
    let dir = config_home.join("estat");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

fn write_workspace(root: &Path, name: &str, contents: &str) {
    let dir = root.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_defaults_without_any_source() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let home = config_home.path().to_str().unwrap();

    with_env(&[("XDG_CONFIG_HOME", home)], || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.api.version, ApiVersion::New);
        assert_eq!(config.api.lang, Lang::En);
        assert_eq!(config.api.format, Format::Json);
        assert_eq!(config.api.protocol(), Protocol::Https);
        assert!(!config.api.verbose);
        assert!(config.defaults.is_empty());
    });
}

#[test]
fn test_global_config_path_follows_xdg() {
    let config_home = TempDir::new().unwrap();
    let home = config_home.path().to_str().unwrap();

    with_env(&[("XDG_CONFIG_HOME", home)], || {
        assert_eq!(
            ConfigLoader::global_config_path().unwrap(),
            config_home.path().join("estat").join("config.toml")
        );
    });

    with_env(&[("HOME", home)], || {
        assert_eq!(
            ConfigLoader::global_config_path().unwrap(),
            config_home
                .path()
                .join(".config")
                .join("estat")
                .join("config.toml")
        );
    });

    with_env(&[], || {
        assert!(ConfigLoader::global_config_path().is_none());
    });
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_global(
        config_home.path(),
        "[api]\nversion = 1\nlang = \"de\"\n\n[defaults]\ngeo = \"EU28\"\n",
    );
    write_workspace(workspace.path(), "config.toml", "[api]\nlang = \"fr\"\n");
    let home = config_home.path().to_str().unwrap();

    with_env(&[("XDG_CONFIG_HOME", home)], || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.api.version, ApiVersion::First);
        assert_eq!(config.api.lang, Lang::Fr);
        assert_eq!(config.defaults.get("geo").map(String::as_str), Some("EU28"));
    });
}

#[test]
fn test_environment_file_selected_by_estat_env() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[api]\nformat = \"sdmx\"\n");
    write_workspace(workspace.path(), "development.toml", "[api]\nlang = \"de\"\n");
    write_workspace(workspace.path(), "production.toml", "[api]\nlang = \"fr\"\n");
    let home = config_home.path().to_str().unwrap();

    with_env(&[("XDG_CONFIG_HOME", home)], || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.api.lang, Lang::De);
        assert_eq!(config.api.format, Format::Sdmx);
    });

    with_env(
        &[("XDG_CONFIG_HOME", home), ("ESTAT_ENV", "production")],
        || {
            let config = ConfigLoader::load(workspace.path()).unwrap();
            assert_eq!(config.api.lang, Lang::Fr);
            assert_eq!(config.api.format, Format::Sdmx);
        },
    );
}

#[test]
fn test_estat_env_must_name_a_plain_file() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[api]\nlang = \"de\"\n");
    let home = config_home.path().to_str().unwrap();

    for bad in ["../secrets", "prod.local", "config"] {
        with_env(&[("XDG_CONFIG_HOME", home), ("ESTAT_ENV", bad)], || {
            let err = ConfigLoader::load(workspace.path()).unwrap_err();
            assert!(err.to_string().contains("ESTAT_ENV"));
        });
    }

    with_env(&[("XDG_CONFIG_HOME", home), ("ESTAT_ENV", "  ")], || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.api.lang, Lang::De);
    });
}

#[test]
fn test_environment_variables_win() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_global(config_home.path(), "[api]\nlang = \"de\"\n");
    write_workspace(workspace.path(), "config.toml", "[api]\nlang = \"fr\"\n");
    let home = config_home.path().to_str().unwrap();

    with_env(
        &[
            ("XDG_CONFIG_HOME", home),
            ("ESTAT__API__LANG", "en"),
            ("ESTAT__API__VERSION", "1"),
        ],
        || {
            let config = ConfigLoader::load(workspace.path()).unwrap();
            assert_eq!(config.api.lang, Lang::En);
            assert_eq!(config.api.version, ApiVersion::First);
        },
    );
}

#[test]
fn test_load_without_home() {
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[api]\nverbose = true\n");

    with_env(&[], || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert!(config.api.verbose);
    });
}

#[test]
fn test_unknown_language_fails_to_load() {
    let config_home = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace(workspace.path(), "config.toml", "[api]\nlang = \"it\"\n");
    let home = config_home.path().to_str().unwrap();

    with_env(&[("XDG_CONFIG_HOME", home)], || {
        assert!(ConfigLoader::load(workspace.path()).is_err());
    });
}
