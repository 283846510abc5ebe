//! Configuration System
//!
//! Layered configuration for the API client: built-in defaults, a global
//! file, workspace files and environment variables, merged with the
//! `config` crate and validated against the per-version settings tables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::settings::{ApiVersion, Format, Lang, Protocol};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstatConfig {
    /// API selection and request defaults
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session-level request parameters, overridden per request
    #[serde(default)]
    pub defaults: IndexMap<String, String>,
}

/// API selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub version: ApiVersion,

    /// Protocol; the version's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,

    #[serde(default)]
    pub lang: Lang,

    #[serde(default)]
    pub format: Format,

    /// Sort order; the version's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<u8>,

    /// Data precision; the version's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,

    /// Emit verbose messages through the reporter
    #[serde(default)]
    pub verbose: bool,
}

impl ApiConfig {
    pub fn protocol(&self) -> Protocol {
        self.protocol
            .unwrap_or_else(|| self.version.default_protocol())
    }

    pub fn sort(&self) -> Option<u8> {
        self.sort.or_else(|| self.version.default_sort())
    }

    pub fn precision(&self) -> Option<u8> {
        self.precision.or_else(|| self.version.precision())
    }

    /// Check that the chosen format and language exist for the version.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.version.supports_format(self.format) {
            return Err(ApiError::UnsupportedFormat {
                format: self.format.to_string(),
                version: self.version.number(),
            });
        }
        if !self.version.supports_lang(self.lang) {
            return Err(ApiError::UnsupportedLanguage {
                lang: self.lang.to_string(),
                version: self.version.number(),
            });
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Api(String),
    Logging(String),
    Defaults(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Api(msg) => write!(f, "API: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
            ValidationError::Defaults(msg) => write!(f, "Defaults: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EstatConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api.validate() {
            errors.push(ValidationError::Api(e.to_string()));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        for (key, value) in &self.defaults {
            if key.trim().is_empty() {
                errors.push(ValidationError::Defaults(format!(
                    "empty parameter name (value '{}')",
                    value
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all problems into one error.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Serialize to TOML, in the layout the loader reads back.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
