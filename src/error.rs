//! Error types for the Eurostat client settings layer.

use crate::report::ErrorReport;
use thiserror::Error;

/// Errors raised while merging parameter trees
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("parameters format not supported: cannot combine {left} with {right}")]
    Format {
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot encode objects that are not 2-tuples: got {0}")]
    Conversion(&'static str),
}

/// API-level errors: configuration, settings lookups and URL building
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(u8),

    #[error("Format {format} is not supported by API version {version}")]
    UnsupportedFormat { format: String, version: u8 },

    #[error("Language {lang} is not supported by API version {version}")]
    UnsupportedLanguage { lang: String, version: u8 },

    #[error("Invalid parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("Method {0} is now obsolete")]
    Obsolete(String),
}

impl ApiError {
    /// Short name of the error kind, used as the type slot of an [`ErrorReport`].
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ConfigError(_) => "ConfigError",
            ApiError::UnsupportedVersion(_) => "UnsupportedVersion",
            ApiError::UnsupportedFormat { .. } => "UnsupportedFormat",
            ApiError::UnsupportedLanguage { .. } => "UnsupportedLanguage",
            ApiError::InvalidParameter { .. } => "InvalidParameter",
            ApiError::InvalidUrl(_) => "InvalidUrl",
            ApiError::Merge(MergeError::Format { .. }) => "FormatError",
            ApiError::Merge(MergeError::Conversion(_)) => "ConversionError",
            ApiError::Obsolete(_) => "Obsolete",
        }
    }

    /// Build a user-facing report for this error, optionally naming the
    /// expression in which it occurred.
    pub fn report(&self, expr: Option<&str>) -> ErrorReport {
        let mut report = ErrorReport::new(self.to_string()).with_kind(self.kind());
        if let ApiError::UnsupportedVersion(version) = self {
            report = report.with_code(version.to_string());
        }
        match expr {
            Some(expr) => report.with_expr(expr),
            None => report,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Placeholder for a method that has been withdrawn: always fails.
pub fn obsolete<T>(method: &str) -> Result<T, ApiError> {
    Err(ApiError::Obsolete(method.to_string()))
}
