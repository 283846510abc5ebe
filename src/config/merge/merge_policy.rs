//! Merge rules: defaults and override order.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the API defaults applied.
///
/// Later sources override earlier ones key by key, so a file that only sets
/// `api.lang` keeps the default version and format.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.version", 2_i64)?
        .set_default("api.lang", "en")?
        .set_default("api.format", "json")?
        .set_default("api.verbose", false)
}
