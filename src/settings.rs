//! Static settings of the Eurostat API
//!
//! Per-version URL tables, supported protocols, languages and formats, and
//! the layout of the bulk download repository.

mod api;
mod bulk;

pub use api::{
    ApiVersion, Format, Lang, Protocol, API_VERSIONS, DEFAULT_FORMAT, LANGS, PROTOCOLS,
};
pub use bulk::{bulk_domain, BulkSection, BULK_QUERY, BULK_SUBDOMAIN};

/// Package name, used for the log file and the config directory.
pub const PACKAGE: &str = "estat";

/// Keyword selecting the default value of a setting.
pub const KW_DEFAULT: &str = "default";

/// Markup parsers accepted by the page-scraping layer.
pub const MARKUP_PARSERS: [&str; 4] = ["html.parser", "html5lib", "lxml", "xml"];

/// Default log file name.
pub const LOG_FILENAME: &str = "estat.log";
