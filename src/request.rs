//! Request preparation
//!
//! A [`Session`] fixes the API version, protocol and default parameters
//! from an [`EstatConfig`]. Per-request parameters are laid over the
//! session defaults with [`override_merge`] and rendered into URLs for the
//! HTTP layer. No request is sent from here.

use crate::config::EstatConfig;
use crate::error::ApiError;
use crate::merge::{override_merge, Key, KeyOrder, Mapping, Node};
use crate::report::{Reporter, TracingReporter, Warning};
use crate::settings::{bulk_domain, ApiVersion, BulkSection, Format, Lang, Protocol, BULK_QUERY};
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;

/// Session-level request settings.
pub struct Session {
    version: ApiVersion,
    protocol: Protocol,
    lang: Lang,
    format: Format,
    defaults: Mapping,
    verbose: bool,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("protocol", &self.protocol)
            .field("lang", &self.lang)
            .field("format", &self.format)
            .field("defaults", &self.defaults)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session reporting through `tracing`.
    pub fn new(config: &EstatConfig) -> Result<Self, ApiError> {
        let reporter = Arc::new(TracingReporter::new(config.api.verbose));
        Self::with_reporter(config, reporter)
    }

    /// Create a session reporting through `reporter`.
    pub fn with_reporter(
        config: &EstatConfig,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, ApiError> {
        config.ensure_valid()?;

        let api = &config.api;
        let protocol = api.protocol();
        if protocol != api.version.default_protocol() {
            reporter.warning(
                &Warning::new(format!(
                    "protocol {} differs from the default {} of API version {}",
                    protocol,
                    api.version.default_protocol(),
                    api.version
                ))
                .with_expr("api.protocol"),
            );
        }

        let mut defaults = Mapping::new();
        if let Some(precision) = api.precision() {
            defaults.insert(Key::from("precision"), Node::from(precision));
        }
        if let Some(sort) = api.sort() {
            defaults.insert(Key::from("sort"), Node::from(sort));
        }
        if api.version == ApiVersion::New {
            defaults.insert(Key::from("lang"), Node::from(api.lang.as_str()));
            defaults.insert(Key::from("format"), Node::from(api.format.as_str()));
        }
        for (key, value) in &config.defaults {
            defaults.insert(Key::from(key.as_str()), Node::from(value));
        }

        debug!(
            version = %api.version,
            protocol = %protocol,
            defaults = defaults.len(),
            "Session created"
        );

        Ok(Self {
            version: api.version,
            protocol,
            lang: api.lang,
            format: api.format,
            defaults,
            verbose: api.verbose,
            reporter,
        })
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Session-level parameters as a mapping node.
    pub fn default_params(&self) -> Node {
        Node::Map(self.defaults.clone())
    }

    /// Request parameters laid over the session defaults; `Absent` values
    /// in `request` remove the matching default.
    pub fn params(&self, request: &Node) -> Result<Node, ApiError> {
        let merged = override_merge(request, &self.default_params(), KeyOrder::Insertion)?;
        if let Node::Map(entries) = &merged {
            self.report_verbose(&format!("{} request parameters", entries.len()));
        }
        Ok(merged)
    }

    /// Verbose messages reach the reporter only when `api.verbose` is set.
    fn report_verbose(&self, message: &str) {
        if self.verbose {
            self.reporter.verbose(message);
        }
    }

    /// `{protocol}://{api domain}`
    pub fn base_url(&self) -> Result<Url, ApiError> {
        parse_url(&format!("{}://{}", self.protocol, self.version.api_domain()))
    }

    /// URL of a dataset query.
    ///
    /// The legacy service carries format and language in the path; the SDMX
    /// API takes them as query parameters like everything else.
    pub fn data_url(&self, dataset: &str, request: &Node) -> Result<Url, ApiError> {
        let dataset = dataset.trim();
        if dataset.is_empty() {
            return Err(ApiError::InvalidParameter {
                key: "dataset".to_string(),
                reason: "dataset code is empty".to_string(),
            });
        }

        let mut params = match self.params(request)? {
            Node::Map(entries) => entries,
            Node::Pairs(entries) => entries.into_iter().collect(),
            other => {
                return Err(ApiError::InvalidParameter {
                    key: "request".to_string(),
                    reason: format!("expected a mapping, got {}", other.kind()),
                })
            }
        };

        let rest = self.version.rest_version();
        let mut url = self.base_url()?;
        match self.version {
            ApiVersion::First => {
                let format = take_setting(&mut params, "format", self.format)?;
                let lang = take_setting(&mut params, "lang", self.lang)?;
                if !self.version.supports_format(format) {
                    return Err(ApiError::UnsupportedFormat {
                        format: format.to_string(),
                        version: self.version.number(),
                    });
                }
                let versioned = format!("v{}", rest);
                push_segments(
                    &mut url,
                    &[versioned.as_str(), format.as_str(), lang.as_str(), dataset],
                )?;
            }
            ApiVersion::New => {
                push_segments(&mut url, &[rest, "data", dataset])?;
            }
        }

        append_query(&mut url, &params)?;
        debug!(url = %url, "Data URL prepared");
        Ok(url)
    }

    /// URL of the bulk download listing.
    pub fn bulk_listing_url(&self) -> Result<Url, ApiError> {
        parse_url(&format!(
            "{}://{}/{}",
            self.protocol,
            bulk_domain(self.version),
            BULK_QUERY
        ))
    }

    /// URL of one bulk file, e.g. `...BulkDownloadListing?file=data%2Fnama_10_gdp.tsv.gz`.
    pub fn bulk_file_url(
        &self,
        section: BulkSection,
        name: Option<&str>,
        ext: &str,
        compressed: bool,
    ) -> Result<Url, ApiError> {
        let located = section.locate(&Node::from(name), ext, self.lang, compressed)?;
        let path = located.as_text().ok_or_else(|| ApiError::InvalidParameter {
            key: "file".to_string(),
            reason: format!("expected a single path, got {}", located.kind()),
        })?;

        let mut url = self.bulk_listing_url()?;
        url.query_pairs_mut().append_pair("file", path);
        Ok(url)
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
}

fn push_segments(url: &mut Url, segments: &[&str]) -> Result<(), ApiError> {
    let text = url.to_string();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", text)))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// Remove a setting from the parameters, parsing it when present.
fn take_setting<T>(params: &mut Mapping, key: &str, fallback: T) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = ApiError>,
{
    match params.shift_remove(&Key::from(key)) {
        None => Ok(fallback),
        Some(Node::Text(value)) => value.parse(),
        Some(other) => Err(ApiError::InvalidParameter {
            key: key.to_string(),
            reason: format!("expected text, got {}", other.kind()),
        }),
    }
}

/// Render parameters as query pairs. Mapping values of scalars repeat the
/// key once per value.
fn append_query(url: &mut Url, params: &Mapping) -> Result<(), ApiError> {
    if params.is_empty() {
        return Ok(());
    }
    let mut pairs = Vec::new();
    for (key, value) in params {
        let name = key.to_string();
        match value {
            Node::Map(entries) => {
                for nested in entries.values() {
                    pairs.push((name.clone(), render_value(&name, nested)?));
                }
            }
            Node::Pairs(entries) => {
                for (_, nested) in entries {
                    pairs.push((name.clone(), render_value(&name, nested)?));
                }
            }
            other => pairs.push((name.clone(), render_value(&name, other)?)),
        }
    }
    url.query_pairs_mut().extend_pairs(pairs);
    Ok(())
}

fn render_value(key: &str, value: &Node) -> Result<String, ApiError> {
    value.render_scalar().ok_or_else(|| ApiError::InvalidParameter {
        key: key.to_string(),
        reason: format!("{} values cannot be sent as query parameters", value.kind()),
    })
}
