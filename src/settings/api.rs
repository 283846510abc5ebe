//! API versions and their per-version tables.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eurostat API generations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ApiVersion {
    /// Legacy JSON web service (`wdds/rest/data`).
    First = 1,
    /// SDMX dissemination API.
    #[default]
    New = 2,
}

/// Version numbers, oldest first.
pub const API_VERSIONS: [u8; 2] = [1, 2];

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::First, ApiVersion::New];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn default_protocol(self) -> Protocol {
        match self {
            ApiVersion::First => Protocol::Http,
            ApiVersion::New => Protocol::Https,
        }
    }

    pub fn default_lang(self) -> Lang {
        Lang::En
    }

    /// European Commission host.
    pub fn ec_host(self) -> &'static str {
        match self {
            ApiVersion::First => "ec.europa.eu",
            ApiVersion::New => "webgate.acceptance.ec.europa.eu",
        }
    }

    /// Eurostat domain under the Commission host.
    pub fn estat_domain(self) -> &'static str {
        match self {
            ApiVersion::First => "eurostat",
            ApiVersion::New => "estat",
        }
    }

    /// Host and domain, without protocol: `ec.europa.eu/eurostat`.
    pub fn estat_url(self) -> String {
        format!("{}/{}", self.ec_host(), self.estat_domain())
    }

    pub fn api_subdomain(self) -> &'static str {
        match self {
            ApiVersion::First => "wdds/rest/data",
            ApiVersion::New => "api/dissemination/sdmx",
        }
    }

    /// Full API location, without protocol.
    pub fn api_domain(self) -> String {
        format!("{}/{}", self.estat_url(), self.api_subdomain())
    }

    pub fn rest_version(self) -> &'static str {
        "2.1"
    }

    /// Precision of fetched data; only the legacy service takes one.
    pub fn precision(self) -> Option<u8> {
        match self {
            ApiVersion::First => Some(1),
            ApiVersion::New => None,
        }
    }

    pub fn default_sort(self) -> Option<u8> {
        match self {
            ApiVersion::First => Some(1),
            ApiVersion::New => None,
        }
    }

    pub fn formats(self) -> &'static [Format] {
        match self {
            ApiVersion::First => &[Format::Json, Format::Sdmx, Format::Unicode],
            ApiVersion::New => &[Format::Json, Format::Sdmx, Format::Dcat],
        }
    }

    pub fn langs(self) -> &'static [Lang] {
        &LANGS
    }

    pub fn supports_format(self, format: Format) -> bool {
        self.formats().contains(&format)
    }

    pub fn supports_lang(self, lang: Lang) -> bool {
        self.langs().contains(&lang)
    }
}

impl TryFrom<u8> for ApiVersion {
    type Error = ApiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ApiVersion::First),
            2 => Ok(ApiVersion::New),
            other => Err(ApiError::UnsupportedVersion(other)),
        }
    }
}

impl From<ApiVersion> for u8 {
    fn from(version: ApiVersion) -> Self {
        version.number()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Generates the lowercase `Display`/`FromStr` pair shared by the
/// enumerated settings.
macro_rules! named_setting {
    ($ty:ident, $key:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(ApiError::InvalidParameter {
                        key: $key.to_string(),
                        reason: format!("unknown value '{}'", other),
                    }),
                }
            }
        }
    };
}

/// Recognised protocols (API, bulk downloads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Ftp,
}

pub const PROTOCOLS: [Protocol; 3] = [Protocol::Http, Protocol::Https, Protocol::Ftp];

named_setting!(Protocol, "protocol", {
    Http => "http",
    Https => "https",
    Ftp => "ftp",
});

/// Languages supported by the client and the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    De,
    Fr,
}

pub const LANGS: [Lang; 3] = [Lang::En, Lang::De, Lang::Fr];

named_setting!(Lang, "lang", {
    En => "en",
    De => "de",
    Fr => "fr",
});

/// Formats returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Sdmx,
    Unicode,
    Dcat,
}

pub const DEFAULT_FORMAT: Format = Format::Json;

named_setting!(Format, "format", {
    Json => "json",
    Sdmx => "sdmx",
    Unicode => "unicode",
    Dcat => "dcat",
});
