//! Layout of the bulk download repository.

use super::api::{ApiVersion, Lang};
use crate::error::ApiError;
use crate::merge::{combine_with, CombineOptions, Node};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subdomain of the repository for bulk datasets.
pub const BULK_SUBDOMAIN: &str = "estat-navtree-portlet-prod";

/// Listing endpoint linking to bulk files.
pub const BULK_QUERY: &str = "BulkDownloadListing";

/// Online repository for bulk datasets, without protocol.
pub fn bulk_domain(version: ApiVersion) -> String {
    format!("{}/{}", version.estat_url(), BULK_SUBDOMAIN)
}

/// Kinds of files served by the bulk repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkSection {
    /// Code dictionaries.
    Dic,
    /// Datasets.
    Data,
    /// Metabase (all dataset metadata).
    Base,
    /// Table of contents of the database.
    Toc,
}

impl BulkSection {
    pub const ALL: [BulkSection; 4] = [
        BulkSection::Dic,
        BulkSection::Data,
        BulkSection::Base,
        BulkSection::Toc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BulkSection::Dic => "dic",
            BulkSection::Data => "data",
            BulkSection::Base => "base",
            BulkSection::Toc => "toc",
        }
    }

    /// Directory of the section in the repository; empty for the root.
    pub fn dir(self) -> &'static str {
        match self {
            BulkSection::Dic => "dic",
            BulkSection::Data => "data",
            BulkSection::Base | BulkSection::Toc => "",
        }
    }

    /// Code of the dimension list, where the section has one.
    pub fn list_code(self) -> &'static str {
        match self {
            BulkSection::Dic => "dimlist",
            _ => "",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            BulkSection::Dic => &["dic"],
            BulkSection::Data => &["tsv", "sdmx"],
            BulkSection::Base => &["txt"],
            BulkSection::Toc => &["txt", "xml"],
        }
    }

    /// Extension of compressed files; empty when the section is served raw.
    pub fn compression(self) -> &'static str {
        match self {
            BulkSection::Toc => "",
            _ => "gz",
        }
    }

    /// Fixed file stem, for sections consisting of a single file.
    pub fn file_stem(self) -> &'static str {
        match self {
            BulkSection::Base => "metabase",
            BulkSection::Toc => "table_of_contents",
            _ => "",
        }
    }

    /// Column labels of the listing tables, as (field, label) pairs.
    pub fn labels(self) -> &'static [(&'static str, &'static str)] {
        match self {
            BulkSection::Dic | BulkSection::Data => &[
                ("name", "Name"),
                ("size", "Size"),
                ("type", "Type"),
                ("date", "Date"),
            ],
            BulkSection::Base => &[("data", "data"), ("dic", "dic"), ("label", "label")],
            BulkSection::Toc => &[
                ("title", "title"),
                ("code", "code"),
                ("type", "type"),
                ("last_update", "last update of data"),
                ("last_change", "last table structure change"),
                ("start", "data start"),
                ("end", "data end"),
            ],
        }
    }

    /// Relative paths of bulk files.
    ///
    /// `names` is a single dataset name or a mapping of names; the result
    /// has the same shape. Dictionaries live under `dic/<lang>/`. For the
    /// single-file sections an absent `names` selects the fixed file stem.
    pub fn locate(
        self,
        names: &Node,
        ext: &str,
        lang: Lang,
        compressed: bool,
    ) -> Result<Node, ApiError> {
        if !self.extensions().contains(&ext) {
            return Err(ApiError::InvalidParameter {
                key: "ext".to_string(),
                reason: format!("'{}' is not served for section {}", ext, self),
            });
        }

        let names = match names {
            Node::Absent if !self.file_stem().is_empty() => Node::from(self.file_stem()),
            Node::Absent => {
                return Err(ApiError::InvalidParameter {
                    key: "names".to_string(),
                    reason: format!("section {} requires file names", self),
                })
            }
            other => other.clone(),
        };

        let dotted = CombineOptions::default().separator(".");
        let mut files = combine_with(&names, &Node::from(ext), dotted)?;
        if compressed && !self.compression().is_empty() {
            files = combine_with(&files, &Node::from(self.compression()), dotted)?;
        }

        let dir = match self {
            BulkSection::Dic => format!("{}/{}", self.dir(), lang),
            _ => self.dir().to_string(),
        };
        if dir.is_empty() {
            return Ok(files);
        }
        combine_with(&Node::from(dir), &files, CombineOptions::default()).map_err(ApiError::from)
    }
}

impl fmt::Display for BulkSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
