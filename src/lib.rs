//! Estat: settings and shared helpers for a Eurostat API client
//!
//! Static API tables, layered configuration, request-parameter merging,
//! URL preparation and the diagnostics plumbing used by the HTTP layer.

pub mod config;
pub mod error;
pub mod logging;
pub mod merge;
pub mod report;
pub mod request;
pub mod settings;

pub use error::{obsolete, ApiError, MergeError};
pub use merge::{combine, combine_with, override_merge, CombineOptions, Key, KeyOrder, Node};
pub use request::Session;
