//! Parameter tree merging
//!
//! Request parameters travel as [`Node`] trees. Two merges are provided:
//! [`combine`] nests two trees into one, joining text leaves with a
//! separator, and [`override_merge`] lays explicit request settings over
//! session defaults.

mod nest;
mod node;
mod overlay;

pub use nest::{combine, combine_with, CombineOptions, DEFAULT_SEPARATOR};
pub use node::{Key, Mapping, Node};
pub use overlay::{override_merge, retain_known_keys, to_key_val_list, KeyOrder};
