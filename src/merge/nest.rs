//! Nested combination of parameter trees.
//!
//! Two text leaves are joined with a separator; a mapping on either side
//! is walked and the other operand is broadcast over its entries.

use super::node::{Mapping, Node};
use crate::error::MergeError;

/// Default separator placed between combined leaves.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Options for [`combine_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineOptions<'a> {
    /// Prune absent branches (and null keys of broadcast sub-mappings)
    /// instead of propagating them.
    pub skip_empty: bool,
    pub separator: &'a str,
}

impl Default for CombineOptions<'_> {
    fn default() -> Self {
        Self {
            skip_empty: false,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl<'a> CombineOptions<'a> {
    pub fn skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    pub fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }
}

/// Combine two trees with the default options (`skip_empty = false`,
/// separator `/`).
///
/// ```
/// use estat::merge::{combine, Node};
///
/// let nested = combine(&Node::map([(1, "a"), (2, "b")]), &Node::from("c")).unwrap();
/// assert_eq!(nested, Node::map([(1, "a/c"), (2, "b/c")]));
/// ```
pub fn combine(left: &Node, right: &Node) -> Result<Node, MergeError> {
    combine_with(left, right, CombineOptions::default())
}

/// Combine two trees.
///
/// The result mirrors whichever side is a mapping. When both sides are
/// mappings, the result has exactly the keys of `left`: matching keys are
/// combined pairwise, and every other key of `left` gets a sub-mapping over
/// all keys of `right`.
pub fn combine_with(
    left: &Node,
    right: &Node,
    options: CombineOptions<'_>,
) -> Result<Node, MergeError> {
    match (left, right) {
        (Node::Absent, Node::Absent) => Ok(Node::Absent),
        (Node::Absent, other) | (other, Node::Absent) => {
            if options.skip_empty {
                Ok(Node::Absent)
            } else {
                Ok(other.clone())
            }
        }
        (Node::Text(l), Node::Text(r)) => {
            Ok(Node::Text(format!("{}{}{}", l, options.separator, r)))
        }
        (Node::Map(entries), Node::Text(_)) => {
            broadcast(entries, options, |value| combine_with(value, right, options))
        }
        (Node::Text(_), Node::Map(entries)) => {
            broadcast(entries, options, |value| combine_with(left, value, options))
        }
        (Node::Map(l), Node::Map(r)) => combine_maps(l, r, options),
        _ => Err(MergeError::Format {
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

/// Apply `f` to every entry of `entries`, dropping absent values when
/// `skip_empty` is set.
fn broadcast<F>(entries: &Mapping, options: CombineOptions<'_>, f: F) -> Result<Node, MergeError>
where
    F: Fn(&Node) -> Result<Node, MergeError>,
{
    let mut result = Mapping::with_capacity(entries.len());
    for (key, value) in entries {
        if options.skip_empty && value.is_absent() {
            continue;
        }
        result.insert(key.clone(), f(value)?);
    }
    Ok(Node::Map(result))
}

fn combine_maps(
    left: &Mapping,
    right: &Mapping,
    options: CombineOptions<'_>,
) -> Result<Node, MergeError> {
    let mut result = Mapping::with_capacity(left.len());
    for (key, value) in left {
        if options.skip_empty && value.is_absent() {
            continue;
        }
        let combined = match right.get(key) {
            Some(other) => combine_with(value, other, options)?,
            None => {
                let mut nested = Mapping::with_capacity(right.len());
                for (other_key, other) in right {
                    if options.skip_empty && other_key.is_null() {
                        continue;
                    }
                    nested.insert(other_key.clone(), combine_with(value, other, options)?);
                }
                Node::Map(nested)
            }
        };
        result.insert(key.clone(), combined);
    }
    Ok(Node::Map(result))
}
