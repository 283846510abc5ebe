//! Shallow override of session-level parameters by per-request ones.

use super::node::{Key, Mapping, Node};
use crate::error::MergeError;

/// Key order of the mapping produced by [`override_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Old entries first, in their order, then new keys as they appear.
    #[default]
    Insertion,
    /// Keys sorted (`Null` < integers < text).
    Sorted,
}

impl KeyOrder {
    fn finish(self, mut mapping: Mapping) -> Mapping {
        if self == KeyOrder::Sorted {
            mapping.sort_keys();
        }
        mapping
    }
}

/// Entries of a mapping-like node.
///
/// Returns `None` for an absent node. Atomic values cannot be viewed as a
/// list of key/value pairs and are rejected.
pub fn to_key_val_list(value: &Node) -> Result<Option<Vec<(Key, Node)>>, MergeError> {
    match value {
        Node::Absent => Ok(None),
        Node::Map(entries) => Ok(Some(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )),
        Node::Pairs(entries) => Ok(Some(entries.clone())),
        other => Err(MergeError::Conversion(other.kind())),
    }
}

/// Merge explicit request settings over session settings.
///
/// An absent side yields the other one, and a non-mapping `new` value wins
/// outright. Otherwise the entries of `new` are laid over those of `old`,
/// and every entry left with an absent value is removed, so a request can
/// unset a session default by passing `Absent` for it.
pub fn override_merge(new: &Node, old: &Node, order: KeyOrder) -> Result<Node, MergeError> {
    if old.is_absent() {
        return Ok(new.clone());
    }
    if new.is_absent() {
        return Ok(old.clone());
    }
    if !(old.is_mapping_like() && new.is_mapping_like()) {
        return Ok(new.clone());
    }

    let mut merged: Mapping = to_key_val_list(old)?.into_iter().flatten().collect();
    for (key, value) in to_key_val_list(new)?.into_iter().flatten() {
        merged.insert(key, value);
    }
    merged.retain(|_, value| !value.is_absent());

    Ok(Node::Map(order.finish(merged)))
}

/// Keep only the entries of a mapping whose text key is in `allowed`.
///
/// Used to strip parameters a downstream call does not accept. Non-mapping
/// nodes are returned unchanged.
pub fn retain_known_keys(params: &Node, allowed: &[&str]) -> Node {
    let known = |key: &Key| key.as_text().is_some_and(|k| allowed.contains(&k));
    match params {
        Node::Map(entries) => Node::Map(
            entries
                .iter()
                .filter(|(k, _)| known(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        Node::Pairs(entries) => {
            Node::Pairs(entries.iter().filter(|(k, _)| known(k)).cloned().collect())
        }
        other => other.clone(),
    }
}
