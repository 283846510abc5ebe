//! Parameter tree values: keys, nodes and their conversions.

use indexmap::IndexMap;
use std::fmt;

/// Ordered mapping from key to node.
pub type Mapping = IndexMap<Key, Node>;

/// Key of a mapping node.
///
/// `Null` stands for an explicit "no key" entry; it is the only key that
/// `skip_empty` prunes from broadcast sub-mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Null,
    Int(i64),
    Text(String),
}

impl Key {
    pub fn is_null(&self) -> bool {
        matches!(self, Key::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "null"),
            Key::Int(value) => write!(f, "{}", value),
            Key::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl<K: Into<Key>> From<Option<K>> for Key {
    fn from(value: Option<K>) -> Self {
        value.map(Into::into).unwrap_or(Key::Null)
    }
}

/// A value in a parameter tree.
///
/// Only `Text` leaves and `Map` nodes take part in nested combination; the
/// other atomic kinds exist so that callers can hand over request values
/// as they come and get a typed error back instead of a silent coercion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Absent,
    Text(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Sequence of key/value pairs; mapping-like but not a mapping.
    Pairs(Vec<(Key, Node)>),
    Map(Mapping),
}

impl Node {
    /// Build a mapping node from anything that yields key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a pairs node from anything that yields key/value pairs.
    pub fn pairs<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Pairs(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    /// `Map` and `Pairs` both expose key/value entries.
    pub fn is_mapping_like(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Pairs(_))
    }

    /// Scalar values that can be rendered into a query string.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Node::Text(_) | Node::Bool(_) | Node::Int(_) | Node::Float(_)
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` in a mapping node.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Node> {
        self.as_map().and_then(|map| map.get(&key.into()))
    }

    /// Render a scalar value the way it appears in a URL query.
    pub fn render_scalar(&self) -> Option<String> {
        match self {
            Node::Text(text) => Some(text.clone()),
            Node::Bool(value) => Some(value.to_string()),
            Node::Int(value) => Some(value.to_string()),
            Node::Float(value) => Some(value.to_string()),
            _ => None,
        }
    }

    /// Name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Absent => "absent",
            Node::Text(_) => "text",
            Node::Bytes(_) => "bytes",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::Pairs(_) => "pairs",
            Node::Map(_) => "map",
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Node::Text(value.clone())
    }
}

impl From<Vec<u8>> for Node {
    fn from(value: Vec<u8>) -> Self {
        Node::Bytes(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(i64::from(value))
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Int(i64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Map(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Node::Absent)
    }
}

/// JSON `null` maps to `Absent`, objects to `Map` with text keys and arrays
/// to `Pairs` keyed by position. Integers beyond `i64` keep their exact
/// digits as `Text`.
impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Absent,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if n.is_u64() {
                    Node::Text(n.to_string())
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::Text(s),
            Value::Array(items) => Node::Pairs(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| (Key::Int(i as i64), Node::from(item)))
                    .collect(),
            ),
            Value::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Key::Text(k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}
