use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde_json::Number;
use url::Url;

use crate::{node::parse_index, DynamicNode};

/// A value resolved from a JSON document.
///
/// Strings that look like dates or absolute URIs are already coerced, nested objects are
/// wrapped into [`DynamicNode`]s and arrays hold resolved items in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Uri(Url),
    Array(Vec<Field>),
    Node(Box<DynamicNode>),
}

impl Field {
    /// Permissive lookup on a wrapped object, or on an array with a decimal key.
    ///
    /// Returns `None` for scalars, so lookups can be chained freely.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        match self {
            Field::Node(node) => node.get(key),
            Field::Array(items) => parse_index(key).and_then(|idx| items.get(idx)),
            _ => None,
        }
    }

    /// Positional lookup on an array or on a node wrapping an array.
    #[must_use]
    pub fn get_index(&self, idx: usize) -> Option<&Field> {
        match self {
            Field::Node(node) => node.get_index(idx),
            Field::Array(items) => items.get(idx),
            _ => None,
        }
    }

    /// Dotted navigation starting from this value. See [`DynamicNode::path`].
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&Field> {
        crate::path::resolve(self, path)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Field::Number(number) => Some(number),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// The string value, if this field was not coerced into something else.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Field::DateTime(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uri(&self) -> Option<&Url> {
        match self {
            Field::Uri(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Field]> {
        match self {
            Field::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_node(&self) -> Option<&DynamicNode> {
        match self {
            Field::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Human-readable text, not JSON.
///
/// Strings, dates and URIs are written bare and array items are joined with `", "`. Nested
/// nodes print their source JSON. Use [`DynamicNode`]'s `Display` or [`crate::stringify`] for
/// JSON output.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Null => f.write_str("null"),
            Field::Bool(value) => write!(f, "{value}"),
            Field::Number(number) => write!(f, "{number}"),
            Field::String(value) => f.write_str(value),
            Field::DateTime(value) => f.write_str(&value.to_rfc3339()),
            Field::Uri(value) => f.write_str(value.as_str()),
            Field::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Field::Node(node) => write!(f, "{node}"),
        }
    }
}

impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Field {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Field {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<f64> for Field {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}
