use std::{
    collections::hash_map::Entry,
    fmt,
    ops::Index,
    str::FromStr,
};

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{normalize::alias_key, Error, Field, Options};

/// A read-only, navigable view over a JSON value.
///
/// Every nested object becomes a nested `DynamicNode`, arrays are wrapped item by item and
/// string leaves go through the coercion pipeline (see [`Options`]). The original value is
/// retained and is what gets serialized back, regardless of any coercion applied for reading.
///
/// Every nested node keeps its own copy of its source subtree, so memory grows with the
/// document size times its nesting depth.
///
/// ```rust
/// use dynjson::DynamicNode;
///
/// # fn example() -> Result<(), dynjson::Error> {
/// let node = DynamicNode::parse(r#"{"user-name": "Ann", "joined": "2021-05-01"}"#)?;
///
/// // Exact key and identifier-style alias reach the same value
/// assert_eq!(node.get("user-name"), node.get("userName"));
/// assert!(node.get("joined").and_then(|f| f.as_datetime()).is_some());
/// // Serialization reproduces the input, not the coerced view
/// assert_eq!(node.to_string(), r#"{"user-name":"Ann","joined":"2021-05-01"}"#);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicNode {
    source: Value,
    body: Body,
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Object(Fields),
    Array(Vec<Field>),
    Scalar(Field),
}

/// Resolved object members in document order plus the lookup tables over them.
#[derive(Debug, Clone)]
struct Fields {
    entries: Vec<(String, Field)>,
    positions: AHashMap<String, usize>,
    /// Folded alias -> original key. The first key claiming an alias keeps it.
    aliases: AHashMap<String, String>,
}

impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        // Both lookup tables are derived from `entries`
        self.entries == other.entries
    }
}

impl Fields {
    fn new(map: &Map<String, Value>, options: &Options) -> Fields {
        let mut entries = Vec::with_capacity(map.len());
        let mut positions = AHashMap::with_capacity(map.len());
        let mut aliases = AHashMap::with_capacity(map.len());
        for (key, value) in map {
            positions.insert(key.clone(), entries.len());
            entries.push((key.clone(), resolve(value, options)));
            match aliases.entry(alias_key(key)) {
                Entry::Vacant(entry) => {
                    entry.insert(key.clone());
                }
                Entry::Occupied(entry) => {
                    tracing::trace!(
                        key = key.as_str(),
                        alias = entry.key().as_str(),
                        owner = entry.get().as_str(),
                        "Alias already taken, key is reachable only by its exact name"
                    );
                }
            }
        }
        Fields {
            entries,
            positions,
            aliases,
        }
    }

    #[inline]
    fn exact(&self, key: &str) -> Option<&Field> {
        self.positions.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Only case is folded on the requested key. Punctuation in it is kept, so `"a.b"` is not
    /// the alias `ab`.
    #[inline]
    fn alias(&self, key: &str) -> Option<&str> {
        self.aliases.get(&key.to_lowercase()).map(String::as_str)
    }
}

fn resolve(value: &Value, options: &Options) -> Field {
    match value {
        Value::Null => Field::Null,
        Value::Bool(value) => Field::Bool(*value),
        Value::Number(number) => Field::Number(number.clone()),
        Value::String(string) => options.coerce(string),
        Value::Array(items) => Field::Array(resolve_items(items, options)),
        Value::Object(_) => Field::Node(Box::new(DynamicNode::build_with(
            value.clone(),
            options,
        ))),
    }
}

fn resolve_items(items: &[Value], options: &Options) -> Vec<Field> {
    items.iter().map(|item| resolve(item, options)).collect()
}

/// Array positions follow the JSON Pointer rules: no sign, no leading zeros.
pub(crate) fn parse_index(key: &str) -> Option<usize> {
    if key.starts_with('+') || (key.starts_with('0') && key.len() != 1) {
        return None;
    }
    key.parse().ok()
}

impl DynamicNode {
    /// Wrap a JSON value using the default [`Options`].
    #[must_use]
    pub fn build(value: Value) -> DynamicNode {
        DynamicNode::build_with(value, &Options::new())
    }

    /// Wrap a JSON value using the given options.
    #[must_use]
    pub fn build_with(value: Value, options: &Options) -> DynamicNode {
        let body = match &value {
            Value::Object(map) => Body::Object(Fields::new(map, options)),
            Value::Array(items) => Body::Array(resolve_items(items, options)),
            scalar => Body::Scalar(resolve(scalar, options)),
        };
        DynamicNode {
            source: value,
            body,
        }
    }

    /// Parse JSON text with the default [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `text` is not valid JSON.
    pub fn parse(text: &str) -> Result<DynamicNode, Error> {
        Options::new().parse(text)
    }

    /// Parse JSON bytes with the default [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `bytes` are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<DynamicNode, Error> {
        Options::new().from_slice(bytes)
    }

    /// Read JSON with the default [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the reader fails or yields invalid JSON.
    pub fn from_reader(reader: impl std::io::Read) -> Result<DynamicNode, Error> {
        Options::new().from_reader(reader)
    }

    /// Wrap an in-memory value with the default [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if `value` can not be represented as JSON.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<DynamicNode, Error> {
        Options::new().from_serializable(value)
    }

    /// Permissive lookup.
    ///
    /// Tries the exact key first, then the alias table, so `"foo-bar"`, `"foobar"` and
    /// `"fooBar"` all reach the `foo-bar` member. On array nodes a decimal key addresses an
    /// item. A missing key is `None`, never an error.
    ///
    /// An alias is the key with non-identifier characters removed, compared case-insensitively.
    /// Keys that differ only in case or punctuation therefore share one alias, which belongs to
    /// the first of them in document order: in `{"A-B": 1, "a-b": 2}` the alias `ab` reaches
    /// `A-B`. The requested key itself is only case-folded, so `"a.b"` does not reach `a-b`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        match &self.body {
            Body::Object(fields) => fields.exact(key).or_else(|| {
                fields
                    .alias(key)
                    .and_then(|original| fields.exact(original))
            }),
            Body::Array(items) => parse_index(key).and_then(|idx| items.get(idx)),
            Body::Scalar(_) => None,
        }
    }

    /// Strict lookup by exact key, without alias fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if there is no member with exactly this name.
    pub fn try_get(&self, key: &str) -> Result<&Field, Error> {
        let found = match &self.body {
            Body::Object(fields) => fields.exact(key),
            Body::Array(items) => parse_index(key).and_then(|idx| items.get(idx)),
            Body::Scalar(_) => None,
        };
        found.ok_or_else(|| Error::missing_key(key))
    }

    /// Item at `idx` if this node wraps an array.
    #[must_use]
    pub fn get_index(&self, idx: usize) -> Option<&Field> {
        match &self.body {
            Body::Array(items) => items.get(idx),
            _ => None,
        }
    }

    /// Dotted navigation, e.g. `"user.address.city"` or `"items.0.x"`.
    ///
    /// Each segment is resolved with [`DynamicNode::get`]. A literal dot inside a key is written
    /// as `\.`. An empty path is `None`.
    #[must_use]
    pub fn path(&self, path: &str) -> Option<&Field> {
        crate::path::resolve_from_node(self, path)
    }

    /// Original key that `alias` resolves to.
    #[must_use]
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        match &self.body {
            Body::Object(fields) => fields.alias(alias),
            _ => None,
        }
    }

    /// Whether a member with exactly this name exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        match &self.body {
            Body::Object(fields) => fields.positions.contains_key(key),
            _ => false,
        }
    }

    /// Member names in document order. Empty for arrays and scalars.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().iter().map(|(key, _)| key.as_str())
    }

    /// Members in document order. Empty for arrays and scalars.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries().iter().map(|(key, field)| (key.as_str(), field))
    }

    /// Array items in document order. Empty for objects and scalars.
    #[must_use]
    pub fn items(&self) -> &[Field] {
        match &self.body {
            Body::Array(items) => items,
            _ => &[],
        }
    }

    /// The resolved value of a node built from a bare scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Field> {
        match &self.body {
            Body::Scalar(field) => Some(field),
            _ => None,
        }
    }

    fn entries(&self) -> &[(String, Field)] {
        match &self.body {
            Body::Object(fields) => &fields.entries,
            _ => &[],
        }
    }

    /// Number of members or items.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.body {
            Body::Object(fields) => fields.entries.len(),
            Body::Array(items) => items.len(),
            Body::Scalar(_) => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.body, Body::Object(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.body, Body::Array(_))
    }

    /// The JSON value this node was built from.
    #[must_use]
    pub fn source(&self) -> &Value {
        &self.source
    }

    #[must_use]
    pub fn into_source(self) -> Value {
        self.source
    }

    /// Indented JSON of the original value.
    #[must_use]
    pub fn to_string_pretty(&self) -> String {
        format!("{:#}", self.source)
    }
}

impl Index<&str> for DynamicNode {
    type Output = Field;

    /// Strict lookup by exact key.
    ///
    /// # Panics
    ///
    /// Panics if there is no member with exactly this name. Use [`DynamicNode::get`] or
    /// [`DynamicNode::try_get`] to handle missing keys.
    fn index(&self, key: &str) -> &Field {
        match self.try_get(key) {
            Ok(field) => field,
            Err(error) => panic!("{error}"),
        }
    }
}

impl Index<usize> for DynamicNode {
    type Output = Field;

    /// # Panics
    ///
    /// Panics if the node is not an array or `idx` is out of bounds.
    fn index(&self, idx: usize) -> &Field {
        match self.get_index(idx) {
            Some(field) => field,
            None => panic!(
                "Index {idx} is out of bounds for a node of length {}",
                self.items().len()
            ),
        }
    }
}

impl fmt::Display for DynamicNode {
    /// Compact JSON of the original value; `{:#}` produces indented output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl FromStr for DynamicNode {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        DynamicNode::parse(text)
    }
}

impl From<Value> for DynamicNode {
    fn from(value: Value) -> Self {
        DynamicNode::build(value)
    }
}

impl From<DynamicNode> for Value {
    fn from(node: DynamicNode) -> Self {
        node.into_source()
    }
}

impl Serialize for DynamicNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DynamicNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DynamicNode::build)
    }
}
