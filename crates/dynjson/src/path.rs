//! Dotted navigation through nested nodes: `user.address.city`, `items.0.x`.
//!
//! Segments are separated by `.`; a literal dot inside a key is written as `\.`.
//! Each segment is resolved with the permissive lookup rules, so aliases work at every level.
use std::borrow::Cow;

use crate::{DynamicNode, Field};

/// Iterator over the segments of a dotted path.
#[derive(Debug)]
pub(crate) struct Segments<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Segments<'a> {
    #[inline]
    pub(crate) fn new(path: &'a str) -> Self {
        Segments {
            remaining: if path.is_empty() { None } else { Some(path) },
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining?;
        let bytes = rest.as_bytes();
        let mut escaped = false;
        let mut idx = 0;
        while idx < bytes.len() {
            match bytes[idx] {
                b'\\' if bytes.get(idx + 1) == Some(&b'.') => {
                    escaped = true;
                    idx += 2;
                }
                b'.' => {
                    self.remaining = Some(&rest[idx + 1..]);
                    return Some(unescape(&rest[..idx], escaped));
                }
                _ => idx += 1,
            }
        }
        self.remaining = None;
        Some(unescape(rest, escaped))
    }
}

fn unescape(segment: &str, escaped: bool) -> Cow<'_, str> {
    if escaped {
        Cow::Owned(segment.replace("\\.", "."))
    } else {
        Cow::Borrowed(segment)
    }
}

pub(crate) fn resolve<'f>(field: &'f Field, path: &str) -> Option<&'f Field> {
    Segments::new(path).try_fold(field, |current, segment| current.get(&segment))
}

pub(crate) fn resolve_from_node<'n>(node: &'n DynamicNode, path: &str) -> Option<&'n Field> {
    let mut segments = Segments::new(path);
    let first = node.get(&segments.next()?)?;
    segments.try_fold(first, |current, segment| current.get(&segment))
}

#[cfg(test)]
mod tests {
    use super::Segments;
    use crate::DynamicNode;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("", &[])]
    #[test_case("a", &["a"])]
    #[test_case("a.b.c", &["a", "b", "c"])]
    #[test_case("items.0.x", &["items", "0", "x"])]
    #[test_case(r"a\.b.c", &["a.b", "c"])]
    #[test_case("a..b", &["a", "", "b"])]
    #[test_case("a.", &["a", ""])]
    #[test_case(r"a\b", &[r"a\b"])]
    fn segments(path: &str, expected: &[&str]) {
        let segments: Vec<_> = Segments::new(path).collect();
        assert_eq!(segments, expected);
    }

    #[test]
    fn navigates_objects_and_arrays() {
        let node = DynamicNode::build(json!({
            "user": {"address": {"city": "Oslo"}},
            "items": [{"x": 1}, {"x": 2}],
            "matrix": [[1, 2], [3, 4]],
            "a.b": {"c": true}
        }));
        assert_eq!(node.path("user.address.city").and_then(|f| f.as_str()), Some("Oslo"));
        assert_eq!(node.path("items.1.x").and_then(|f| f.as_u64()), Some(2));
        assert_eq!(node.path("matrix.1.0").and_then(|f| f.as_u64()), Some(3));
        assert_eq!(node.path(r"a\.b.c").and_then(|f| f.as_bool()), Some(true));
        // Alias of `a.b`
        assert_eq!(node.path("ab.c").and_then(|f| f.as_bool()), Some(true));
    }

    #[test]
    fn missing_segments_are_absent() {
        let node = DynamicNode::build(json!({"user": {"name": "Ann"}}));
        assert!(node.path("").is_none());
        assert!(node.path("user.email").is_none());
        assert!(node.path("user.name.first").is_none());
        assert!(node.path("nobody.name").is_none());
    }

    #[test]
    fn root_arrays() {
        let node = DynamicNode::build(json!([{"id": 7}]));
        assert_eq!(node.path("0.id").and_then(|f| f.as_u64()), Some(7));
        assert!(node.path("1.id").is_none());
    }

    #[test]
    fn field_paths() {
        let node = DynamicNode::build(json!({"outer": {"inner": {"leaf": 1}}}));
        let outer = node.get("outer").expect("Key exists");
        assert_eq!(outer.path("inner.leaf").and_then(|f| f.as_u64()), Some(1));
        assert_eq!(outer.path(""), Some(outer));
    }
}
