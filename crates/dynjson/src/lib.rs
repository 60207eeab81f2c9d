//! # dynjson
//!
//! Dynamic, property-style access to JSON documents.
//!
//! A parsed document is wrapped into a [`DynamicNode`]: nested objects become nested nodes,
//! arrays are wrapped item by item and string leaves that look like dates or absolute URIs are
//! read as [`chrono::DateTime`] and [`url::Url`] values. Members are reachable by their exact
//! key or by an identifier-style alias with punctuation removed.
//!
//! ```rust
//! use dynjson::DynamicNode;
//!
//! # fn example() -> Result<(), dynjson::Error> {
//! let response = DynamicNode::parse(r#"{
//!     "user": {"first-name": "Ann", "profile": "https://example.com/ann"},
//!     "items": [{"x": 1}, {"x": 2}]
//! }"#)?;
//!
//! let user = response.get("user").expect("present");
//! assert_eq!(user.get("firstName").and_then(|f| f.as_str()), Some("Ann"));
//! assert!(user.get("profile").and_then(|f| f.as_uri()).is_some());
//! assert_eq!(response.path("items.1.x").and_then(|f| f.as_i64()), Some(2));
//!
//! // Permissive access yields `None`, strict access fails
//! assert!(response.get("missing").is_none());
//! assert!(response.try_get("missing").is_err());
//! # Ok(())
//! # }
//! ```
mod coerce;
mod error;
mod field;
mod node;
mod normalize;
mod options;
mod path;

pub use coerce::Locale;
pub use error::Error;
pub use field::Field;
pub use node::DynamicNode;
pub use normalize::normalize;
pub use options::Options;

use serde::Serialize;

/// Parse JSON text with the default [`Options`].
///
/// # Errors
///
/// Returns [`Error::Parse`] if `text` is not valid JSON.
pub fn parse(text: &str) -> Result<DynamicNode, Error> {
    DynamicNode::parse(text)
}

/// Serialize an in-memory value into compact JSON text.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if `value` can not be represented as JSON.
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(Error::Serialize)
}
