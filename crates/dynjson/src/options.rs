use std::io::Read;

use serde::Serialize;
use serde_json::Value;

use crate::{coerce::Locale, DynamicNode, Error, Field};

/// Configuration for building [`DynamicNode`] instances.
///
/// ```rust
/// use dynjson::{Locale, Options};
///
/// # fn example() -> Result<(), dynjson::Error> {
/// let node = Options::new()
///     .with_locale(Locale::DayFirst)
///     .coerce_uris(false)
///     .parse(r#"{"born": "05/01/2021", "home": "https://example.com"}"#)?;
///
/// assert!(node.get("born").and_then(|f| f.as_datetime()).is_some());
/// assert_eq!(node.get("home").and_then(|f| f.as_str()), Some("https://example.com"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    locale: Locale,
    dates: bool,
    uris: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

impl Options {
    /// Options with every coercion step enabled and the invariant locale.
    #[must_use]
    pub const fn new() -> Options {
        Options {
            locale: Locale::Invariant,
            dates: true,
            uris: true,
        }
    }

    /// Date conventions tried after the ISO forms.
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Options {
        self.locale = locale;
        self
    }

    /// Whether strings that look like dates are read as date-times.
    #[must_use]
    pub const fn coerce_dates(mut self, yes: bool) -> Options {
        self.dates = yes;
        self
    }

    /// Whether absolute URIs are read as [`url::Url`] values.
    #[must_use]
    pub const fn coerce_uris(mut self, yes: bool) -> Options {
        self.uris = yes;
        self
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub const fn coerces_dates(&self) -> bool {
        self.dates
    }

    #[must_use]
    pub const fn coerces_uris(&self) -> bool {
        self.uris
    }

    /// Apply the coercion pipeline to a single string.
    ///
    /// This is what every string leaf goes through during construction.
    #[must_use]
    pub fn coerce(&self, value: &str) -> Field {
        crate::coerce::coerce(value, self)
    }

    /// Wrap an already parsed JSON value.
    #[must_use]
    pub fn build(&self, value: Value) -> DynamicNode {
        DynamicNode::build_with(value, self)
    }

    /// Parse JSON text and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `text` is not valid JSON.
    pub fn parse(&self, text: &str) -> Result<DynamicNode, Error> {
        let value = serde_json::from_str(text)?;
        tracing::debug!(bytes = text.len(), "Parsed JSON document");
        Ok(self.build(value))
    }

    /// Parse JSON bytes and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `bytes` are not valid JSON.
    pub fn from_slice(&self, bytes: &[u8]) -> Result<DynamicNode, Error> {
        let value = serde_json::from_slice(bytes)?;
        tracing::debug!(bytes = bytes.len(), "Parsed JSON document");
        Ok(self.build(value))
    }

    /// Read JSON from `reader` and wrap the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the reader fails or yields invalid JSON.
    pub fn from_reader(&self, reader: impl Read) -> Result<DynamicNode, Error> {
        let value = serde_json::from_reader(reader)?;
        Ok(self.build(value))
    }

    /// Convert an in-memory value into JSON and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if `value` can not be represented as JSON, for example a map
    /// with non-string keys.
    pub fn from_serializable<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<DynamicNode, Error> {
        let value = serde_json::to_value(value).map_err(Error::Serialize)?;
        Ok(self.build(value))
    }
}
