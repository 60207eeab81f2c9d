//! Identifier-safe aliases for JSON object keys.
use std::borrow::Cow;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Strip every character that can not appear in a typical identifier.
///
/// Letters, letter numbers, decimal digits, combining marks, format controls and
/// connector punctuation are kept, everything else is dropped. The input is borrowed
/// as-is when there is nothing to remove.
///
/// ```rust
/// assert_eq!(dynjson::normalize("foo-bar"), "foobar");
/// assert_eq!(dynjson::normalize("snake_case"), "snake_case");
/// assert_eq!(dynjson::normalize("$.@"), "");
/// ```
#[must_use]
pub fn normalize(key: &str) -> Cow<'_, str> {
    if key.chars().all(is_identifier_char) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(key.chars().filter(|c| is_identifier_char(*c)).collect())
    }
}

/// Key under which an alias is stored and looked up.
///
/// Aliases are case-insensitive, so `userName` and `username` both reach `user-name`.
pub(crate) fn alias_key(key: &str) -> String {
    normalize(key).to_lowercase()
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    // ASCII fast path
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::LetterNumber
            | GeneralCategory::DecimalNumber
            | GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::Format
            | GeneralCategory::ConnectorPunctuation
    )
}
