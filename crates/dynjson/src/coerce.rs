//! Best-effort reinterpretation of string leaves as richer values.
//!
//! The pipeline is ordered and the first match wins:
//!
//! 1. date-time (ISO 8601 / RFC 3339, RFC 2822, then the patterns of the configured [`Locale`]);
//! 2. absolute URI with an authority component (`https://example.com/a`);
//! 3. the string itself.
//!
//! Every step is a heuristic. A string that merely looks like a date is read as one.
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use url::Url;

use crate::{Field, Options};

/// Date-time patterns without an offset, read as UTC.
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

/// Locale-specific date conventions used after the ISO forms fail.
///
/// The locale is always explicit configuration, so the same input reads the same way on every
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Culture-neutral conventions: ISO forms plus month-first `MM/DD/YYYY`.
    #[default]
    Invariant,
    /// `MM/DD/YYYY` with optional 24-hour or 12-hour (`AM`/`PM`) time.
    UnitedStates,
    /// `DD/MM/YYYY` and `DD.MM.YYYY` with optional 24-hour time.
    DayFirst,
}

impl Locale {
    fn datetime_formats(self) -> &'static [&'static str] {
        match self {
            Locale::Invariant => &["%m/%d/%Y %H:%M:%S"],
            Locale::UnitedStates => &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %I:%M:%S %p"],
            Locale::DayFirst => &["%d/%m/%Y %H:%M:%S", "%d.%m.%Y %H:%M:%S"],
        }
    }

    fn date_formats(self) -> &'static [&'static str] {
        match self {
            Locale::Invariant | Locale::UnitedStates => &["%m/%d/%Y"],
            Locale::DayFirst => &["%d/%m/%Y", "%d.%m.%Y"],
        }
    }
}

/// Run the coercion pipeline over a single string leaf.
pub(crate) fn coerce(value: &str, options: &Options) -> Field {
    if options.coerces_dates() {
        if let Some(datetime) = parse_datetime(value, options.locale()) {
            tracing::trace!(value, %datetime, "String coerced to a date-time");
            return Field::DateTime(datetime);
        }
    }
    if options.coerces_uris() {
        if let Some(uri) = parse_absolute_uri(value) {
            tracing::trace!(value, "String coerced to a URI");
            return Field::Uri(uri);
        }
    }
    Field::String(value.to_owned())
}

pub(crate) fn parse_datetime(value: &str, locale: Locale) -> Option<DateTime<FixedOffset>> {
    // Every supported pattern starts with a digit or, for RFC 2822, a day or month name.
    if !value.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return None;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(value) {
        return Some(datetime);
    }
    let naive = ISO_DATETIME_FORMATS
        .iter()
        .chain(locale.datetime_formats())
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            ISO_DATE_FORMATS
                .iter()
                .chain(locale.date_formats())
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}

pub(crate) fn parse_absolute_uri(value: &str) -> Option<Url> {
    // Cheap rejection before running the full URL parser
    if !value.contains("://") {
        return None;
    }
    Url::parse(value).ok().filter(Url::has_host)
}

#[cfg(test)]
mod tests {
    use super::{coerce, parse_absolute_uri, parse_datetime, Locale};
    use crate::{Field, Options};
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
    use test_case::test_case;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .expect("Valid date")
            .fixed_offset()
    }

    #[test_case("2020-01-01T00:00:00Z", utc(2020, 1, 1, 0, 0, 0); "rfc3339 utc")]
    #[test_case("2020-01-01T02:00:00+02:00", utc(2020, 1, 1, 0, 0, 0); "rfc3339 offset")]
    #[test_case("Wed, 01 Jan 2020 00:00:00 +0000", utc(2020, 1, 1, 0, 0, 0); "rfc2822")]
    #[test_case("2020-01-01T10:20:30", utc(2020, 1, 1, 10, 20, 30); "naive datetime")]
    #[test_case("2020-01-01 10:20:30", utc(2020, 1, 1, 10, 20, 30); "space separated")]
    #[test_case("2020-01-01T10:20", utc(2020, 1, 1, 10, 20, 0); "without seconds")]
    #[test_case("2021-05-01", utc(2021, 5, 1, 0, 0, 0); "date only")]
    #[test_case("05/01/2021", utc(2021, 5, 1, 0, 0, 0); "month first")]
    #[test_case("05/01/2021 13:14:15", utc(2021, 5, 1, 13, 14, 15); "month first with time")]
    fn invariant_dates(input: &str, expected: DateTime<FixedOffset>) {
        assert_eq!(parse_datetime(input, Locale::Invariant), Some(expected));
    }

    #[test]
    fn offset_is_preserved() {
        let parsed = parse_datetime("2020-01-01T02:00:00+02:00", Locale::Invariant)
            .expect("Valid date");
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    }

    #[test_case(Locale::Invariant, "05/01/2021", (2021, 5, 1))]
    #[test_case(Locale::UnitedStates, "05/01/2021", (2021, 5, 1))]
    #[test_case(Locale::DayFirst, "05/01/2021", (2021, 1, 5))]
    #[test_case(Locale::DayFirst, "05.01.2021", (2021, 1, 5))]
    fn locale_dates(locale: Locale, input: &str, (y, m, d): (i32, u32, u32)) {
        let parsed = parse_datetime(input, locale).expect("Valid date");
        assert_eq!(
            parsed.date_naive(),
            NaiveDate::from_ymd_opt(y, m, d).expect("Valid date")
        );
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(
            parse_datetime("05/01/2021 01:14:15 PM", Locale::UnitedStates),
            Some(utc(2021, 5, 1, 13, 14, 15))
        );
        assert_eq!(
            parse_datetime("05/01/2021 01:14:15 PM", Locale::Invariant),
            None
        );
    }

    #[test_case("hello")]
    #[test_case("12345")]
    #[test_case("2020")]
    #[test_case("13/45/2020")]
    #[test_case("2020-13-01")]
    #[test_case("")]
    #[test_case(" 2020-01-01")]
    fn not_dates(input: &str) {
        assert_eq!(parse_datetime(input, Locale::Invariant), None);
    }

    #[test_case("https://example.com/a")]
    #[test_case("http://localhost:8080/api?q=1")]
    #[test_case("ftp://files.example.com/pub")]
    fn absolute_uris(input: &str) {
        let uri = parse_absolute_uri(input).expect("Absolute URI");
        assert!(uri.has_host());
    }

    #[test_case("/relative/path")]
    #[test_case("example.com/a")]
    #[test_case("mailto:someone@example.com")]
    #[test_case("urn:isbn:0451450523")]
    #[test_case("hello")]
    fn not_absolute_uris(input: &str) {
        assert!(parse_absolute_uri(input).is_none());
    }

    #[test]
    fn dates_win_over_uris() {
        let field = coerce("2020-01-01T00:00:00Z", &Options::new());
        assert!(matches!(field, Field::DateTime(_)));
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(coerce("hello", &Options::new()), Field::String("hello".into()));
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let options = Options::new().coerce_dates(false).coerce_uris(false);
        assert_eq!(
            coerce("2020-01-01", &options),
            Field::String("2020-01-01".into())
        );
        assert_eq!(
            coerce("https://example.com", &options),
            Field::String("https://example.com".into())
        );
    }
}
