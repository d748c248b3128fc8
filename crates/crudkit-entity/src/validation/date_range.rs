//! Struct-level "start is not after end" rule.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use validator::ValidationError;

use crate::accessor::FieldAccessor;
use crate::reflect::Reflect;
use crate::value::FieldValue;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Checks that the value of `start_field` is not after `end_field`.
///
/// Dates, naive date-times, UTC timestamps and strings are supported; both
/// fields must hold the same kind. Strings are parsed with `pattern` when
/// given, otherwise with the common ISO, `yyyy-MM-dd[ HH:mm[:ss]]` and
/// compact `yyyyMMdd[HHmmss]` layouts.
///
/// ```ignore
/// const STAY: DateRange = DateRange::new("check_in", "check_out");
///
/// #[derive(Validate)]
/// #[validate(schema(function = "check_stay"))]
/// struct Booking { /* ... */ }
///
/// fn check_stay(booking: &Booking) -> Result<(), ValidationError> {
///     STAY.check(booking)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start_field: &'static str,
    end_field: &'static str,
    pattern: Option<&'static str>,
}

impl DateRange {
    pub const fn new(start_field: &'static str, end_field: &'static str) -> Self {
        Self {
            start_field,
            end_field,
            pattern: None,
        }
    }

    /// Parse string values with a `chrono` format string.
    pub const fn with_pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Run the rule against `target`.
    pub fn check(&self, target: &dyn Reflect) -> Result<(), ValidationError> {
        let start = FieldAccessor::get(target, self.start_field).unwrap_or(FieldValue::Null);
        let end = FieldAccessor::get(target, self.end_field).unwrap_or(FieldValue::Null);
        if start.is_null() || end.is_null() {
            return Ok(());
        }

        if start.kind() != end.kind() {
            return Err(range_error(
                "Start and end dates must have the same type".to_string(),
            ));
        }

        let ordering = match (&start, &end) {
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => {
                let a = self.parse(a)?;
                let b = self.parse(b)?;
                a.cmp(&b)
            }
            (other, _) => {
                return Err(range_error(format!(
                    "Unsupported date type: {}",
                    other.kind()
                )));
            }
        };

        if ordering == Ordering::Greater {
            return Err(range_error(format!(
                "Start {start} must not be after end {end}"
            )));
        }
        Ok(())
    }

    fn parse(&self, raw: &str) -> Result<NaiveDateTime, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(range_error("Date string is empty".to_string()));
        }
        let parsed = match self.pattern {
            Some(pattern) => parse_with(raw, pattern),
            None => parse_common(raw),
        };
        parsed.ok_or_else(|| range_error(format!("Unsupported date format: {raw}")))
    }
}

fn parse_with(raw: &str, pattern: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, pattern)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_common(raw: &str) -> Option<NaiveDateTime> {
    if raw.contains('T') {
        if let Ok(parsed) = raw.parse::<NaiveDateTime>() {
            return Some(parsed);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    if let Some(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(date);
    }

    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match raw.len() {
        8 => parse_with(
            &format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8]),
            "%Y-%m-%d",
        ),
        14 => parse_with(
            &format!(
                "{}-{}-{} {}:{}:{}",
                &raw[..4],
                &raw[4..6],
                &raw[6..8],
                &raw[8..10],
                &raw[10..12],
                &raw[12..14]
            ),
            "%Y-%m-%d %H:%M:%S",
        ),
        _ => None,
    }
}

fn range_error(message: String) -> ValidationError {
    ValidationError::new("date_range").with_message(Cow::Owned(message))
}
