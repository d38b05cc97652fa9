//! Display formatting for check-in and cooldown end dates.
//!
//! Dates render as zero-padded month and day in the zh-CN template
//! `MM月DD日`. The year is dropped, so the output is display-only.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Sentinel rendered for anything that is not a valid date.
pub const INVALID_DATE: &str = "无效日期";

const DISPLAY_PATTERN: &str = "%m月%d日";

/// Anything the formatter knows how to turn into a calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateLike<'a> {
    Date(NaiveDate),
    /// Wall-clock time, already in local time.
    DateTime(NaiveDateTime),
    Text(&'a str),
}

impl From<NaiveDate> for DateLike<'_> {
    fn from(date: NaiveDate) -> Self {
        DateLike::Date(date)
    }
}

impl From<NaiveDateTime> for DateLike<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        DateLike::DateTime(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateLike<'_> {
    fn from(dt: DateTime<Tz>) -> Self {
        DateLike::DateTime(dt.with_timezone(&Local).naive_local())
    }
}

impl<'a> From<&'a str> for DateLike<'a> {
    fn from(s: &'a str) -> Self {
        DateLike::Text(s)
    }
}

impl<'a> From<&'a String> for DateLike<'a> {
    fn from(s: &'a String) -> Self {
        DateLike::Text(s.as_str())
    }
}

impl DateLike<'_> {
    /// Resolve to a calendar date, or `None` if the input is not a date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            DateLike::Date(d) => Some(*d),
            DateLike::DateTime(dt) => Some(dt.date()),
            DateLike::Text(s) => parse_loose_date(s),
        }
    }
}

/// Render a date as `MM月DD日`, or [`INVALID_DATE`] when it cannot be parsed.
pub fn format_display_date<'a>(input: impl Into<DateLike<'a>>) -> String {
    match input.into().to_date() {
        Some(date) => render(date),
        None => INVALID_DATE.to_string(),
    }
}

pub(crate) fn render(date: NaiveDate) -> String {
    date.format(DISPLAY_PATTERN).to_string()
}

/// Lenient parse used for display only: ISO dates, slash dates, and
/// timestamps with or without an offset.
fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for pattern in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, pattern) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt.date());
        }
    }

    None
}
