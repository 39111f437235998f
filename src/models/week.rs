//! Work-week windows and date normalization.
//!
//! # Date Model
//! Assignment dates are timezone-naive calendar days. Every date that
//! enters the calendar goes through [`normalize_date`], so a cell lookup
//! never drifts between a `YYYY-MM-DD` string and a timestamp on the
//! same day.
//!
//! Timestamps carrying an offset keep the calendar day as written
//! (`2024-06-12T23:30:00-05:00` is June 12), not the UTC day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::WORKDAYS_PER_WEEK;
use crate::error::RosterError;

/// Canonical date format for assignment keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date value as it arrives from a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Already a calendar day.
    Date(NaiveDate),
    /// A naive timestamp; the date part is kept.
    DateTime(NaiveDateTime),
    /// Text: `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DDTHH:MM[:SS]`.
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::DateTime(dt.naive_local())
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl From<&String> for DateInput {
    fn from(s: &String) -> Self {
        DateInput::Text(s.clone())
    }
}

/// Normalizes a date input to a calendar day.
///
/// Unparseable text is an error; there is no fallback to the current date.
pub fn normalize_date(input: impl Into<DateInput>) -> Result<NaiveDate, RosterError> {
    match input.into() {
        DateInput::Date(d) => Ok(d),
        DateInput::DateTime(dt) => Ok(dt.date()),
        DateInput::Text(s) => parse_date_text(&s),
    }
}

fn parse_date_text(raw: &str) -> Result<NaiveDate, RosterError> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(RosterError::InvalidDate(raw.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A Monday-aligned five-day scheduling window.
///
/// Serialized as its Monday. Deserializing any date snaps to the Monday
/// on or before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct WorkWeek {
    monday: NaiveDate,
}

impl From<NaiveDate> for WorkWeek {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

impl From<WorkWeek> for NaiveDate {
    fn from(week: WorkWeek) -> Self {
        week.monday
    }
}

impl WorkWeek {
    /// The work week containing `date`.
    ///
    /// Any day of the week maps to the Monday on or before it, so a
    /// Saturday start plans the week that just ended.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(offset),
        }
    }

    /// Monday of this week.
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.monday
    }

    /// Friday of this week.
    pub fn end(&self) -> NaiveDate {
        self.monday + Duration::days(WORKDAYS_PER_WEEK as i64 - 1)
    }

    /// Date of the weekday at `index` (0 = Monday). `None` past Friday.
    pub fn day(&self, index: u32) -> Option<NaiveDate> {
        (index < WORKDAYS_PER_WEEK).then(|| self.monday + Duration::days(index as i64))
    }

    /// Mon..Fri dates.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..WORKDAYS_PER_WEEK).filter_map(move |i| self.day(i))
    }

    /// Whether `date` is one of this week's workdays.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.end()
    }

    /// The following work week.
    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }
}

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
