//! Half-day-granular day counts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RosterError;

/// Working days in one scheduling week (Mon..Fri).
pub const WORKDAYS_PER_WEEK: u32 = 5;

/// A number of days in half-day steps, between 0 and one full work week.
///
/// Stored as a count of half days so arithmetic stays exact.
/// Serialized as a plain number (`2.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DayCount {
    halves: u32,
}

impl DayCount {
    /// Zero days.
    pub const ZERO: DayCount = DayCount { halves: 0 };

    /// One full work week.
    pub const FULL_WEEK: DayCount = DayCount {
        halves: WORKDAYS_PER_WEEK * 2,
    };

    /// Validates a fractional day count.
    ///
    /// Accepts 0, 0.5, 1, ..., 5. Anything else (negative, NaN, above a
    /// week, or not a half-day multiple) is rejected.
    pub fn from_days(days: f64) -> Result<Self, RosterError> {
        let doubled = days * 2.0;
        let in_range = days.is_finite() && (0.0..=WORKDAYS_PER_WEEK as f64).contains(&days);
        if !in_range || doubled.fract() != 0.0 {
            return Err(RosterError::InvalidDayIncrement(days));
        }
        Ok(Self {
            halves: doubled as u32,
        })
    }

    /// Builds a count from a number of half days, capped at a full week.
    pub fn from_halves(halves: u32) -> Self {
        Self {
            halves: halves.min(Self::FULL_WEEK.halves),
        }
    }

    /// Number of half days.
    #[inline]
    pub fn halves(self) -> u32 {
        self.halves
    }

    /// Whole days (floor).
    #[inline]
    pub fn full_days(self) -> u32 {
        self.halves / 2
    }

    /// Whether a trailing half day exists.
    #[inline]
    pub fn has_half_day(self) -> bool {
        self.halves % 2 == 1
    }

    /// Whether this count is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.halves == 0
    }

    /// Value in days.
    pub fn as_days(self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl TryFrom<f64> for DayCount {
    type Error = RosterError;

    fn try_from(days: f64) -> Result<Self, Self::Error> {
        Self::from_days(days)
    }
}

impl From<DayCount> for f64 {
    fn from(count: DayCount) -> Self {
        count.as_days()
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_days())
    }
}
