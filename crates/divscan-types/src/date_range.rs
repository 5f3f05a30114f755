//! Calendar window for series retrieval.

use chrono::{NaiveDate, TimeDelta};

use crate::DateRangeError;

/// A window of calendar dates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First date in the window.
    pub start: NaiveDate,
    /// Last date in the window.
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::InvalidRange`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(DateRangeError::InvalidRange { start, end })
        }
    }

    /// Builds the window reaching back `days` calendar days from `end`.
    ///
    /// `trailing(end, 365)` starts 365 days before `end`, matching a
    /// one-year lookback. Negative `days` is treated as zero.
    #[must_use]
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - TimeDelta::days(days.max(0)),
            end,
        }
    }

    /// Number of calendar days the window spans.
    #[must_use]
    pub fn total_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
