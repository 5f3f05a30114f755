//! Daily price bars and date-ordered series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single daily price bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading session date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the session price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if the session closed above its open.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.close > self.open
    }
}

/// A single column value keyed by session date.
///
/// Pivot detection operates on sequences of these, so price columns and
/// oscillator columns can be scanned by the same code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    /// Session date.
    pub date: NaiveDate,
    /// The value on that date.
    pub value: f64,
}

impl DatedValue {
    /// Creates a new dated value.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Error for invalid bar sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    /// Bars are not in ascending date order.
    #[error("Bars out of order: {prev} followed by {next}")]
    OutOfOrder {
        /// Date of the earlier bar.
        prev: NaiveDate,
        /// Date of the bar that breaks the order.
        next: NaiveDate,
    },

    /// Two bars share the same date.
    #[error("Duplicate bar date: {date}")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },
}

/// A daily price series with strictly increasing dates.
///
/// Ordering is enforced at construction; every derived sequence (oscillator,
/// pivots, divergence events) inherits it. Calendar gaps (weekends, halts)
/// are simply absent bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Creates a series from bars, validating strict date order.
    ///
    /// # Errors
    ///
    /// Returns an error if any bar's date is not strictly after the
    /// previous bar's date.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(SeriesError::DuplicateDate { date: pair[1].date });
            }
            if pair[1].date < pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { bars })
    }

    /// Creates an empty series.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    /// Returns the bars in date order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the bar at the given position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Returns the date of the last bar.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Returns the bar for the given date, if one exists.
    #[must_use]
    pub fn bar_on(&self, date: NaiveDate) -> Option<&Bar> {
        // Dates are strictly increasing, so binary search applies.
        self.bars
            .binary_search_by_key(&date, |bar| bar.date)
            .ok()
            .map(|index| &self.bars[index])
    }

    /// Returns the close column keyed by date.
    #[must_use]
    pub fn closes(&self) -> Vec<DatedValue> {
        self.column(|bar| bar.close)
    }

    /// Returns the low column keyed by date.
    #[must_use]
    pub fn lows(&self) -> Vec<DatedValue> {
        self.column(|bar| bar.low)
    }

    /// Returns the high column keyed by date.
    #[must_use]
    pub fn highs(&self) -> Vec<DatedValue> {
        self.column(|bar| bar.high)
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    fn column(&self, field: impl Fn(&Bar) -> f64) -> Vec<DatedValue> {
        self.bars
            .iter()
            .map(|bar| DatedValue::new(bar.date, field(bar)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
