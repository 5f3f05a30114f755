//! Recency gate over divergence events.

use chrono::NaiveDate;

use crate::DivergenceEvent;

/// Default maximum age, in calendar days, for an actionable event.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 5;

/// Returns the latest bullish-class event, if any.
#[must_use]
pub fn latest_bullish(events: &[DivergenceEvent]) -> Option<&DivergenceEvent> {
    events
        .iter()
        .filter(|event| event.kind.is_bullish())
        .max_by_key(|event| event.date)
}

/// Returns true when the latest bullish-class event is recent enough to
/// act on.
///
/// Age is measured in calendar days from the event date to
/// `series_last_date`, so weekends and holidays count against the window.
/// No bullish-class events means no signal.
#[must_use]
pub fn is_currently_actionable(
    events: &[DivergenceEvent],
    series_last_date: NaiveDate,
    max_age_days: i64,
) -> bool {
    latest_bullish(events)
        .is_some_and(|event| (series_last_date - event.date).num_days() <= max_age_days)
}
