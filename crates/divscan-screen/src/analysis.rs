//! Runs the full divergence analysis for a single price series.

use std::collections::HashMap;

use chrono::NaiveDate;
use divscan_divergence::{
    DEFAULT_MAX_AGE_DAYS, DivergenceError, DivergenceEvent, DivergenceKind, PivotKind, PivotMark,
    PivotParams, classify_divergences, find_pivots, is_currently_actionable, latest_bullish,
    price_pivots,
};
use divscan_macd::{MacdParams, OscillatorPoint, compute_macd};
use divscan_types::{DatedValue, DivscanError, Result, Series};
use serde::{Deserialize, Serialize};

/// Tuning knobs for a single-ticker analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenParams {
    /// Oscillator periods.
    pub macd: MacdParams,
    /// Swing pivot lookback windows.
    pub pivots: PivotParams,
    /// Maximum age in calendar days for a bullish event to count as actionable.
    pub max_age_days: i64,
}

impl ScreenParams {
    /// Creates screen parameters from explicit components.
    #[must_use]
    pub const fn new(macd: MacdParams, pivots: PivotParams, max_age_days: i64) -> Self {
        Self {
            macd,
            pivots,
            max_age_days,
        }
    }
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            macd: MacdParams::default(),
            pivots: PivotParams::default(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }
}

/// Everything the analysis produced for one ticker.
///
/// The oscillator covers a date suffix of the input series; pivots are
/// detected only on that covered region, so every mark and event lines up
/// with an oscillator point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerAnalysis {
    /// MACD and signal line per covered bar.
    pub oscillator: Vec<OscillatorPoint>,
    /// Swing pivots detected on the price low and high columns.
    pub price_pivots: Vec<PivotMark>,
    /// Swing pivots detected on the MACD line.
    pub oscillator_pivots: Vec<PivotMark>,
    /// Classified divergence events in date order.
    pub events: Vec<DivergenceEvent>,
    /// Whether the most recent bullish-class event is fresh enough to act on.
    pub actionable: bool,
}

impl TickerAnalysis {
    /// Most recent bullish or hidden-bullish event, if any.
    #[must_use]
    pub fn latest_bullish(&self) -> Option<&DivergenceEvent> {
        latest_bullish(&self.events)
    }

    /// Builds one merged row per input bar for chart-overlay export.
    #[must_use]
    pub fn overlay_rows(&self, series: &Series) -> Vec<OverlayRow> {
        let offset = series.len() - self.oscillator.len();
        let price_marks = marks_by_date(&self.price_pivots);
        let oscillator_marks = marks_by_date(&self.oscillator_pivots);
        let events: HashMap<NaiveDate, DivergenceKind> = self
            .events
            .iter()
            .map(|event| (event.date, event.kind))
            .collect();

        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let point = i.checked_sub(offset).map(|j| &self.oscillator[j]);
                let (price_low, price_high) = marked_values(&price_marks, bar.date);
                let (oscillator_low, oscillator_high) = marked_values(&oscillator_marks, bar.date);
                OverlayRow {
                    date: bar.date,
                    close: bar.close,
                    low: bar.low,
                    high: bar.high,
                    macd: point.map(|p| p.macd),
                    signal: point.map(|p| p.signal),
                    price_pivot_low: price_low,
                    price_pivot_high: price_high,
                    oscillator_pivot_low: oscillator_low,
                    oscillator_pivot_high: oscillator_high,
                    divergence: events.get(&bar.date).copied(),
                }
            })
            .collect()
    }
}

/// One export row merging price, oscillator, pivot, and event data for a date.
///
/// Pivot columns carry the marked value itself so a plotting tool can use
/// them directly as scatter input; unmarked dates stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRow {
    /// Bar date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Session low.
    pub low: f64,
    /// Session high.
    pub high: f64,
    /// MACD line value, when the oscillator covers this date.
    pub macd: Option<f64>,
    /// Signal line value, when the oscillator covers this date.
    pub signal: Option<f64>,
    /// Session low, when this date is a price low pivot.
    pub price_pivot_low: Option<f64>,
    /// Session high, when this date is a price high pivot.
    pub price_pivot_high: Option<f64>,
    /// MACD value, when this date is an oscillator low pivot.
    pub oscillator_pivot_low: Option<f64>,
    /// MACD value, when this date is an oscillator high pivot.
    pub oscillator_pivot_high: Option<f64>,
    /// Divergence event classified at this date, if any.
    pub divergence: Option<DivergenceKind>,
}

/// Runs the oscillator, pivot, divergence, and recency stages over one series.
///
/// A series too short for the oscillator warm-up yields an empty analysis
/// with `actionable` false rather than an error.
///
/// # Errors
///
/// Returns [`DivscanError::MissingOscillator`] if an oscillator date has no
/// matching price bar, which cannot happen for an oscillator computed from
/// the same series.
pub fn analyze(series: &Series, params: &ScreenParams) -> Result<TickerAnalysis> {
    let oscillator = compute_macd(series, &params.macd);
    let events =
        classify_divergences(series, &oscillator, &params.pivots).map_err(|err| match err {
            DivergenceError::MissingOscillator { date } => DivscanError::MissingOscillator { date },
        })?;

    // The oscillator is a date suffix of the series, so the covered bars
    // are exactly the trailing slice of the same length.
    let covered = &series.bars()[series.len() - oscillator.len()..];
    let price_pivots = price_pivots(covered, &params.pivots);

    let macd_line: Vec<DatedValue> = oscillator
        .iter()
        .map(|point| DatedValue::new(point.date, point.macd))
        .collect();
    let oscillator_pivots = find_pivots(&macd_line, &params.pivots);

    let actionable = series
        .last_date()
        .is_some_and(|last| is_currently_actionable(&events, last, params.max_age_days));

    Ok(TickerAnalysis {
        oscillator,
        price_pivots,
        oscillator_pivots,
        events,
        actionable,
    })
}

fn marks_by_date(marks: &[PivotMark]) -> HashMap<NaiveDate, (Option<f64>, Option<f64>)> {
    let mut by_date: HashMap<NaiveDate, (Option<f64>, Option<f64>)> = HashMap::new();
    for mark in marks {
        let entry = by_date.entry(mark.date).or_default();
        match mark.kind {
            PivotKind::Low => entry.0 = Some(mark.value),
            PivotKind::High => entry.1 = Some(mark.value),
        }
    }
    by_date
}

fn marked_values(
    by_date: &HashMap<NaiveDate, (Option<f64>, Option<f64>)>,
    date: NaiveDate,
) -> (Option<f64>, Option<f64>) {
    by_date.get(&date).copied().unwrap_or((None, None))
}
