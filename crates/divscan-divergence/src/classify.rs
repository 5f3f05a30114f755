//! Price/oscillator divergence classification.

use chrono::NaiveDate;
use derive_more::Display;
use divscan_macd::OscillatorPoint;
use divscan_types::Series;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PivotKind, PivotParams, pivot_indices};

/// Divergence class.
///
/// Regular divergences fade the prevailing move; hidden divergences back
/// its continuation. Bullish classes fire only below the oscillator zero
/// line, bearish classes only above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum DivergenceKind {
    /// Lower price low against a higher oscillator low.
    #[display("bullish")]
    Bullish,
    /// Higher price low against a lower oscillator low.
    #[display("hidden-bullish")]
    HiddenBullish,
    /// Higher price high against a lower oscillator high.
    #[display("bearish")]
    Bearish,
    /// Lower price high against a higher oscillator high.
    #[display("hidden-bearish")]
    HiddenBearish,
}

impl DivergenceKind {
    /// Returns true for the bullish classes, regular and hidden.
    #[must_use]
    pub const fn is_bullish(&self) -> bool {
        matches!(self, Self::Bullish | Self::HiddenBullish)
    }
}

/// A classified divergence, anchored at the later pivot of its pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceEvent {
    /// Date of the confirming pivot bar.
    pub date: NaiveDate,
    /// The divergence class.
    pub kind: DivergenceKind,
}

impl DivergenceEvent {
    /// Creates a new divergence event.
    #[must_use]
    pub const fn new(date: NaiveDate, kind: DivergenceKind) -> Self {
        Self { date, kind }
    }
}

/// Errors from divergence classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DivergenceError {
    /// An oscillator date has no bar in the price series, so the
    /// oscillator cannot have been computed from it.
    #[error("No price bar for oscillator date {date}")]
    MissingOscillator {
        /// The unmatched oscillator date.
        date: NaiveDate,
    },
}

/// Classifies divergences between a price series and its oscillator.
///
/// Only rows with oscillator coverage take part: bars inside the warm-up
/// are dropped before pivot detection, so pivot windows and pair gaps are
/// measured in oscillator rows. Each pivot is compared against the nearest
/// prior pivot of the same kind at least [`PivotParams::span`] rows back.
/// Events come back ascending by date. An empty oscillator yields no
/// events, which downstream treats as "no signal".
///
/// # Errors
///
/// Returns [`DivergenceError::MissingOscillator`] when an oscillator date
/// has no matching bar in `series`.
pub fn classify_divergences(
    series: &Series,
    oscillator: &[OscillatorPoint],
    params: &PivotParams,
) -> Result<Vec<DivergenceEvent>, DivergenceError> {
    let mut lows = Vec::with_capacity(oscillator.len());
    let mut highs = Vec::with_capacity(oscillator.len());
    for point in oscillator {
        let bar = series
            .bar_on(point.date)
            .ok_or(DivergenceError::MissingOscillator { date: point.date })?;
        lows.push(bar.low);
        highs.push(bar.high);
    }
    let macd: Vec<f64> = oscillator.iter().map(|point| point.macd).collect();

    let low_pivot = index_mask(
        &pivot_indices(
            &lows,
            PivotKind::Low,
            params.lookback_left,
            params.lookback_right,
        ),
        oscillator.len(),
    );
    let high_pivot = index_mask(
        &pivot_indices(
            &highs,
            PivotKind::High,
            params.lookback_left,
            params.lookback_right,
        ),
        oscillator.len(),
    );

    let span = params.span();
    let mut events = Vec::new();

    for i in span..oscillator.len() {
        if low_pivot[i] {
            if let Some(j) = previous_pivot(&low_pivot, i, span) {
                let kind = if lows[i] < lows[j] && macd[i] > macd[j] && macd[i] < 0.0 {
                    Some(DivergenceKind::Bullish)
                } else if lows[i] > lows[j] && macd[i] < macd[j] && macd[i] < 0.0 {
                    Some(DivergenceKind::HiddenBullish)
                } else {
                    None
                };
                if let Some(kind) = kind {
                    events.push(DivergenceEvent::new(oscillator[i].date, kind));
                }
            }
        }

        if high_pivot[i] {
            if let Some(j) = previous_pivot(&high_pivot, i, span) {
                let kind = if highs[i] > highs[j] && macd[i] < macd[j] && macd[i] > 0.0 {
                    Some(DivergenceKind::Bearish)
                } else if highs[i] < highs[j] && macd[i] > macd[j] && macd[i] > 0.0 {
                    Some(DivergenceKind::HiddenBearish)
                } else {
                    None
                };
                if let Some(kind) = kind {
                    events.push(DivergenceEvent::new(oscillator[i].date, kind));
                }
            }
        }
    }

    Ok(events)
}

/// Flips a sorted index list into a boolean membership mask.
fn index_mask(indices: &[usize], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &i in indices {
        mask[i] = true;
    }
    mask
}

/// Finds the nearest prior pivot at least `gap` rows before `from`.
fn previous_pivot(mask: &[bool], from: usize, gap: usize) -> Option<usize> {
    (0..=from.checked_sub(gap)?).rev().find(|&j| mask[j])
}
