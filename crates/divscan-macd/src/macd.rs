//! MACD oscillator computation.

use chrono::NaiveDate;
use divscan_types::Series;
use serde::{Deserialize, Serialize};

use crate::ewma;

/// MACD smoothing periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    /// Span of the short (fast) close EMA.
    pub short_period: usize,
    /// Span of the long (slow) close EMA.
    pub long_period: usize,
    /// Span of the signal-line EMA over the MACD line.
    pub signal_period: usize,
}

impl MacdParams {
    /// Creates params with explicit periods.
    #[must_use]
    pub const fn new(short_period: usize, long_period: usize, signal_period: usize) -> Self {
        Self {
            short_period,
            long_period,
            signal_period,
        }
    }

    /// Minimum series length that produces a non-empty oscillator.
    #[must_use]
    pub const fn min_bars(&self) -> usize {
        self.long_period + self.signal_period - 1
    }
}

impl Default for MacdParams {
    /// The conventional 12/26/9 configuration.
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

/// One oscillator observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    /// Session date.
    pub date: NaiveDate,
    /// MACD line (short EMA - long EMA).
    pub macd: f64,
    /// Signal line (EMA of the MACD line).
    pub signal: f64,
}

impl OscillatorPoint {
    /// Creates a new oscillator point.
    #[must_use]
    pub const fn new(date: NaiveDate, macd: f64, signal: f64) -> Self {
        Self { date, macd, signal }
    }
}

/// Computes the MACD oscillator over a series' close column.
///
/// One point is produced per bar from the first index where the slow EMA
/// and the signal line are both defined, so the result is `series.len() -
/// (long_period - 1) - (signal_period - 1)` points. Series shorter than
/// [`MacdParams::min_bars`] produce an empty result; treat that as "no
/// signal" rather than an error.
///
/// The signal EMA is seeded at the first defined MACD value, matching the
/// masked-warm-up convention of [`ewma`].
///
/// # Panics
///
/// Panics if any period in `params` is 0.
#[must_use]
pub fn compute_macd(series: &Series, params: &MacdParams) -> Vec<OscillatorPoint> {
    let closes: Vec<f64> = series.bars().iter().map(|bar| bar.close).collect();
    let short = ewma(&closes, params.short_period);
    let long = ewma(&closes, params.long_period);

    // Both EMA masks are a prefix of Nones, so the defined MACD values
    // form a contiguous tail.
    let macd_values: Vec<f64> = short
        .iter()
        .zip(&long)
        .filter_map(|(&s, &l)| Some(s? - l?))
        .collect();
    let macd_start = closes.len() - macd_values.len();

    let signal = ewma(&macd_values, params.signal_period);

    series.bars()[macd_start..]
        .iter()
        .zip(macd_values.iter().zip(&signal))
        .filter_map(|(bar, (&macd, &signal))| {
            signal.map(|signal| OscillatorPoint::new(bar.date, macd, signal))
        })
        .collect()
}
