//! Swing pivot detection.

use chrono::NaiveDate;
use derive_more::Display;
use divscan_types::{Bar, DatedValue};
use serde::{Deserialize, Serialize};

/// Pivot kind: swing low or swing high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PivotKind {
    /// Local minimum.
    #[display("low")]
    Low,
    /// Local maximum.
    #[display("high")]
    High,
}

/// Window sizes for pivot detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotParams {
    /// Bars to the left that must not beat the candidate.
    pub lookback_left: usize,
    /// Bars to the right that must not beat the candidate.
    pub lookback_right: usize,
}

impl PivotParams {
    /// Creates params with explicit windows.
    #[must_use]
    pub const fn new(lookback_left: usize, lookback_right: usize) -> Self {
        Self {
            lookback_left,
            lookback_right,
        }
    }

    /// Minimum row gap between pivots paired by the divergence scan.
    #[must_use]
    pub const fn span(&self) -> usize {
        self.lookback_left + self.lookback_right
    }
}

impl Default for PivotParams {
    /// Five bars on each side.
    fn default() -> Self {
        Self::new(5, 5)
    }
}

/// A confirmed swing point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotMark {
    /// Session date of the pivot bar.
    pub date: NaiveDate,
    /// Low or high.
    pub kind: PivotKind,
    /// The pivoting value.
    pub value: f64,
}

impl PivotMark {
    /// Creates a new pivot mark.
    #[must_use]
    pub const fn new(date: NaiveDate, kind: PivotKind, value: f64) -> Self {
        Self { date, kind, value }
    }
}

/// Returns the indices that qualify as pivots of `kind`.
///
/// Index `i` is a low pivot when `values[i]` is less than or equal to every
/// value up to `left` positions before and `right` positions after it;
/// highs are symmetric with greater-or-equal. Only indices with a full
/// window on both sides are considered. Ties qualify, so a flat stretch can
/// mark several adjacent indices.
#[must_use]
pub fn pivot_indices(values: &[f64], kind: PivotKind, left: usize, right: usize) -> Vec<usize> {
    if values.len() < left + right + 1 {
        return Vec::new();
    }

    (left..values.len() - right)
        .filter(|&i| {
            let candidate = values[i];
            values[i - left..i]
                .iter()
                .chain(&values[i + 1..=i + right])
                .all(|&other| match kind {
                    PivotKind::Low => candidate <= other,
                    PivotKind::High => candidate >= other,
                })
        })
        .collect()
}

/// Detects both pivot kinds over one dated column.
///
/// Marks come back ascending by date; when one index qualifies as both
/// kinds the low mark is listed first.
#[must_use]
pub fn find_pivots(points: &[DatedValue], params: &PivotParams) -> Vec<PivotMark> {
    let values: Vec<f64> = points.iter().map(|point| point.value).collect();
    let lows = pivot_indices(
        &values,
        PivotKind::Low,
        params.lookback_left,
        params.lookback_right,
    );
    let highs = pivot_indices(
        &values,
        PivotKind::High,
        params.lookback_left,
        params.lookback_right,
    );
    merge_marks(points, points, &lows, &highs)
}

/// Detects price pivots over a run of bars: lows on the low column, highs
/// on the high column.
#[must_use]
pub fn price_pivots(bars: &[Bar], params: &PivotParams) -> Vec<PivotMark> {
    let low_column: Vec<DatedValue> = bars
        .iter()
        .map(|bar| DatedValue::new(bar.date, bar.low))
        .collect();
    let high_column: Vec<DatedValue> = bars
        .iter()
        .map(|bar| DatedValue::new(bar.date, bar.high))
        .collect();
    let low_values: Vec<f64> = low_column.iter().map(|point| point.value).collect();
    let high_values: Vec<f64> = high_column.iter().map(|point| point.value).collect();

    let lows = pivot_indices(
        &low_values,
        PivotKind::Low,
        params.lookback_left,
        params.lookback_right,
    );
    let highs = pivot_indices(
        &high_values,
        PivotKind::High,
        params.lookback_left,
        params.lookback_right,
    );
    merge_marks(&low_column, &high_column, &lows, &highs)
}

/// Merges low and high pivot indices into date-ordered marks, taking each
/// mark's value from its own source column.
fn merge_marks(
    low_source: &[DatedValue],
    high_source: &[DatedValue],
    low_indices: &[usize],
    high_indices: &[usize],
) -> Vec<PivotMark> {
    let mut tagged: Vec<(usize, PivotKind)> = low_indices
        .iter()
        .map(|&i| (i, PivotKind::Low))
        .chain(high_indices.iter().map(|&i| (i, PivotKind::High)))
        .collect();
    // Low sorts before High at the same index.
    tagged.sort_by_key(|&(i, kind)| (i, matches!(kind, PivotKind::High)));

    tagged
        .into_iter()
        .map(|(i, kind)| match kind {
            PivotKind::Low => PivotMark::new(low_source[i].date, kind, low_source[i].value),
            PivotKind::High => PivotMark::new(high_source[i].date, kind, high_source[i].value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use divscan_types::Bar;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn dated(values: &[f64]) -> Vec<DatedValue> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| DatedValue::new(date(i as u32 + 1), value))
            .collect()
    }

    #[test]
    fn test_low_pivot_at_valley() {
        let values = [5.0, 4.0, 3.0, 4.0, 5.0];
        assert_eq!(pivot_indices(&values, PivotKind::Low, 2, 2), vec![2]);
        assert!(pivot_indices(&values, PivotKind::High, 2, 2).is_empty());
    }

    #[test]
    fn test_high_pivot_at_peak() {
        let values = [1.0, 2.0, 5.0, 2.0, 1.0];
        assert_eq!(pivot_indices(&values, PivotKind::High, 2, 2), vec![2]);
        assert!(pivot_indices(&values, PivotKind::Low, 2, 2).is_empty());
    }

    #[test]
    fn test_ties_mark_plateau() {
        let values = [3.0, 1.0, 1.0, 3.0];
        assert_eq!(pivot_indices(&values, PivotKind::Low, 1, 1), vec![1, 2]);
    }

    #[test]
    fn test_window_bounds_respected() {
        // Global minimum at index 0 and maximum at the last index must not
        // be marked: neither has a full window.
        let values = [0.0, 5.0, 4.0, 5.0, 9.0];
        assert!(pivot_indices(&values, PivotKind::Low, 2, 2).is_empty());
        assert!(pivot_indices(&values, PivotKind::High, 2, 2).is_empty());
    }

    #[test]
    fn test_short_input_has_no_pivots() {
        let values = [1.0, 2.0, 3.0];
        assert!(pivot_indices(&values, PivotKind::Low, 2, 2).is_empty());
    }

    #[test]
    fn test_indices_stay_inside_legal_window() {
        let values: Vec<f64> = (0..30).map(|i| ((i * 11) % 7) as f64).collect();
        for (left, right) in [(2, 2), (3, 1), (5, 5)] {
            for kind in [PivotKind::Low, PivotKind::High] {
                let indices = pivot_indices(&values, kind, left, right);
                assert!(
                    indices
                        .iter()
                        .all(|&i| i >= left && i < values.len() - right)
                );
            }
        }
    }

    #[test]
    fn test_constant_sequence_marks_both_kinds() {
        let points = dated(&[2.0; 5]);
        let marks = find_pivots(&points, &PivotParams::new(1, 1));

        // Indices 1..4 each qualify as low and high, low listed first.
        assert_eq!(marks.len(), 6);
        assert_eq!(marks[0].kind, PivotKind::Low);
        assert_eq!(marks[1].kind, PivotKind::High);
        assert_eq!(marks[0].date, marks[1].date);
    }

    #[test]
    fn test_find_pivots_ascending_dates() {
        let points = dated(&[5.0, 1.0, 5.0, 9.0, 5.0, 1.0, 5.0]);
        let marks = find_pivots(&points, &PivotParams::new(1, 1));

        assert!(marks.windows(2).all(|pair| pair[0].date <= pair[1].date));
        let kinds: Vec<PivotKind> = marks.iter().map(|mark| mark.kind).collect();
        assert_eq!(kinds, vec![PivotKind::Low, PivotKind::High, PivotKind::Low]);
    }

    #[test]
    fn test_price_pivots_use_their_own_columns() {
        // Index 1 is simultaneously the lowest low and the highest high, a
        // wide-range bar. Each mark must carry its own column's value.
        let bars = [
            Bar::new(date(1), 10.0, 12.0, 9.0, 10.0, 1_000.0),
            Bar::new(date(2), 10.0, 20.0, 1.0, 10.0, 1_000.0),
            Bar::new(date(3), 10.0, 12.0, 9.0, 10.0, 1_000.0),
        ];
        let marks = price_pivots(&bars, &PivotParams::new(1, 1));

        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].kind, PivotKind::Low);
        assert!((marks[0].value - 1.0).abs() < 1e-10);
        assert_eq!(marks[1].kind, PivotKind::High);
        assert!((marks[1].value - 20.0).abs() < 1e-10);
        assert_eq!(marks[0].date, date(2));
    }

    #[test]
    fn test_pivot_kind_labels() {
        assert_eq!(PivotKind::Low.to_string(), "low");
        assert_eq!(PivotKind::High.to_string(), "high");
    }

    #[test]
    fn test_default_params_span() {
        let params = PivotParams::default();
        assert_eq!(params.lookback_left, 5);
        assert_eq!(params.lookback_right, 5);
        assert_eq!(params.span(), 10);
    }
}
