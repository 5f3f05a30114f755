//! Benchmark utilities for divscan.

use chrono::{NaiveDate, TimeDelta};
use divscan_types::{Bar, Series};

/// Builds a deterministic daily series with `days` bars.
///
/// Prices follow two overlaid sine cycles plus xorshift jitter, so pivot
/// detection and divergence classification see realistic swing structure
/// rather than a flat line.
pub fn synthetic_series(days: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).expect("valid date");
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut close = 100.0;
    let mut bars = Vec::with_capacity(days);

    for i in 0..days {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let jitter = (state % 2_000) as f64 / 1_000.0 - 1.0;
        let swing = (i as f64 / 9.0).sin() * 2.5 + (i as f64 / 41.0).sin() * 7.0;

        let open = close;
        close = 100.0 + swing + jitter;
        let high = open.max(close) + 0.5;
        let low = open.min(close) - 0.5;
        let volume = 1_000_000.0 + (state % 500_000) as f64;

        bars.push(Bar::new(
            start + TimeDelta::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        ));
    }

    Series::new(bars).expect("generated dates are strictly increasing")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_series_is_deterministic() {
        let a = synthetic_series(300);
        let b = synthetic_series(300);
        assert_eq!(a.len(), 300);
        assert_eq!(a, b);
        assert!(a.bars().iter().all(|bar| bar.low <= bar.high));
    }
}
