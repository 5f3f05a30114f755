//! Pivot detection and divergence classification for the divscan screener.
//!
//! This crate holds the pattern-detection core:
//!
//! - [`find_pivots`] / [`price_pivots`] - Swing low/high detection
//! - [`classify_divergences`] - Four-way price/oscillator divergence scan
//! - [`is_currently_actionable`] - Recency gate over bullish events

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod classify;
mod pivot;
mod signal;

pub use classify::{DivergenceError, DivergenceEvent, DivergenceKind, classify_divergences};
pub use pivot::{PivotKind, PivotMark, PivotParams, find_pivots, pivot_indices, price_pivots};
pub use signal::{DEFAULT_MAX_AGE_DAYS, is_currently_actionable, latest_bullish};
