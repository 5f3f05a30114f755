//! MACD oscillator computation for the divscan divergence screener.
//!
//! This crate turns a daily close series into the MACD momentum oscillator:
//!
//! - [`ewma`] - Recursive EMA with masked warm-up
//! - [`compute_macd`] - MACD and signal lines as [`OscillatorPoint`]s

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ema;
mod macd;

pub use ema::ewma;
pub use macd::{MacdParams, OscillatorPoint, compute_macd};
