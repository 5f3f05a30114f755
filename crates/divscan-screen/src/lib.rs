//! Single-ticker analysis pipeline: oscillator, pivots, divergences, and
//! the actionability gate composed into one call.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod outcome;

pub use analysis::{OverlayRow, ScreenParams, TickerAnalysis, analyze};
pub use outcome::ScreenOutcome;
