//! Core types for the divscan divergence screener.
//!
//! This crate provides the fundamental data structures used throughout
//! divscan:
//!
//! - [`Bar`] - A single daily price bar
//! - [`Series`] - A date-ordered daily series with validated ordering
//! - [`DateRange`] - Calendar window for series retrieval
//! - [`OptionChain`] - Listed option contracts for one expiration
//! - [`parse_ticker_list`] - Ticker watch-list parsing

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod date_range;
mod error;
mod options;
mod ticker;

pub use bar::{Bar, DatedValue, Series, SeriesError};
pub use date_range::DateRange;
pub use error::{DateRangeError, DivscanError, Result};
pub use options::{OptionChain, OptionContract, OptionSide};
pub use ticker::parse_ticker_list;
