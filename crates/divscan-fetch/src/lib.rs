//! HTTP client and data fetching for the divscan screener.
//!
//! This crate is the quote-provider boundary:
//!
//! - [`url::chart_url`] / [`url::options_url`] - Endpoint URL construction
//! - [`FetchClient`] - HTTP client with connection pooling and retries
//! - [`fetch_daily`] - Daily price series download and decoding
//! - [`fetch_option_chain`] - Option chain download and decoding

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chart;
mod client;
mod options;
pub mod url;

pub use chart::{fetch_daily, parse_chart};
pub use client::{ClientConfig, FetchClient, FetchError};
pub use options::{fetch_option_chain, parse_option_chain};
