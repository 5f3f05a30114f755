//! Output formatters for the divscan screener.
//!
//! This crate provides writers for the three export payloads - raw daily
//! bars, chart-overlay rows, and option chains:
//!
//! - [`CsvFormatter`] - delimited text rows
//! - [`JsonFormatter`] - JSON format
//! - [`export_filename`] - Conventional export file naming

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod filename;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use filename::export_filename;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
