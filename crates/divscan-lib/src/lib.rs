//! MACD divergence screening for daily equity data.
//!
//! This facade crate bundles the divscan workspace crates behind a single
//! dependency.
//!
//! # Quick Start
//!
//! ```ignore
//! use divscan_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FetchClient::with_defaults()?;
//!     let end = chrono::Utc::now().date_naive();
//!     let series = fetch_daily(&client, "SPY", DateRange::trailing(end, 365)).await?;
//!
//!     let analysis = analyze(&series, &ScreenParams::default())?;
//!     for event in &analysis.events {
//!         println!("{} {}", event.date, event.kind);
//!     }
//!     println!("actionable: {}", analysis.actionable);
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/divscan/divscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the core data types
pub use divscan_types::*;

// Re-export the oscillator
pub use divscan_macd::{MacdParams, OscillatorPoint, compute_macd, ewma};

// Re-export pivot detection and divergence classification
pub use divscan_divergence::{
    DEFAULT_MAX_AGE_DAYS, DivergenceError, DivergenceEvent, DivergenceKind, PivotKind, PivotMark,
    PivotParams, classify_divergences, find_pivots, is_currently_actionable, latest_bullish,
    price_pivots,
};

// Re-export the analysis pipeline
pub use divscan_screen::{OverlayRow, ScreenOutcome, ScreenParams, TickerAnalysis, analyze};

// Re-export the fetch layer
#[cfg(feature = "fetch")]
pub use divscan_fetch::{
    ClientConfig, FetchClient, FetchError, fetch_daily, fetch_option_chain, parse_chart,
    parse_option_chain,
};

// Re-export the output formatters
#[cfg(feature = "format")]
pub use divscan_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, export_filename,
};

/// Common surface, importable with one glob.
///
/// ```
/// use divscan_lib::prelude::*;
/// ```
pub mod prelude {
    pub use divscan_divergence::{
        DivergenceEvent, DivergenceKind, PivotKind, PivotMark, PivotParams, classify_divergences,
        find_pivots, is_currently_actionable,
    };
    pub use divscan_macd::{MacdParams, OscillatorPoint, compute_macd};
    pub use divscan_screen::{ScreenOutcome, ScreenParams, TickerAnalysis, analyze};
    pub use divscan_types::{
        Bar, DateRange, DateRangeError, DivscanError, OptionChain, OptionContract, OptionSide,
        Result, Series, SeriesError, parse_ticker_list,
    };

    #[cfg(feature = "fetch")]
    pub use divscan_fetch::{ClientConfig, FetchClient, fetch_daily, fetch_option_chain};

    #[cfg(feature = "format")]
    pub use divscan_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
