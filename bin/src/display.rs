//! Display utilities and output writing for the divscan CLI.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use divscan_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Output format for exported data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
}

impl Format {
    /// Extension used for files written in this format.
    pub(crate) const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Maps the CLI flag to the formatter identifier.
    pub(crate) const fn to_output(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Json => OutputFormat::Json,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parse a YYYY-MM-DD date argument.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {s}"))
}

/// Resolve the analysis window from optional CLI bounds.
///
/// The end defaults to today, the start to one year before the end.
pub(crate) fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let end = match end {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };

    let range = match start {
        Some(s) => DateRange::new(parse_date(s)?, end)?,
        None => DateRange::trailing(end, 365),
    };
    Ok(range)
}

/// Assemble analysis parameters from the CLI knobs, rejecting zero periods.
pub(crate) fn build_params(
    short_period: usize,
    long_period: usize,
    signal_period: usize,
    lookback: usize,
    max_age: i64,
) -> Result<ScreenParams> {
    if short_period == 0 || long_period == 0 || signal_period == 0 {
        bail!("MACD periods must be at least 1");
    }
    Ok(ScreenParams::new(
        MacdParams::new(short_period, long_period, signal_period),
        PivotParams::new(lookback, lookback),
        max_age,
    ))
}

/// Write raw daily bars to a file in the specified format.
pub(crate) fn write_bars(bars: &[Bar], output: &PathBuf, format: Format) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);
    match format {
        Format::Csv => CsvFormatter::new().write_bars(bars, writer)?,
        Format::Json => JsonFormatter::new().write_bars(bars, writer)?,
    }

    Ok(())
}

/// Write chart-overlay rows to a file in the specified format.
pub(crate) fn write_overlay(
    rows: &[divscan_lib::OverlayRow],
    output: &PathBuf,
    format: Format,
) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);
    match format {
        Format::Csv => CsvFormatter::new().write_overlay(rows, writer)?,
        Format::Json => JsonFormatter::new().write_overlay(rows, writer)?,
    }

    Ok(())
}

/// Write an option chain to a file in the specified format.
pub(crate) fn write_options(chain: &OptionChain, output: &PathBuf, format: Format) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);
    match format {
        Format::Csv => CsvFormatter::new().write_options(chain, writer)?,
        Format::Json => JsonFormatter::new().write_options(chain, writer)?,
    }

    Ok(())
}
