//! Format selection and the writer trait shared by all formatters.

use divscan_screen::OverlayRow;
use divscan_types::{Bar, OptionChain};
use std::io::Write;
use thiserror::Error;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Comma-separated rows with a header line.
    #[default]
    Csv,
    /// One JSON document per export.
    Json,
}

impl OutputFormat {
    /// File extension used for exports in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Every supported format.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// Failures raised while exporting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Requested format is not supported.
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be serialized as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writer interface implemented once per output format.
pub trait Formatter: Send + Sync {
    /// Writes raw daily bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the bars cannot be written.
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError>;

    /// Writes chart-overlay rows to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be written.
    fn write_overlay<W: Write + Send>(
        &self,
        rows: &[OverlayRow],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes an option chain to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain cannot be written.
    fn write_options<W: Write + Send>(
        &self,
        chain: &OptionChain,
        writer: W,
    ) -> Result<(), FormatError>;

    /// Extension appended to generated file names.
    fn extension(&self) -> &str;
}
