//! JSON export writer.

use divscan_screen::OverlayRow;
use divscan_types::{Bar, OptionChain};
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON formatter. Compact by default, one document per export.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact-output JSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Switches between compact and pretty-printed output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

fn write_document<T: Serialize, W: Write>(
    value: &T,
    pretty: bool,
    mut writer: W,
) -> Result<(), FormatError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        write_document(&bars, self.pretty, writer)
    }

    fn write_overlay<W: Write + Send>(
        &self,
        rows: &[OverlayRow],
        writer: W,
    ) -> Result<(), FormatError> {
        write_document(&rows, self.pretty, writer)
    }

    fn write_options<W: Write + Send>(
        &self,
        chain: &OptionChain,
        writer: W,
    ) -> Result<(), FormatError> {
        write_document(chain, self.pretty, writer)
    }

    fn extension(&self) -> &str {
        "json"
    }
}
