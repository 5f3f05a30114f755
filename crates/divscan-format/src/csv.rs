//! Delimited text output.

use divscan_screen::OverlayRow;
use divscan_types::{Bar, OptionChain};
use std::io::Write;

use crate::{FormatError, Formatter};

/// Writes rows as delimited text, one record per line.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Separator between fields, comma unless overridden.
    delimiter: char,
    /// Emit a header row before the data.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Comma-delimited formatter with a header row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Replaces the field separator.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Toggles the header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Tab-delimited variant, header included.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
            )?;
        }

        Ok(())
    }

    fn write_overlay<W: Write + Send>(
        &self,
        rows: &[OverlayRow],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "date{d}close{d}low{d}high{d}macd{d}signal{d}price_pivot_low{d}\
                 price_pivot_high{d}oscillator_pivot_low{d}oscillator_pivot_high{d}divergence"
            )?;
        }

        for row in rows {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                row.date,
                row.close,
                row.low,
                row.high,
                number_cell(row.macd),
                number_cell(row.signal),
                number_cell(row.price_pivot_low),
                number_cell(row.price_pivot_high),
                number_cell(row.oscillator_pivot_low),
                number_cell(row.oscillator_pivot_high),
                row.divergence
                    .map_or_else(String::new, |kind| kind.to_string())
            )?;
        }

        Ok(())
    }

    fn write_options<W: Write + Send>(
        &self,
        chain: &OptionChain,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "contract_symbol{d}type{d}strike{d}last_price{d}bid{d}ask{d}volume{d}\
                 open_interest{d}implied_volatility{d}in_the_money{d}retrieved_date{d}expiration"
            )?;
        }

        for (side, contract) in chain.contracts() {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                contract.contract_symbol,
                side,
                contract.strike,
                contract.last_price,
                number_cell(contract.bid),
                number_cell(contract.ask),
                count_cell(contract.volume),
                count_cell(contract.open_interest),
                number_cell(contract.implied_volatility),
                contract.in_the_money,
                chain.retrieved,
                chain.expiration
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

fn number_cell(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

fn count_cell(value: Option<u64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}
