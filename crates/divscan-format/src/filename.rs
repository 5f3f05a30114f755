//! Export filename convention.

use chrono::NaiveDate;

use crate::OutputFormat;

/// Builds the conventional export filename for a payload.
///
/// The pattern is `<symbol>_<purpose>_<YYYY-MM-DD>.<ext>` with the symbol
/// lower-cased, e.g. `spy_options_2024-01-15.csv`.
#[must_use]
pub fn export_filename(
    symbol: &str,
    purpose: &str,
    date: NaiveDate,
    format: OutputFormat,
) -> String {
    format!(
        "{}_{}_{}.{}",
        symbol.to_lowercase(),
        purpose,
        date,
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename_options() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            export_filename("SPY", "options", date, OutputFormat::Csv),
            "spy_options_2024-01-15.csv"
        );
    }

    #[test]
    fn test_export_filename_overlay_json() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(
            export_filename("brk-b", "overlay", date, OutputFormat::Json),
            "brk-b_overlay_2024-12-03.json"
        );
    }
}
