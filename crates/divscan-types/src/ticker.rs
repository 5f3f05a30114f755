//! Ticker list parsing.

/// Parses a comma-separated ticker list.
///
/// Entries are trimmed and upper-cased; empty entries (including trailing
/// commas and blank input) are skipped.
#[must_use]
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_uppercases() {
        let tickers = parse_ticker_list(" aapl, MSFT ,goog");
        assert_eq!(tickers, vec!["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn test_parse_skips_empty_entries() {
        let tickers = parse_ticker_list("spy,,qqq,");
        assert_eq!(tickers, vec!["SPY", "QQQ"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_ticker_list("").is_empty());
        assert!(parse_ticker_list("  \n ").is_empty());
    }

    #[test]
    fn test_parse_handles_newlines_in_entries() {
        let tickers = parse_ticker_list("aapl,\nmsft");
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }
}
