//! Quote provider URL construction.

use chrono::{NaiveDate, NaiveTime};
use divscan_types::DateRange;

/// Base URL for the daily-bar chart endpoint.
pub const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Base URL for the option chain endpoint.
pub const OPTIONS_BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/options";

/// Builds the URL for a symbol's daily bars over an inclusive date range.
///
/// The endpoint takes epoch-second bounds with an exclusive end, so the
/// range end is pushed forward one day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use divscan_fetch::url::chart_url;
/// use divscan_types::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let url = chart_url("aapl", DateRange::new(start, end).unwrap());
/// assert_eq!(
///     url,
///     "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?period1=1705276800&period2=1710547200&interval=1d"
/// );
/// ```
#[must_use]
pub fn chart_url(symbol: &str, range: DateRange) -> String {
    let period1 = epoch_start(range.start);
    let period2 = epoch_start(range.end + chrono::TimeDelta::days(1));
    format!(
        "{}/{}?period1={}&period2={}&interval=1d",
        CHART_BASE_URL,
        symbol.to_uppercase(),
        period1,
        period2
    )
}

/// Builds the URL for a symbol's option chain.
///
/// Without an expiration the endpoint answers with the nearest chain plus
/// the list of available expirations; with one it answers with that
/// specific chain.
#[must_use]
pub fn options_url(symbol: &str, expiration: Option<i64>) -> String {
    let base = format!("{}/{}", OPTIONS_BASE_URL, symbol.to_uppercase());
    match expiration {
        Some(epoch) => format!("{base}?date={epoch}"),
        None => base,
    }
}

/// Epoch seconds at midnight UTC of the given date.
#[must_use]
pub fn epoch_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_chart_url_uppercases_symbol() {
        let url = chart_url("msft", range((2024, 1, 1), (2024, 1, 31)));
        assert!(url.contains("/chart/MSFT?"));
    }

    #[test]
    fn test_chart_url_exclusive_end() {
        // 2024-01-01 is 1704067200; the end bound lands one day past
        // 2024-01-02, so the last session is included.
        let url = chart_url("SPY", range((2024, 1, 1), (2024, 1, 2)));
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/SPY?period1=1704067200&period2=1704240000&interval=1d"
        );
    }

    #[test]
    fn test_options_url_without_expiration() {
        assert_eq!(
            options_url("spy", None),
            "https://query1.finance.yahoo.com/v7/finance/options/SPY"
        );
    }

    #[test]
    fn test_options_url_with_expiration() {
        assert_eq!(
            options_url("qqq", Some(1_710_460_800)),
            "https://query1.finance.yahoo.com/v7/finance/options/QQQ?date=1710460800"
        );
    }

    #[test]
    fn test_epoch_start_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(epoch_start(date), 1_704_067_200);
    }
}
