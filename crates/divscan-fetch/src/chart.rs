//! Daily-bar chart response decoding.

use chrono::DateTime;
use divscan_types::{Bar, DateRange, DivscanError, Result, Series};
use serde::Deserialize;

use crate::{FetchClient, url::chart_url};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

/// Parallel per-field arrays, one slot per timestamp. Halted sessions
/// come through as nulls.
#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Fetches the daily price series for `symbol` over an inclusive range.
///
/// Sessions inside the range that the provider has no bar for are simply
/// absent; the series is never padded.
///
/// # Errors
///
/// Returns [`DivscanError::DataUnavailable`] for unknown symbols and
/// symbols without usable bars, [`DivscanError::Http`] when the transport
/// gives up, and [`DivscanError::Json`] on malformed bodies.
pub async fn fetch_daily(client: &FetchClient, symbol: &str, range: DateRange) -> Result<Series> {
    let url = chart_url(symbol, range);
    let body = client
        .fetch_bytes(&url)
        .await
        .map_err(|e| DivscanError::Http(e.to_string()))?;

    match body {
        Some(bytes) => parse_chart(symbol, &bytes),
        None => Err(unavailable(symbol)),
    }
}

/// Decodes a chart response body into a validated series.
///
/// Rows with any null OHLC field are dropped, null volume becomes zero,
/// and repeated timestamps for one session keep the first row.
///
/// # Errors
///
/// Returns [`DivscanError::Json`] if the body is not valid JSON,
/// [`DivscanError::Decode`] if it lacks the quote block, or
/// [`DivscanError::DataUnavailable`] if it carries no usable bars.
pub fn parse_chart(symbol: &str, body: &[u8]) -> Result<Series> {
    let response: ChartResponse = serde_json::from_slice(body)?;

    let envelope = response.chart;
    if envelope.error.is_some() {
        return Err(unavailable(symbol));
    }
    let result = envelope
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .ok_or_else(|| unavailable(symbol))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DivscanError::Decode("chart response has no quote block".to_string()))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut last_date = None;
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|at| at.date_naive()) else {
            continue;
        };
        // The provider repeats the live bar next to the settled one; the
        // first row for a session wins.
        if last_date == Some(date) {
            continue;
        }
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open, i),
            field(&quote.high, i),
            field(&quote.low, i),
            field(&quote.close, i),
        ) else {
            continue;
        };
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);

        bars.push(Bar::new(date, open, high, low, close, volume as f64));
        last_date = Some(date);
    }

    if bars.is_empty() {
        return Err(unavailable(symbol));
    }
    Ok(Series::new(bars)?)
}

fn field(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

fn unavailable(symbol: &str) -> DivscanError {
    DivscanError::DataUnavailable {
        symbol: symbol.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    // 2024-01-01, 2024-01-02, 2024-01-03 at midnight UTC.
    const DAY1: i64 = 1_704_067_200;
    const DAY2: i64 = 1_704_153_600;
    const DAY3: i64 = 1_704_240_000;

    fn body(timestamps: &str, quote: &str) -> String {
        format!(
            r#"{{"chart":{{"result":[{{"timestamp":{timestamps},"indicators":{{"quote":[{quote}]}}}}],"error":null}}}}"#
        )
    }

    #[test]
    fn test_parse_chart_basic() {
        let body = body(
            &format!("[{DAY1},{DAY2},{DAY3}]"),
            r#"{"open":[10.0,11.0,12.0],"high":[10.5,11.5,12.5],"low":[9.5,10.5,11.5],"close":[10.2,11.2,12.2],"volume":[100,200,300]}"#,
        );
        let series = parse_chart("aapl", body.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        let first = series.bars()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((first.open - 10.0).abs() < 1e-10);
        assert!((first.close - 10.2).abs() < 1e-10);
        assert!((first.volume - 100.0).abs() < 1e-10);
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
        );
    }

    #[test]
    fn test_parse_chart_drops_null_ohlc_rows() {
        let body = body(
            &format!("[{DAY1},{DAY2},{DAY3}]"),
            r#"{"open":[10.0,null,12.0],"high":[10.5,11.5,12.5],"low":[9.5,10.5,11.5],"close":[10.2,11.2,12.2],"volume":[100,200,300]}"#,
        );
        let series = parse_chart("aapl", body.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(
            series.bars()[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_parse_chart_null_volume_becomes_zero() {
        let body = body(
            &format!("[{DAY1}]"),
            r#"{"open":[10.0],"high":[10.5],"low":[9.5],"close":[10.2],"volume":[null]}"#,
        );
        let series = parse_chart("aapl", body.as_bytes()).unwrap();
        assert!((series.bars()[0].volume).abs() < 1e-10);
    }

    #[test]
    fn test_parse_chart_keeps_first_row_per_session() {
        // Same session twice: settled bar plus a live snapshot an hour in.
        let body = body(
            &format!("[{DAY1},{},{DAY2}]", DAY1 + 3_600),
            r#"{"open":[10.0,10.1,11.0],"high":[10.5,10.6,11.5],"low":[9.5,9.6,10.5],"close":[10.2,10.3,11.2],"volume":[100,150,200]}"#,
        );
        let series = parse_chart("aapl", body.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert!((series.bars()[0].close - 10.2).abs() < 1e-10);
    }

    #[test]
    fn test_parse_chart_error_body_is_data_unavailable() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("nope", body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DivscanError::DataUnavailable { symbol } if symbol == "NOPE"
        ));
    }

    #[test]
    fn test_parse_chart_empty_result_is_data_unavailable() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        let err = parse_chart("aapl", body.as_bytes()).unwrap_err();
        assert!(matches!(err, DivscanError::DataUnavailable { .. }));
    }

    #[test]
    fn test_parse_chart_missing_timestamps_is_data_unavailable() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{"open":[],"high":[],"low":[],"close":[],"volume":[]}]}}],"error":null}}"#;
        let err = parse_chart("aapl", body.as_bytes()).unwrap_err();
        assert!(matches!(err, DivscanError::DataUnavailable { .. }));
    }

    #[test]
    fn test_parse_chart_garbage_is_json_error() {
        let err = parse_chart("aapl", b"not json").unwrap_err();
        assert!(matches!(err, DivscanError::Json(_)));
    }

    #[test]
    fn test_parse_chart_missing_quote_block_is_decode_error() {
        let body = format!(
            r#"{{"chart":{{"result":[{{"timestamp":[{DAY1}],"indicators":{{"quote":[]}}}}],"error":null}}}}"#
        );
        let err = parse_chart("aapl", body.as_bytes()).unwrap_err();
        assert!(matches!(err, DivscanError::Decode(_)));
    }
}
