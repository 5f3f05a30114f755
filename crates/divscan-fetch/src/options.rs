//! Option chain response decoding.

use chrono::{DateTime, NaiveDate, Utc};
use divscan_types::{DivscanError, OptionChain, OptionContract, Result};
use serde::Deserialize;

use crate::{
    FetchClient,
    url::{epoch_start, options_url},
};

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: OptionsEnvelope,
}

#[derive(Debug, Deserialize)]
struct OptionsEnvelope {
    result: Option<Vec<OptionsResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResult {
    expiration_dates: Vec<i64>,
    options: Vec<OptionsBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsBlock {
    expiration_date: i64,
    #[serde(default)]
    calls: Vec<ContractDto>,
    #[serde(default)]
    puts: Vec<ContractDto>,
}

/// One listed contract. Illiquid strikes come through with most quote
/// fields missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractDto {
    contract_symbol: String,
    strike: f64,
    last_price: f64,
    #[serde(default)]
    bid: Option<f64>,
    #[serde(default)]
    ask: Option<f64>,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(default)]
    open_interest: Option<u64>,
    #[serde(default)]
    implied_volatility: Option<f64>,
    #[serde(default)]
    in_the_money: bool,
}

impl From<ContractDto> for OptionContract {
    fn from(dto: ContractDto) -> Self {
        Self {
            contract_symbol: dto.contract_symbol,
            strike: dto.strike,
            last_price: dto.last_price,
            bid: dto.bid,
            ask: dto.ask,
            volume: dto.volume,
            open_interest: dto.open_interest,
            implied_volatility: dto.implied_volatility,
            in_the_money: dto.in_the_money,
        }
    }
}

/// Fetches the option chain for `symbol`.
///
/// Without an expiration the provider's nearest chain is returned. With
/// one, it must be on the provider's expiration list; the matching chain
/// is then fetched in a second request unless the nearest chain already
/// is the requested one.
///
/// # Errors
///
/// Returns [`DivscanError::UnknownExpiration`] when the requested date is
/// not offered, [`DivscanError::DataUnavailable`] for symbols without
/// listed options, and [`DivscanError::Http`] / [`DivscanError::Json`]
/// for transport and body failures.
pub async fn fetch_option_chain(
    client: &FetchClient,
    symbol: &str,
    expiration: Option<NaiveDate>,
) -> Result<OptionChain> {
    let retrieved = Utc::now().date_naive();
    let chain = fetch_chain_at(client, symbol, None, retrieved).await?;

    let Some(requested) = expiration else {
        return Ok(chain);
    };
    if chain.expiration == requested {
        return Ok(chain);
    }
    if !chain.expirations.contains(&requested) {
        return Err(DivscanError::UnknownExpiration {
            symbol: symbol.to_uppercase(),
            expiration: requested,
        });
    }

    // Advertised expirations are midnight UTC, so the query epoch can be
    // rebuilt from the date alone.
    fetch_chain_at(client, symbol, Some(epoch_start(requested)), retrieved).await
}

async fn fetch_chain_at(
    client: &FetchClient,
    symbol: &str,
    epoch: Option<i64>,
    retrieved: NaiveDate,
) -> Result<OptionChain> {
    let url = options_url(symbol, epoch);
    let body = client
        .fetch_bytes(&url)
        .await
        .map_err(|e| DivscanError::Http(e.to_string()))?
        .ok_or_else(|| unavailable(symbol))?;
    parse_option_chain(symbol, &body, retrieved)
}

/// Decodes an option chain response body.
///
/// # Errors
///
/// Returns [`DivscanError::Json`] if the body is not valid JSON,
/// [`DivscanError::Decode`] if an expiration epoch is unusable, or
/// [`DivscanError::DataUnavailable`] if it carries no chain.
pub fn parse_option_chain(symbol: &str, body: &[u8], retrieved: NaiveDate) -> Result<OptionChain> {
    let response: OptionsResponse = serde_json::from_slice(body)?;

    let envelope = response.option_chain;
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

    let expirations: Vec<NaiveDate> = result
        .expiration_dates
        .iter()
        .filter_map(|&epoch| date_of(epoch))
        .collect();

    let block = result
        .options
        .into_iter()
        .next()
        .ok_or_else(|| unavailable(symbol))?;
    let expiration = date_of(block.expiration_date).ok_or_else(|| {
        DivscanError::Decode(format!(
            "option chain has invalid expiration epoch {}",
            block.expiration_date
        ))
    })?;

    Ok(OptionChain {
        symbol: symbol.to_uppercase(),
        expiration,
        expirations,
        retrieved,
        calls: block.calls.into_iter().map(Into::into).collect(),
        puts: block.puts.into_iter().map(Into::into).collect(),
    })
}

fn date_of(epoch: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(epoch, 0).map(|at| at.date_naive())
}

fn unavailable(symbol: &str) -> DivscanError {
    DivscanError::DataUnavailable {
        symbol: symbol.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-15 and 2024-03-22 at midnight UTC.
    const EXPIRY1: i64 = 1_710_460_800;
    const EXPIRY2: i64 = 1_711_065_600;

    fn retrieved() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn sample_body() -> String {
        format!(
            r#"{{"optionChain":{{"result":[{{
            "expirationDates":[{EXPIRY1},{EXPIRY2}],
            "options":[{{
                "expirationDate":{EXPIRY1},
                "calls":[
                    {{"contractSymbol":"SPY240315C00500000","strike":500.0,"lastPrice":2.5,"bid":2.4,"ask":2.6,"volume":1200,"openInterest":5400,"impliedVolatility":0.18,"inTheMoney":true}},
                    {{"contractSymbol":"SPY240315C00510000","strike":510.0,"lastPrice":0.8}}
                ],
                "puts":[
                    {{"contractSymbol":"SPY240315P00500000","strike":500.0,"lastPrice":3.1,"bid":3.0,"ask":3.2,"volume":900,"openInterest":7000,"impliedVolatility":0.21,"inTheMoney":false}}
                ]
            }}]
            }}],"error":null}}}}"#
        )
    }

    #[test]
    fn test_parse_option_chain_basic() {
        let chain = parse_option_chain("spy", sample_body().as_bytes(), retrieved()).unwrap();

        assert_eq!(chain.symbol, "SPY");
        assert_eq!(
            chain.expiration,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(chain.expirations.len(), 2);
        assert_eq!(
            chain.expirations[1],
            NaiveDate::from_ymd_opt(2024, 3, 22).unwrap()
        );
        assert_eq!(chain.retrieved, retrieved());
        assert_eq!(chain.calls.len(), 2);
        assert_eq!(chain.puts.len(), 1);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_parse_option_chain_contract_fields() {
        let chain = parse_option_chain("spy", sample_body().as_bytes(), retrieved()).unwrap();
        let call = &chain.calls[0];

        assert_eq!(call.contract_symbol, "SPY240315C00500000");
        assert!((call.strike - 500.0).abs() < 1e-10);
        assert!((call.last_price - 2.5).abs() < 1e-10);
        assert_eq!(call.bid, Some(2.4));
        assert_eq!(call.volume, Some(1200));
        assert_eq!(call.open_interest, Some(5400));
        assert!(call.in_the_money);
    }

    #[test]
    fn test_parse_option_chain_sparse_contract() {
        let chain = parse_option_chain("spy", sample_body().as_bytes(), retrieved()).unwrap();
        let sparse = &chain.calls[1];

        assert_eq!(sparse.contract_symbol, "SPY240315C00510000");
        assert!(sparse.bid.is_none());
        assert!(sparse.volume.is_none());
        assert!(sparse.implied_volatility.is_none());
        assert!(!sparse.in_the_money);
    }

    #[test]
    fn test_parse_option_chain_error_body() {
        let body = r#"{"optionChain":{"result":null,"error":{"code":"Not Found","description":"No options data"}}}"#;
        let err = parse_option_chain("nope", body.as_bytes(), retrieved()).unwrap_err();
        assert!(matches!(
            err,
            DivscanError::DataUnavailable { symbol } if symbol == "NOPE"
        ));
    }

    #[test]
    fn test_parse_option_chain_no_blocks() {
        let body = format!(
            r#"{{"optionChain":{{"result":[{{"expirationDates":[{EXPIRY1}],"options":[]}}],"error":null}}}}"#
        );
        let err = parse_option_chain("spy", body.as_bytes(), retrieved()).unwrap_err();
        assert!(matches!(err, DivscanError::DataUnavailable { .. }));
    }

    #[test]
    fn test_parse_option_chain_garbage() {
        let err = parse_option_chain("spy", b"<html>", retrieved()).unwrap_err();
        assert!(matches!(err, DivscanError::Json(_)));
    }

    #[test]
    fn test_parse_option_chain_bad_expiration_epoch() {
        // Far outside chrono's representable range.
        let body = format!(
            r#"{{"optionChain":{{"result":[{{"expirationDates":[{EXPIRY1}],"options":[{{"expirationDate":99999999999999,"calls":[],"puts":[]}}]}}],"error":null}}}}"#
        );
        let err = parse_option_chain("spy", body.as_bytes(), retrieved()).unwrap_err();
        assert!(matches!(err, DivscanError::Decode(_)));
    }
}
