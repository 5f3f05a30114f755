//! Options command implementation.
//!
//! Fetches a ticker's option chain for one expiration and exports it.

use crate::display::{self, Format};
use anyhow::{Context, Result};
use divscan_lib::export_filename;
use divscan_lib::prelude::*;
use inquire::Select;
use std::path::PathBuf;

/// Execute the options command.
pub(crate) async fn options(
    symbol: &str,
    expiration: Option<&str>,
    pick: bool,
    output: Option<PathBuf>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let client = FetchClient::with_defaults()?;

    let chain = if pick {
        pick_chain(&client, symbol).await?
    } else {
        let requested = expiration.map(display::parse_date).transpose()?;
        fetch_option_chain(&client, symbol, requested)
            .await
            .with_context(|| format!("Cannot fetch option chain for {symbol}"))?
    };

    let path = output.unwrap_or_else(|| {
        PathBuf::from(export_filename(
            &chain.symbol,
            "options",
            chain.retrieved,
            format.to_output(),
        ))
    });
    display::write_options(&chain, &path, format)?;

    if !quiet {
        println!(
            "{} options expiring {}: {} calls, {} puts",
            chain.symbol,
            chain.expiration,
            chain.calls.len(),
            chain.puts.len()
        );
        println!("Written to: {}", path.display());
    }

    Ok(())
}

/// Fetch the nearest chain, then let the user choose among the advertised
/// expirations.
async fn pick_chain(client: &FetchClient, symbol: &str) -> Result<OptionChain> {
    let nearest = fetch_option_chain(client, symbol, None)
        .await
        .with_context(|| format!("Cannot fetch option chain for {symbol}"))?;

    let labels: Vec<String> = nearest
        .expirations
        .iter()
        .map(ToString::to_string)
        .collect();
    let choice = Select::new("Expiration:", labels)
        .prompt()
        .context("No expiration selected")?;
    let date = display::parse_date(&choice)?;

    if date == nearest.expiration {
        Ok(nearest)
    } else {
        Ok(fetch_option_chain(client, symbol, Some(date)).await?)
    }
}
