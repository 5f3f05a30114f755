//! Analyze command implementation.
//!
//! Fetches one ticker, runs the full divergence analysis, prints a
//! summary, and optionally exports the chart-overlay rows.

use crate::display::{self, Format};
use anyhow::{Context, Result};
use divscan_lib::{OverlayRow, export_filename};
use divscan_lib::prelude::*;
use std::path::PathBuf;

/// Execute the analyze command.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn analyze_ticker(
    symbol: &str,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<PathBuf>,
    format: Format,
    export: bool,
    save_bars: bool,
    params: ScreenParams,
    quiet: bool,
) -> Result<()> {
    let range = display::resolve_range(start, end)?;
    let client = FetchClient::with_defaults()?;

    let series = fetch_daily(&client, symbol, range)
        .await
        .with_context(|| format!("Cannot fetch daily bars for {symbol}"))?;
    let analysis = analyze(&series, &params)?;

    if !quiet {
        print_summary(symbol, &series, &analysis, range);
    }

    let last_date = series
        .last_date()
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    if export || output.is_some() {
        let rows: Vec<OverlayRow> = analysis.overlay_rows(&series);
        let path = output.unwrap_or_else(|| {
            PathBuf::from(export_filename(
                symbol,
                "overlay",
                last_date,
                format.to_output(),
            ))
        });
        display::write_overlay(&rows, &path, format)?;
        if !quiet {
            println!("Overlay written to: {}", path.display());
        }
    }

    if save_bars {
        let path = PathBuf::from(export_filename(symbol, "bars", last_date, format.to_output()));
        display::write_bars(series.bars(), &path, format)?;
        if !quiet {
            println!("Bars written to: {}", path.display());
        }
    }

    Ok(())
}

/// Print the analysis summary for one ticker.
fn print_summary(symbol: &str, series: &Series, analysis: &TickerAnalysis, range: DateRange) {
    println!("{}: {} bars over {}", symbol.to_uppercase(), series.len(), range);

    if analysis.oscillator.is_empty() {
        println!("Not enough history for the oscillator; no signal.");
        return;
    }

    println!(
        "Oscillator coverage: {} bars from {}",
        analysis.oscillator.len(),
        analysis.oscillator[0].date
    );
    println!(
        "Pivots: {} price, {} oscillator",
        analysis.price_pivots.len(),
        analysis.oscillator_pivots.len()
    );

    if analysis.events.is_empty() {
        println!("No divergences found.");
    } else {
        println!();
        println!("{:<12} {}", "DATE", "DIVERGENCE");
        println!("{}", "-".repeat(30));
        for event in &analysis.events {
            println!("{:<12} {}", event.date, event.kind);
        }
    }

    println!();
    match analysis.latest_bullish() {
        Some(event) if analysis.actionable => {
            println!("ACTIONABLE: {} divergence on {}", event.kind, event.date);
        }
        Some(event) => {
            println!(
                "Not actionable: latest bullish-class event on {} is stale",
                event.date
            );
        }
        None => println!("Not actionable: no bullish-class events."),
    }
}
