//! Screen command implementation.
//!
//! Runs the divergence analysis over every ticker in a list file and
//! reports the symbols whose latest bullish event is still actionable.

use crate::display;
use anyhow::{Context, Result};
use divscan_lib::prelude::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Execute the screen command.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn screen(
    file: &Path,
    start: Option<&str>,
    end: Option<&str>,
    parallel: usize,
    json: bool,
    output: Option<PathBuf>,
    params: ScreenParams,
    quiet: bool,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Cannot read ticker list: {}", file.display()))?;
    let tickers = parse_ticker_list(&contents);

    if tickers.is_empty() {
        if !quiet {
            println!("No tickers found in {}", file.display());
        }
        return Ok(());
    }

    let range = display::resolve_range(start, end)?;
    let parallel = parallel.max(1);
    let config = ClientConfig {
        concurrency: parallel,
        ..Default::default()
    };
    let client = FetchClient::new(config)?;

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(tickers.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tickers {msg}",
                )
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(range.to_string());
        pb
    };

    // Analyze tickers concurrently; failures are collected, not fatal
    let results: Vec<(String, divscan_lib::Result<ScreenOutcome>)> = stream::iter(tickers)
        .map(|symbol| {
            let client = client.clone();
            let progress = progress.clone();
            async move {
                let outcome = screen_ticker(&client, &symbol, range, &params).await;
                progress.inc(1);
                (symbol, outcome)
            }
        })
        .buffer_unordered(parallel)
        .collect()
        .await;
    progress.finish_and_clear();

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    for (symbol, result) in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => failures.push((symbol, e)),
        }
    }
    outcomes.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    failures.sort_by(|a, b| a.0.cmp(&b.0));

    let report = if json {
        let mut body = serde_json::to_string_pretty(&outcomes)?;
        body.push('\n');
        body
    } else {
        text_report(&outcomes, range)
    };

    match output {
        Some(path) => {
            std::fs::write(&path, report)
                .with_context(|| format!("Cannot write report: {}", path.display()))?;
            if !quiet {
                println!("Report written to: {}", path.display());
            }
        }
        None => print!("{report}"),
    }

    // A failed ticker is skipped, never fatal for the batch
    if !failures.is_empty() && !quiet {
        eprintln!("Skipped {} ticker(s):", failures.len());
        for (symbol, error) in &failures {
            eprintln!("  {symbol}: {error}");
        }
    }

    Ok(())
}

/// Fetch and analyze one ticker.
async fn screen_ticker(
    client: &FetchClient,
    symbol: &str,
    range: DateRange,
    params: &ScreenParams,
) -> divscan_lib::Result<ScreenOutcome> {
    let series = fetch_daily(client, symbol, range).await?;
    let analysis = analyze(&series, params)?;
    Ok(ScreenOutcome::from_analysis(
        symbol.to_uppercase(),
        series.len(),
        &analysis,
    ))
}

/// Render the human-readable screen report.
fn text_report(outcomes: &[ScreenOutcome], range: DateRange) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Screened {} ticker(s) over {}\n",
        outcomes.len(),
        range
    ));

    let actionable: Vec<&ScreenOutcome> = outcomes.iter().filter(|o| o.actionable).collect();
    if actionable.is_empty() {
        out.push_str("No actionable bullish divergences.\n");
        return out;
    }

    out.push_str("\nActionable bullish divergences:\n");
    for outcome in actionable {
        if let Some(event) = &outcome.latest_bullish {
            out.push_str(&format!(
                "  {:<8} {} on {} ({} event(s) total)\n",
                outcome.symbol, event.kind, event.date, outcome.events
            ));
        }
    }
    out
}
