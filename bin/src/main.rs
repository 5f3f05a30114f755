//! divscan CLI - MACD divergence screener for daily equity data.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "divscan")]
#[command(about = "MACD divergence screener for daily equity data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (suppress progress and summary output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a ticker list for actionable bullish divergences
    Screen {
        /// Ticker list file (comma-separated symbols)
        #[arg(default_value = "tickers.txt")]
        file: PathBuf,

        /// Start date (YYYY-MM-DD). Defaults to one year before the end date.
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to the current day.
        #[arg(short, long)]
        end: Option<String>,

        /// Maximum tickers fetched and analyzed concurrently
        #[arg(long, default_value = "8")]
        parallel: usize,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// MACD short EMA period
        #[arg(long, default_value = "12")]
        short_period: usize,

        /// MACD long EMA period
        #[arg(long, default_value = "26")]
        long_period: usize,

        /// Signal line EMA period
        #[arg(long, default_value = "9")]
        signal_period: usize,

        /// Pivot lookback bars on each side
        #[arg(long, default_value = "5")]
        lookback: usize,

        /// Maximum age in calendar days for an actionable event
        #[arg(long, default_value = "5")]
        max_age: i64,
    },

    /// Analyze a single ticker in detail
    Analyze {
        /// Ticker symbol (e.g., AAPL, BRK-B)
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to one year before the end date.
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to the current day.
        #[arg(short, long)]
        end: Option<String>,

        /// Overlay output path. Defaults to <symbol>_overlay_<date>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Export the chart-overlay rows
        #[arg(long)]
        export: bool,

        /// Also save the raw daily bars as <symbol>_bars_<date>.<format>
        #[arg(long)]
        save_bars: bool,

        /// MACD short EMA period
        #[arg(long, default_value = "12")]
        short_period: usize,

        /// MACD long EMA period
        #[arg(long, default_value = "26")]
        long_period: usize,

        /// Signal line EMA period
        #[arg(long, default_value = "9")]
        signal_period: usize,

        /// Pivot lookback bars on each side
        #[arg(long, default_value = "5")]
        lookback: usize,

        /// Maximum age in calendar days for an actionable event
        #[arg(long, default_value = "5")]
        max_age: i64,
    },

    /// Fetch an option chain and export it
    Options {
        /// Ticker symbol (e.g., AAPL, SPY)
        symbol: String,

        /// Expiration date (YYYY-MM-DD). Defaults to the nearest expiration.
        #[arg(short = 'x', long)]
        expiration: Option<String>,

        /// Choose the expiration interactively from the advertised list
        #[arg(long, conflicts_with = "expiration")]
        pick: bool,

        /// Output file path. Defaults to <symbol>_options_<date>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bare invocation prints help
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Screen {
            file,
            start,
            end,
            parallel,
            json,
            output,
            short_period,
            long_period,
            signal_period,
            lookback,
            max_age,
        } => {
            let params = display::build_params(
                short_period,
                long_period,
                signal_period,
                lookback,
                max_age,
            )?;
            commands::screen::screen(
                &file,
                start.as_deref(),
                end.as_deref(),
                parallel,
                json,
                output,
                params,
                cli.quiet,
            )
            .await
        }
        Commands::Analyze {
            symbol,
            start,
            end,
            output,
            format,
            export,
            save_bars,
            short_period,
            long_period,
            signal_period,
            lookback,
            max_age,
        } => {
            let params = display::build_params(
                short_period,
                long_period,
                signal_period,
                lookback,
                max_age,
            )?;
            commands::analyze::analyze_ticker(
                &symbol,
                start.as_deref(),
                end.as_deref(),
                output,
                format,
                export,
                save_bars,
                params,
                cli.quiet,
            )
            .await
        }
        Commands::Options {
            symbol,
            expiration,
            pick,
            output,
            format,
        } => {
            commands::options::options(
                &symbol,
                expiration.as_deref(),
                pick,
                output,
                format,
                cli.quiet,
            )
            .await
        }
    }
}
