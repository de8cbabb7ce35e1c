//! DKXLab CLI — screen the A-share universe for DKX cross-up signals.
//!
//! One invocation is one snapshot screen: fetch the symbol universe, fan out
//! across a bounded worker pool, and log every symbol whose DKX crossed above
//! its SMA on the latest bar with MACD confirmation.

mod logging;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use dkxlab_core::data::{EastmoneyProvider, MarketDataProvider};
use dkxlab_runner::{run_screen, ScreenConfig, ScreenSummary};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "dkxlab", about = "DKX cross-up screener for the A-share universe")]
struct Cli {
    /// Start date (YYYYMMDD). Defaults to 365 days before the end date.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYYMMDD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Worker pool size. Defaults to min(32, cores + 4).
    #[arg(long)]
    workers: Option<usize>,

    /// Collapse the daily series into blocks of this many bars before
    /// computing indicators.
    #[arg(long)]
    resample: Option<usize>,

    /// Log file, truncated at startup.
    #[arg(long, default_value = "dkxlab.log")]
    log_file: PathBuf,

    /// Screen these symbols instead of fetching the full universe.
    #[arg(long, num_args = 1..)]
    symbols: Option<Vec<String>>,

    /// TOML config file; CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_file)?;

    let config = build_config(&cli)?;
    let provider = EastmoneyProvider::new();

    let symbols = match cli.symbols {
        Some(symbols) => symbols,
        None => provider
            .fetch_universe()
            .context("fetch symbol universe")?,
    };
    info!("screening {} symbols via {}", symbols.len(), provider.name());

    let summary = run_screen(&provider, &config, &symbols);
    print_summary(&summary);

    // Per-symbol failures are already in the log; the run itself succeeded.
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ScreenConfig> {
    let mut config = match &cli.config {
        Some(path) => ScreenConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ScreenConfig::default(),
    };

    if let Some(end) = &cli.end {
        config.end = parse_date(end)?;
        if cli.start.is_none() && cli.config.is_none() {
            config.start = config.end - chrono::Duration::days(365);
        }
    }
    if let Some(start) = &cli.start {
        config.start = parse_date(start)?;
    }
    if let Some(workers) = cli.workers {
        config.worker_count = workers;
    }
    if let Some(block) = cli.resample {
        config.resample_block = Some(block);
    }

    config.validate()?;
    Ok(config)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y%m%d").with_context(|| format!("parse date '{s}' as YYYYMMDD"))
}

fn print_summary(summary: &ScreenSummary) {
    println!();
    println!("=== Screen Result ===");
    println!("Symbols:    {}", summary.total);
    println!("Crossed:    {}", summary.crossed.len());
    println!("No signal:  {}", summary.no_signal);
    println!("Skipped:    {}", summary.skipped);
    println!("Failed:     {}", summary.failed);

    if !summary.crossed.is_empty() {
        println!();
        println!("--- Cross-ups ---");
        for symbol in &summary.crossed {
            println!("{symbol}");
        }
    }
}
