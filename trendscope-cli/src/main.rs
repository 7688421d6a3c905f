//! TrendScope CLI — analyze and generate commands.
//!
//! Commands:
//! - `analyze` — run the analysis pipeline over a CSV/JSON file or synthetic symbols
//! - `generate` — write a deterministic synthetic bar series as JSON or CSV

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trendscope_core::data::{write_csv, BarSource, FileSource, SyntheticSource};
use trendscope_core::{AnalysisReport, Bar, Pipeline, TrendScopeConfig};

#[derive(Parser)]
#[command(
    name = "trendscope",
    about = "TrendScope CLI — regime, pattern, trend and risk analysis of OHLCV bars"
)]
struct Cli {
    /// Log stage details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis pipeline and print the narrative (or JSON report).
    Analyze {
        /// CSV or JSON bar file.
        #[arg(long, conflicts_with = "synthetic")]
        file: Option<PathBuf>,

        /// Synthetic symbols to analyze (e.g., SPY BTCUSDT). Run in parallel.
        #[arg(long, num_args = 1..)]
        synthetic: Vec<String>,

        /// Number of synthetic bars per symbol.
        #[arg(long, default_value_t = 120, conflicts_with = "file")]
        bars: usize,

        /// First synthetic bar date (YYYY-MM-DD). Defaults to 2024-01-02.
        #[arg(long, conflicts_with = "file")]
        start: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ignore any advisor credential and use the heuristic risk strategy.
        #[arg(long, default_value_t = false)]
        heuristic: bool,

        /// Print the structured report as JSON instead of the narrative.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a synthetic bar series to stdout.
    Generate {
        /// Symbol used to seed the random walk.
        symbol: String,

        /// Number of bars.
        #[arg(long, default_value_t = 120)]
        bars: usize,

        /// First bar date (YYYY-MM-DD). Defaults to 2024-01-02.
        #[arg(long)]
        start: Option<String>,

        /// Seconds between bars.
        #[arg(long, default_value_t = 86_400)]
        interval_secs: i64,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            file,
            synthetic,
            bars,
            start,
            config,
            heuristic,
            json,
        } => run_analyze(file, synthetic, bars, start, config, heuristic, json),
        Commands::Generate {
            symbol,
            bars,
            start,
            interval_secs,
            format,
        } => run_generate(&symbol, bars, start.as_deref(), interval_secs, format),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    file: Option<PathBuf>,
    synthetic: Vec<String>,
    bars: usize,
    start: Option<String>,
    config_path: Option<PathBuf>,
    heuristic: bool,
    json: bool,
) -> Result<()> {
    if file.is_none() && synthetic.is_empty() {
        bail!("one of --file or --synthetic is required");
    }

    let pipeline = if heuristic {
        Pipeline::heuristic()
    } else {
        let config = match config_path {
            Some(path) => TrendScopeConfig::from_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => TrendScopeConfig::default(),
        };
        Pipeline::from_config(&config)
    };
    info!(strategy = pipeline.risk_strategy(), "pipeline ready");

    if let Some(path) = file {
        let series = FileSource::new(&path)
            .load("")
            .with_context(|| format!("loading bars from {}", path.display()))?;
        let label = path.display().to_string();
        print_results(&pipeline, &[(label, series)], json)?;
        return Ok(());
    }

    let source = synthetic_source(bars, start.as_deref(), 86_400)?;
    let loaded: Vec<(String, Vec<Bar>)> = synthetic
        .par_iter()
        .map(|symbol| {
            source
                .load(symbol)
                .map(|series| (symbol.clone(), series))
                .with_context(|| format!("generating bars for {symbol}"))
        })
        .collect::<Result<_>>()?;

    print_results(&pipeline, &loaded, json)
}

/// Analyze every series in parallel and print in input order.
fn print_results(pipeline: &Pipeline, series: &[(String, Vec<Bar>)], json: bool) -> Result<()> {
    if json {
        let reports: Vec<(&str, AnalysisReport)> = series
            .par_iter()
            .map(|(label, bars)| (label.as_str(), pipeline.analyze(bars)))
            .collect();
        let value = if let [(_, report)] = reports.as_slice() {
            serde_json::to_value(report)?
        } else {
            let map: serde_json::Map<String, serde_json::Value> = reports
                .into_iter()
                .map(|(label, report)| Ok((label.to_string(), serde_json::to_value(report)?)))
                .collect::<Result<_>>()?;
            serde_json::Value::Object(map)
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let narratives: Vec<(&str, String)> = series
        .par_iter()
        .map(|(label, bars)| (label.as_str(), pipeline.run(bars).1))
        .collect();
    let multiple = narratives.len() > 1;
    for (i, (label, narrative)) in narratives.iter().enumerate() {
        if multiple {
            if i > 0 {
                println!();
            }
            println!("=== {label} ===");
        }
        println!("{narrative}");
    }
    Ok(())
}

fn run_generate(
    symbol: &str,
    bars: usize,
    start: Option<&str>,
    interval_secs: i64,
    format: OutputFormat,
) -> Result<()> {
    if interval_secs <= 0 {
        bail!("--interval-secs must be positive");
    }
    let source = synthetic_source(bars, start, interval_secs)?;
    let series = source.load(symbol)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
        OutputFormat::Csv => print!("{}", write_csv(&series)?),
    }
    Ok(())
}

fn synthetic_source(
    bars: usize,
    start: Option<&str>,
    interval_secs: i64,
) -> Result<SyntheticSource> {
    let mut source = SyntheticSource {
        bars,
        interval_secs,
        ..SyntheticSource::default()
    };
    if let Some(s) = start {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --start date '{s}' (expected YYYY-MM-DD)"))?;
        source.start_time = date
            .and_hms_opt(0, 0, 0)
            .context("invalid start time")?
            .and_utc()
            .timestamp();
    }
    Ok(source)
}
