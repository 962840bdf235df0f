mod analyst;
mod catalog;
mod config;
mod distribution;
mod error;
mod loader;
mod report;
mod stats;
mod types;
mod window;

use crate::analyst::Analyst;
use crate::config::Config;
use crate::types::{Instrument, View};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Use cup data instead of faceplate data.
    #[arg(long)]
    cup: bool,

    /// Run to analyze (1-based).
    #[arg(long, default_value_t = 1)]
    run: usize,

    /// Plot raw samples instead of window averages.
    #[arg(long)]
    raw: bool,

    /// Number of samples per window average (overrides the config).
    #[arg(long)]
    n: Option<usize>,

    /// Directory holding the series files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// TOML file with analysis parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File the plot report is written to.
    #[arg(long, default_value = "points.msgpack")]
    out: PathBuf,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mut cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    if let Some(n) = args.n {
        cfg.window_size = n;
        cfg.validate().context("invalid window size argument")?;
    }
    log::info!("{cfg:#?}");

    let instrument = if args.cup {
        Instrument::Cup
    } else {
        Instrument::Faceplate
    };
    let view = if args.raw {
        View::Raw
    } else {
        View::Decimated {
            window_size: cfg.window_size,
        }
    };

    let analyst = Analyst::discover(cfg, &args.data_dir, instrument)
        .context("failed to construct analyst")?;
    let report = analyst
        .analyze(args.run, view)
        .with_context(|| format!("failed to analyze run {}", args.run))?;

    report.save(&args.out).context("failed to save report")?;
    log::info!("saved {:?}", args.out);

    print!("{}", report.summary());

    Ok(())
}
