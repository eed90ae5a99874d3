// src/main.rs
use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::{io, path::PathBuf};
use tracing::info;

use feed_volume::{
    feed::{self, Source},
    rank::{self, TOP_N},
    report::{self, Format},
    volume::VolumeAggregator,
};

const INITIAL_ORDER_CAPACITY: usize = 65_536;

#[derive(ClapParser, Debug)]
#[command(name = "feed-volume", version)]
#[command(about = "Ranks symbols by executed volume from a fixed-width order feed")]
struct Cli {
    /// Read the feed from a file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Number of symbols to report (at least 1).
    #[arg(long, default_value_t = TOP_N as u64, value_parser = clap::value_parser!(u64).range(1..))]
    top: u64,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let source = match &cli.file {
        Some(p) => Source::File(p),
        None => Source::Stdin,
    };
    info!(%source, top = cli.top, format = ?cli.format, "reading feed");

    let mut agg = VolumeAggregator::new();
    agg.reserve_orders(INITIAL_ORDER_CAPACITY);
    let lines = feed::aggregate_reader(source.open()?, &mut agg)
        .with_context(|| format!("ingest {source}"))?;

    info!(
        lines,
        orders = agg.order_count(),
        symbols = agg.symbol_count(),
        "stream complete"
    );

    let ranked = rank::rank(agg.volumes());
    let top = rank::top_n(&ranked, usize::try_from(cli.top).unwrap_or(usize::MAX));
    report::write_report(io::stdout().lock(), top, cli.format).context("write report")?;
    Ok(())
}
