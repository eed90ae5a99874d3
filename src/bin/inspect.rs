use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use hashbrown::HashSet;

use feed_volume::feed::{self, Source};
use feed_volume::message::{self, Message, OrderId};

/// Tallies record kinds and rejection reasons in a feed.
#[derive(Parser, Debug)]
#[command(name = "feed-inspect", version)]
struct Cli {
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let source = match &cli.file {
        Some(p) => Source::File(p),
        None => Source::Stdin,
    };

    let mut kinds = BTreeMap::<&'static str, u64>::new();
    let mut rejects = BTreeMap::<&'static str, u64>::new();
    let mut orders = HashSet::<OrderId>::new();

    let lines = feed::read_lines(source.open()?, |line| match message::decode(line) {
        Ok(m) => {
            if let Message::AddOrder { order_id, .. } = &m {
                orders.insert(*order_id);
            }
            *kinds.entry(m.kind().as_str()).or_insert(0) += 1;
        }
        Err(r) => *rejects.entry(r.as_str()).or_insert(0) += 1,
    })?;

    println!("lines={}", lines);
    println!("distinct_orders={}", orders.len());
    for (k, n) in &kinds {
        println!("{}={}", k, n);
    }
    for (k, n) in &rejects {
        println!("rejected_{}={}", k, n);
    }
    Ok(())
}
