// src/rank.rs
//! Ranking of accumulated volumes.

use hashbrown::HashMap;
use serde::Serialize;

use crate::message::Symbol;

/// Default report size.
pub const TOP_N: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedPair {
    pub symbol: Symbol,
    pub volume: u64,
}

/// Symbols with nonzero volume, highest volume first.
///
/// Equal volumes are ordered by symbol ascending so that reports are
/// reproducible across runs.
pub fn rank(volumes: &HashMap<Symbol, u64>) -> Vec<RankedPair> {
    let mut out: Vec<RankedPair> = volumes
        .iter()
        .filter(|&(_, &v)| v > 0)
        .map(|(s, &v)| RankedPair { symbol: s.clone(), volume: v })
        .collect();
    out.sort_unstable_by(|a, b| b.volume.cmp(&a.volume).then_with(|| a.symbol.cmp(&b.symbol)));
    out
}

pub fn top_n(ranked: &[RankedPair], n: usize) -> &[RankedPair] {
    &ranked[..n.min(ranked.len())]
}
