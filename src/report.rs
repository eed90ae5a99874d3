// src/report.rs
use itoa::Buffer;
use serde::Serialize;
use std::io::{self, Write};

use crate::rank::RankedPair;

pub const RULE: &str = "----------------------------------";

#[inline(always)]
fn push_str(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
}

#[inline(always)]
fn push_u64(out: &mut Vec<u8>, buf: &mut Buffer, v: u64) {
    push_str(out, buf.format(v));
}

/// Banner plus one `SYMBOL\tVOLUME` line per entry. Empty input encodes to
/// nothing at all, banner included.
pub fn encode_text(top: &[RankedPair]) -> Vec<u8> {
    if top.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(3 * (RULE.len() + 1) + top.len() * 24);
    let mut b = Buffer::new();

    push_str(&mut out, RULE);
    push_str(&mut out, "\nTop ");
    push_u64(&mut out, &mut b, top.len() as u64);
    push_str(&mut out, " Symbols by Executed Volume\n");
    push_str(&mut out, RULE);
    out.push(b'\n');

    for p in top {
        out.extend_from_slice(p.symbol.as_bytes());
        out.push(b'\t');
        push_u64(&mut out, &mut b, p.volume);
        out.push(b'\n');
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    n: usize,
    symbols: &'a [RankedPair],
}

/// Single-line JSON object, newline terminated. Empty input encodes to nothing.
pub fn encode_json(top: &[RankedPair]) -> serde_json::Result<Vec<u8>> {
    if top.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = serde_json::to_vec(&JsonReport { kind: "top_volume", n: top.len(), symbols: top })?;
    out.push(b'\n');
    Ok(out)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn write_report<W: Write>(mut w: W, top: &[RankedPair], format: Format) -> io::Result<()> {
    let bytes = match format {
        Format::Text => encode_text(top),
        Format::Json => encode_json(top).map_err(io::Error::from)?,
    };
    if bytes.is_empty() {
        return Ok(());
    }
    w.write_all(&bytes)?;
    w.flush()
}
