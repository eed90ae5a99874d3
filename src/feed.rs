// src/feed.rs
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::volume::VolumeAggregator;

const READ_BUFFER_SIZE: usize = 1 << 16;

/// Where the feed comes from.
#[derive(Clone, Debug)]
pub enum Source<'a> {
    Stdin,
    File(&'a Path),
}

impl Source<'_> {
    pub fn open(&self) -> Result<Box<dyn Read>> {
        Ok(match self {
            Source::Stdin => Box::new(std::io::stdin().lock()),
            Source::File(p) => {
                Box::new(File::open(p).with_context(|| format!("open {:?}", p))?)
            }
        })
    }
}

impl std::fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => f.write_str("stdin"),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Splits `r` on `\n` and hands each line to `on_line` without its terminator
/// (a trailing `\r` is dropped too). A final unterminated line is delivered.
///
/// Returns the number of lines read. Only I/O errors fail; line content is
/// never inspected here.
pub fn read_lines<R: Read>(r: R, mut on_line: impl FnMut(&[u8])) -> Result<u64> {
    let mut br = BufReader::with_capacity(READ_BUFFER_SIZE, r);
    let mut line = Vec::with_capacity(128);
    let mut n = 0u64;

    loop {
        line.clear();
        if br.read_until(b'\n', &mut line).context("read feed")? == 0 {
            break;
        }

        let mut s = line.as_slice();
        if let Some(rest) = s.strip_suffix(b"\n") {
            s = rest;
        }
        if let Some(rest) = s.strip_suffix(b"\r") {
            s = rest;
        }

        n += 1;
        on_line(s);
    }

    Ok(n)
}

/// Folds every line of `r` into `agg`.
pub fn aggregate_reader<R: Read>(r: R, agg: &mut VolumeAggregator) -> Result<u64> {
    read_lines(r, |line| agg.process(line))
}
