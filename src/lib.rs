//! # Feed Volume - Executed Volume Ranking for Fixed-Width Order Feeds
//!
//! This crate reads a simplified order-book feed, one fixed-width record per
//! line, and totals executed share volume per symbol in a single pass.
//!
//! ## Architecture
//!
//! - **Message**: decodes a raw line into a typed record or a rejection reason
//! - **Volume**: order ID → symbol table plus per-symbol volume accumulator
//! - **Feed**: line splitting over any `Read`; I/O failure is the only fatal error
//! - **Rank**: descending sort and top-N truncation
//! - **Report**: text banner and JSON renderings of the ranking
//!
//! Malformed, short, or unrecognized records are dropped without any output.
//!
//! ## Example
//!
//! ```rust
//! use feed_volume::{feed, rank, report, volume::VolumeAggregator};
//!
//! let input: &[u8] = b"S12345678P000000000001B000250BAR   0000100000000000000009\n";
//! let mut agg = VolumeAggregator::new();
//! feed::aggregate_reader(input, &mut agg).unwrap();
//!
//! let ranked = rank::rank(agg.volumes());
//! let text = report::encode_text(rank::top_n(&ranked, rank::TOP_N));
//! assert!(text.ends_with(b"BAR\t250\n"));
//! ```
pub mod feed;
pub mod message;
pub mod rank;
pub mod report;
pub mod volume;
