// src/volume.rs
//! Per-symbol executed volume aggregation.
//!
//! [`VolumeAggregator`] owns the two pieces of running state:
//!
//! - **Order table**: order ID → symbol, filled by Add-Order records and read by
//!   Order-Executed records. Entries are never evicted; memory grows with the
//!   number of distinct order IDs in the replay.
//! - **Volumes**: symbol → cumulative executed shares. Entries appear on the
//!   first nonzero contribution and only ever grow.
//!
//! Symbols are raw wire bytes, so lookups take anything that is `AsRef<[u8]>`.
//!
//! ## Example
//!
//! ```rust
//! use feed_volume::volume::VolumeAggregator;
//!
//! let mut agg = VolumeAggregator::new();
//! agg.process(b"S12345678P000000000001B000250BAR   0000100000000000000009");
//! assert_eq!(agg.volume("BAR"), 250);
//! ```

use hashbrown::HashMap;

use crate::message::{self, Message, OrderId, Symbol};

#[derive(Debug, Default)]
pub struct VolumeAggregator {
    orders: HashMap<OrderId, Symbol>,
    volumes: HashMap<Symbol, u64>,
}

impl VolumeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve_orders(&mut self, n: usize) {
        self.orders.reserve(n);
    }

    /// Decodes and folds one line. Lines that do not decode are dropped.
    #[inline]
    pub fn process(&mut self, line: &[u8]) {
        if let Ok(msg) = message::decode(line) {
            self.apply(msg);
        }
    }

    pub fn apply(&mut self, msg: Message) {
        match msg {
            Message::AddOrder { order_id, symbol } => {
                self.orders.insert(order_id, symbol);
            }
            Message::OrderExecuted { order_id, executed_shares } => {
                let Some(symbol) = self.orders.get(&order_id) else { return };
                if symbol.is_empty() || executed_shares == 0 {
                    return;
                }
                let symbol = symbol.clone();
                self.add_volume(symbol, executed_shares);
            }
            Message::Trade { shares, symbol } => {
                if shares != 0 {
                    self.add_volume(symbol, shares);
                }
            }
        }
    }

    fn add_volume(&mut self, symbol: Symbol, shares: u64) {
        let v = self.volumes.entry(symbol).or_insert(0);
        *v = v.saturating_add(shares);
    }

    pub fn volume(&self, symbol: impl AsRef<[u8]>) -> u64 {
        self.volumes.get(symbol.as_ref()).copied().unwrap_or(0)
    }

    pub fn symbol_for(&self, order_id: &OrderId) -> Option<&[u8]> {
        self.orders.get(order_id).map(Symbol::as_bytes)
    }

    pub fn volumes(&self) -> &HashMap<Symbol, u64> {
        &self.volumes
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl VolumeAggregator {
    pub fn assert_invariants(&self) {
        // volumes only hold symbols that actually received shares
        assert!(self.volumes.values().all(|&v| v > 0), "zero volume entry");
    }
}
