// src/message.rs
//! Fixed-width record decoding.
//!
//! Every line of the feed is one record. The first ten bytes are common to all
//! records (init char, timestamp, message type); the rest of the layout depends
//! on the type byte at offset 9. Only three kinds are recognized, each with an
//! exact total length:
//!
//! | Type | Kind                 | Length |
//! |------|----------------------|--------|
//! | `A`  | Add Order (short)    | 46     |
//! | `E`  | Order Executed       | 40     |
//! | `P`  | Trade (short)        | 57     |
//!
//! A line is only dispatched when it is longer than 40 bytes. An `E` record is
//! exactly 40 bytes, so [`decode`] never yields one; [`decode_record`] decodes
//! a body for a known kind without the common gate.
//!
//! All offsets are byte positions, half-open `[start, end)`. Field access goes
//! through [`field`], which never panics on short input.
//!
//! ## Example
//!
//! ```rust
//! use feed_volume::message::{decode, Message};
//!
//! let line = b"S12345678P000000000001B000250BAR   0000100000000000000009";
//! match decode(line) {
//!     Ok(Message::Trade { shares, symbol }) => {
//!         assert_eq!(shares, 250);
//!         assert_eq!(symbol.as_bytes(), b"BAR");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::borrow::Borrow;
use std::ops::Range;

use serde::{Serialize, Serializer};
use thiserror::Error;

pub const INIT_CHAR: Range<usize> = 0..1;
pub const TIMESTAMP: Range<usize> = 1..9;
pub const MESSAGE_TYPE: Range<usize> = 9..10;

/// Shortest line that is dispatched at all.
pub const MIN_DISPATCH_LEN: usize = 41;

pub mod add_order {
    use std::ops::Range;

    pub const LEN: usize = 46;
    pub const ORDER_ID: Range<usize> = 10..22;
    pub const SIDE: Range<usize> = 22..23;
    pub const SHARES: Range<usize> = 23..29;
    pub const SYMBOL: Range<usize> = 29..35;
    pub const PRICE: Range<usize> = 35..45;
    pub const DISPLAY: Range<usize> = 45..46;
}

pub mod order_executed {
    use std::ops::Range;

    pub const LEN: usize = 40;
    pub const ORDER_ID: Range<usize> = 10..22;
    pub const EXECUTED_SHARES: Range<usize> = 22..28;
    pub const EXECUTION_ID: Range<usize> = 28..40;
}

pub mod trade {
    use std::ops::Range;

    pub const LEN: usize = 57;
    pub const ORDER_ID: Range<usize> = 10..22;
    pub const SIDE: Range<usize> = 22..23;
    pub const SHARES: Range<usize> = 23..29;
    pub const SYMBOL: Range<usize> = 29..35;
    pub const PRICE: Range<usize> = 35..45;
    pub const EXECUTION_ID: Range<usize> = 45..57;
}

/// 12-byte order reference, kept as raw bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(pub [u8; 12]);

impl OrderId {
    pub fn from_slice(b: &[u8]) -> Option<Self> {
        <[u8; 12]>::try_from(b).ok().map(OrderId)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Ticker as it appeared on the wire, padding trimmed.
///
/// Bytes are kept verbatim so that symbols differing only in non-UTF-8 bytes
/// stay distinct. Ordering is bytewise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Box<[u8]>);

impl Symbol {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<[u8]> for Symbol {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Symbol {
    fn from(b: &[u8]) -> Self {
        Symbol(b.into())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.as_bytes().into())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol(s.into_bytes().into_boxed_slice())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// JSON strings must be UTF-8, so invalid bytes are replaced there.
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    AddOrder,
    OrderExecuted,
    Trade,
}

impl Kind {
    pub fn from_type_byte(b: u8) -> Option<Kind> {
        match b {
            b'A' => Some(Kind::AddOrder),
            b'E' => Some(Kind::OrderExecuted),
            b'P' => Some(Kind::Trade),
            _ => None,
        }
    }

    pub fn expected_len(self) -> usize {
        match self {
            Kind::AddOrder => add_order::LEN,
            Kind::OrderExecuted => order_executed::LEN,
            Kind::Trade => trade::LEN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::AddOrder => "add_order",
            Kind::OrderExecuted => "order_executed",
            Kind::Trade => "trade",
        }
    }
}

/// Decoded record, reduced to the fields aggregation needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    AddOrder { order_id: OrderId, symbol: Symbol },
    OrderExecuted { order_id: OrderId, executed_shares: u64 },
    Trade { shares: u64, symbol: Symbol },
}

impl Message {
    pub fn kind(&self) -> Kind {
        match self {
            Message::AddOrder { .. } => Kind::AddOrder,
            Message::OrderExecuted { .. } => Kind::OrderExecuted,
            Message::Trade { .. } => Kind::Trade,
        }
    }
}

/// Why a line was not decoded. Callers on the aggregation path drop these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("line too short: {0} bytes")]
    TooShort(usize),
    #[error("unknown message type {0:#04x}")]
    UnknownType(u8),
    #[error("{kind:?} record must be {expected} bytes, got {actual}")]
    BadLength {
        kind: Kind,
        expected: usize,
        actual: usize,
    },
}

impl Reject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reject::TooShort(_) => "too_short",
            Reject::UnknownType(_) => "unknown_type",
            Reject::BadLength { .. } => "bad_length",
        }
    }
}

#[inline(always)]
pub fn field(line: &[u8], r: Range<usize>) -> Option<&[u8]> {
    line.get(r)
}

#[inline(always)]
fn is_pad(b: &u8) -> bool {
    matches!(*b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Strips leading and trailing space, tab, LF, VT, FF and CR.
pub fn trim_pad(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !is_pad(first) {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !is_pad(last) {
            break;
        }
        b = rest;
    }
    b
}

#[inline]
fn symbol_at(line: &[u8], r: Range<usize>) -> Symbol {
    Symbol::from(trim_pad(field(line, r).unwrap_or_default()))
}

/// Unsigned decimal share count. Anything that does not parse counts as zero.
#[inline]
fn shares_at(line: &[u8], r: Range<usize>) -> u64 {
    field(line, r)
        .and_then(|b| std::str::from_utf8(b).ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
}

#[inline]
fn order_id_at(line: &[u8], r: Range<usize>) -> Option<OrderId> {
    field(line, r).and_then(OrderId::from_slice)
}

/// Classifies and decodes one line (without its newline).
pub fn decode(line: &[u8]) -> Result<Message, Reject> {
    if line.len() < MIN_DISPATCH_LEN {
        return Err(Reject::TooShort(line.len()));
    }

    let ty = field(line, MESSAGE_TYPE)
        .and_then(|b| b.first().copied())
        .ok_or(Reject::TooShort(line.len()))?;
    let kind = Kind::from_type_byte(ty).ok_or(Reject::UnknownType(ty))?;
    decode_record(kind, line)
}

/// Decodes `line` as a record of `kind`, checking only its exact length.
pub fn decode_record(kind: Kind, line: &[u8]) -> Result<Message, Reject> {
    let expected = kind.expected_len();
    let bad = Reject::BadLength { kind, expected, actual: line.len() };
    if line.len() != expected {
        return Err(bad);
    }

    let msg = match kind {
        Kind::AddOrder => Message::AddOrder {
            order_id: order_id_at(line, add_order::ORDER_ID).ok_or(bad)?,
            symbol: symbol_at(line, add_order::SYMBOL),
        },
        Kind::OrderExecuted => Message::OrderExecuted {
            order_id: order_id_at(line, order_executed::ORDER_ID).ok_or(bad)?,
            executed_shares: shares_at(line, order_executed::EXECUTED_SHARES),
        },
        Kind::Trade => Message::Trade {
            shares: shares_at(line, trade::SHARES),
            symbol: symbol_at(line, trade::SYMBOL),
        },
    };
    Ok(msg)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn fixture_lengths_match_layout() {
        assert_eq!(add_order("1", "FOO").len(), add_order::LEN);
        assert_eq!(executed("1", "100").len(), order_executed::LEN);
        assert_eq!(trade("BAR", "250").len(), trade::LEN);
    }

    #[test]
    fn decodes_add_order_and_trims_symbol() {
        let m = decode(&add_order("000000000001", "FOO")).unwrap();
        assert_eq!(
            m,
            Message::AddOrder {
                order_id: OrderId(*b"000000000001"),
                symbol: "FOO".into()
            }
        );
    }

    #[test]
    fn executed_body_decodes_but_line_is_below_gate() {
        let line = executed("000000000001", "000100");
        assert_eq!(
            decode_record(Kind::OrderExecuted, &line).unwrap(),
            Message::OrderExecuted {
                order_id: OrderId(*b"000000000001"),
                executed_shares: 100
            }
        );
        assert_eq!(decode(&line), Err(Reject::TooShort(40)));
    }

    #[test]
    fn decodes_trade() {
        let m = decode(&trade("BAR", "000250")).unwrap();
        assert_eq!(m, Message::Trade { shares: 250, symbol: "BAR".into() });
    }

    #[test]
    fn bad_share_field_defaults_to_zero() {
        let mut line = trade("BAR", "000250");
        line[trade::SHARES.start] = b'x';
        assert_eq!(decode(&line).unwrap(), Message::Trade { shares: 0, symbol: "BAR".into() });

        let mut line = executed("7", "000010");
        line[order_executed::EXECUTED_SHARES.start] = b'-';
        match decode_record(Kind::OrderExecuted, &line).unwrap() {
            Message::OrderExecuted { executed_shares, .. } => assert_eq!(executed_shares, 0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_lines_are_rejected() {
        assert_eq!(decode(b""), Err(Reject::TooShort(0)));
        assert_eq!(decode(&[b'A'; 30]), Err(Reject::TooShort(30)));
        assert_eq!(decode(&[b'P'; 40]), Err(Reject::TooShort(40)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut line = trade("BAR", "000250");
        line[9] = b'X';
        assert_eq!(decode(&line), Err(Reject::UnknownType(b'X')));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut line = add_order("1", "FOO");
        line.push(b' ');
        assert_eq!(
            decode(&line),
            Err(Reject::BadLength { kind: Kind::AddOrder, expected: 46, actual: 47 })
        );

        let line = &trade("BAR", "000250")[..46];
        assert!(matches!(decode(line), Err(Reject::BadLength { kind: Kind::Trade, .. })));

        let mut line = executed("1", "000100");
        line.push(b'0');
        assert!(matches!(decode(&line), Err(Reject::BadLength { kind: Kind::OrderExecuted, .. })));
    }

    #[test]
    fn invalid_utf8_symbol_bytes_are_kept() {
        let a = decode(&trade_raw_symbol(b"B\xffR   ", "000250")).unwrap();
        let b = decode(&trade_raw_symbol(b"B\xfeR   ", "000100")).unwrap();
        match (a, b) {
            (Message::Trade { symbol: sa, .. }, Message::Trade { symbol: sb, .. }) => {
                assert_eq!(sa.as_bytes(), b"B\xffR");
                assert_eq!(sb.as_bytes(), b"B\xfeR");
                assert_ne!(sa, sb);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn symbol_padding_includes_vertical_tab_and_form_feed() {
        let m = decode(&trade_raw_symbol(b"\x0cBAR\x0b ", "000250")).unwrap();
        assert_eq!(m, Message::Trade { shares: 250, symbol: "BAR".into() });

        assert_eq!(trim_pad(b" \t\r\n\x0b\x0c"), b"");
        assert_eq!(trim_pad(b" A B "), b"A B");
        assert_eq!(trim_pad(b"\x00A"), b"\x00A");
    }

    #[test]
    fn non_utf8_share_bytes_do_not_panic() {
        let mut line = trade("BAR", "000250");
        line[24] = 0xfe;
        assert!(matches!(decode(&line), Ok(Message::Trade { shares: 0, .. })));
    }
}
