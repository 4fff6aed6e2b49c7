//! Bit sequence storage and wire-text conversion

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Ordered sequence of bits.
///
/// The wire representation is a run of ASCII `'0'` and `'1'` characters;
/// [`BitSeq::parse`] and the [`fmt::Display`] impl convert between the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitSeq {
    bits: Vec<bool>,
}

impl BitSeq {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Create an empty sequence able to hold `capacity` bits without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Parse wire text where every character must be `'0'` or `'1'`
    pub fn parse(text: &str) -> Result<Self> {
        let mut seq = Self::with_capacity(text.len());
        for (position, symbol) in text.chars().enumerate() {
            seq.bits.push(Self::bit_from_symbol(symbol, position)?);
        }
        Ok(seq)
    }

    fn bit_from_symbol(symbol: char, position: usize) -> Result<bool> {
        match symbol {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(CoreError::MalformedInput { symbol, position }),
        }
    }

    /// Append a single bit
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append every bit of `bits`
    pub fn extend_from_slice(&mut self, bits: &[bool]) {
        self.bits.extend_from_slice(bits);
    }

    /// Shorten the sequence to its first `len` bits
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// Get the bits as a slice
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Get the bits as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.bits
    }
}

/// Non-bit character found in received wire text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignSymbol {
    pub symbol: char,
    /// Character position in the text
    pub position: usize,
    /// Number of bits read before the symbol
    pub offset: usize,
}

impl ForeignSymbol {
    /// Check if the symbol sits strictly inside the bit range `start..end`
    pub fn within(&self, start: usize, end: usize) -> bool {
        self.offset > start && self.offset < end
    }
}

/// Bits recovered from received wire text, with the foreign symbols left out.
///
/// ASCII whitespace (the one-frame-per-line layout) is dropped silently. Every
/// other non-bit character is recorded instead of failing the parse, so that
/// only the frame it lands in is lost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedBits {
    pub bits: BitSeq,
    pub foreign: Vec<ForeignSymbol>,
}

impl ReceivedBits {
    /// Scan received wire text
    pub fn parse(text: &str) -> Self {
        let mut received = Self {
            bits: BitSeq::with_capacity(text.len()),
            foreign: Vec::new(),
        };

        for (position, symbol) in text.chars().enumerate() {
            match symbol {
                '0' => received.bits.push(false),
                '1' => received.bits.push(true),
                _ if symbol.is_ascii_whitespace() => {}
                _ => received.foreign.push(ForeignSymbol {
                    symbol,
                    position,
                    offset: received.bits.len(),
                }),
            }
        }

        if !received.foreign.is_empty() {
            tracing::debug!(
                count = received.foreign.len(),
                bits = received.bits.len(),
                "foreign symbols in received text"
            );
        }
        received
    }
}

/// Find the first occurrence of `needle` in `haystack` starting at or after `from`.
///
/// Returns `None` when there is no occurrence, when `needle` is empty, or when
/// `from` lies beyond the end of `haystack`.
pub fn find_pattern(haystack: &[bool], needle: &[bool], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

impl Deref for BitSeq {
    type Target = [bool];

    fn deref(&self) -> &Self::Target {
        &self.bits
    }
}

impl AsRef<[bool]> for BitSeq {
    fn as_ref(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitSeq {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<&[bool]> for BitSeq {
    fn from(bits: &[bool]) -> Self {
        Self {
            bits: bits.to_vec(),
        }
    }
}

impl FromIterator<bool> for BitSeq {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Extend<bool> for BitSeq {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl FromStr for BitSeq {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BitSeq {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BitSeq> for String {
    fn from(seq: BitSeq) -> Self {
        seq.to_string()
    }
}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self
            .bits
            .iter()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect();
        f.write_str(&text)
    }
}
