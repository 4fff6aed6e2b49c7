//! Flag-delimited frame encoding, decoding and synchronization

use crate::crc::Crc;
use crate::error::RejectReason;
use crate::stuffing::{stuff, unstuff};
use bitframe_core::{find_pattern, BitSeq, ForeignSymbol};

/// Frame delimiter `01111110`
pub const FLAG: [bool; 8] = [false, true, true, true, true, true, true, false];

/// Encodes chunks into frames and decodes candidate frames back into payloads
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    crc: Crc,
}

impl FrameCodec {
    /// Create a codec using the given checksum engine
    pub fn new(crc: Crc) -> Self {
        Self { crc }
    }

    /// Build `FLAG ++ stuff(chunk ++ checksum) ++ FLAG`.
    ///
    /// An empty chunk produces no frame at all.
    pub fn encode(&self, chunk: &[bool]) -> BitSeq {
        if chunk.is_empty() {
            return BitSeq::new();
        }

        let mut body = BitSeq::with_capacity(chunk.len() + self.crc.width());
        body.extend_from_slice(chunk);
        body.extend_from_slice(&self.crc.compute(chunk));
        let stuffed = stuff(&body);

        let mut frame = BitSeq::with_capacity(stuffed.len() + 2 * FLAG.len());
        frame.extend_from_slice(&FLAG);
        frame.extend_from_slice(&stuffed);
        frame.extend_from_slice(&FLAG);
        frame
    }

    /// Validate one candidate frame and return its payload.
    pub fn decode(&self, frame: &[bool]) -> Result<BitSeq, RejectReason> {
        if !(frame.starts_with(&FLAG) && frame.ends_with(&FLAG)) {
            return Err(RejectReason::InvalidFlags);
        }

        // Flags may overlap in frames shorter than two full flags.
        if frame.len() <= 2 * FLAG.len() {
            return Err(RejectReason::EmptyFrame);
        }

        let interior = &frame[FLAG.len()..frame.len() - FLAG.len()];
        let mut destuffed = unstuff(interior);

        let width = self.crc.width();
        if destuffed.len() < width {
            return Err(RejectReason::TooShort {
                length: destuffed.len(),
                required: width,
            });
        }

        if !self.crc.verify(&destuffed) {
            return Err(RejectReason::BadChecksum);
        }

        destuffed.truncate(destuffed.len() - width);
        Ok(destuffed)
    }

    /// Validate a located frame; a foreign symbol read inside it rejects the frame
    pub fn decode_span(
        &self,
        span: &FrameSpan<'_>,
        foreign: &[ForeignSymbol],
    ) -> Result<BitSeq, RejectReason> {
        if let Some(found) = foreign.iter().find(|f| f.within(span.start, span.end)) {
            return Err(RejectReason::ForeignSymbol {
                symbol: found.symbol,
                position: found.position,
            });
        }
        self.decode(span.bits)
    }

    /// Iterate over the candidate frames of a raw bitstream, in discovery order
    pub fn frames<'a>(&self, stream: &'a [bool]) -> FrameSearch<'a> {
        FrameSearch::new(stream)
    }
}

/// One candidate frame located in a bitstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan<'a> {
    /// Offset of the opening flag
    pub start: usize,
    /// Offset one past the closing flag
    pub end: usize,
    /// Bits from the opening flag through the closing flag
    pub bits: &'a [bool],
}

/// Greedy flag search: each candidate runs from the next flag to the flag after it.
///
/// The search never backtracks, so a lost flag merges two frames into a
/// single span.
#[derive(Debug, Clone)]
pub struct FrameSearch<'a> {
    stream: &'a [bool],
    cursor: usize,
}

impl<'a> FrameSearch<'a> {
    /// Start searching at the beginning of `stream`
    pub fn new(stream: &'a [bool]) -> Self {
        Self { stream, cursor: 0 }
    }
}

impl<'a> Iterator for FrameSearch<'a> {
    type Item = FrameSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = find_pattern(self.stream, &FLAG, self.cursor)?;
        let closing = find_pattern(self.stream, &FLAG, start + FLAG.len())?;
        let end = closing + FLAG.len();

        self.cursor = end;
        Some(FrameSpan {
            start,
            end,
            bits: &self.stream[start..end],
        })
    }
}
