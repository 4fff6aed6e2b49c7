//! Splitting payloads into framed bitstreams and reassembling them

use crate::error::RejectReason;
use crate::frame::FrameCodec;
use crate::{FrameError, Result};
use bitframe_core::{BitSeq, ForeignSymbol, ReceivedBits};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Payload bits carried per frame unless configured otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// How frames are laid out in the wire text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamLayout {
    /// One contiguous run of bits
    #[default]
    Flat,
    /// One frame per line
    LinePerFrame,
}

impl FromStr for StreamLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(StreamLayout::Flat),
            "line-per-frame" | "lines" => Ok(StreamLayout::LinePerFrame),
            _ => Err(format!("Unknown stream layout: {}", s)),
        }
    }
}

impl fmt::Display for StreamLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamLayout::Flat => f.write_str("flat"),
            StreamLayout::LinePerFrame => f.write_str("line-per-frame"),
        }
    }
}

/// Frames produced from one payload, in chunk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream {
    frames: Vec<BitSeq>,
}

impl EncodedStream {
    /// Encoded frames
    pub fn frames(&self) -> &[BitSeq] {
        &self.frames
    }

    /// Number of frames produced
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frame was produced
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames concatenated with no separator
    pub fn bitstream(&self) -> BitSeq {
        let total = self.frames.iter().map(|frame| frame.len()).sum();
        let mut stream = BitSeq::with_capacity(total);
        for frame in &self.frames {
            stream.extend_from_slice(frame);
        }
        stream
    }

    /// Render the wire text
    pub fn render(&self, layout: StreamLayout) -> String {
        match layout {
            StreamLayout::Flat => self.bitstream().to_string(),
            StreamLayout::LinePerFrame => {
                let mut text = String::with_capacity(
                    self.frames.iter().map(|frame| frame.len() + 1).sum(),
                );
                for frame in &self.frames {
                    text.push_str(&frame.to_string());
                    text.push('\n');
                }
                text
            }
        }
    }
}

/// Outcome of one candidate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum FrameStatus {
    Accepted { payload_bits: usize },
    Rejected { reason: RejectReason },
}

/// Per-frame diagnostics from a stream decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// 1-based position in discovery order
    pub index: usize,
    /// Offset of the opening flag in the stream
    pub start: usize,
    /// Offset one past the closing flag
    pub end: usize,
    #[serde(flatten)]
    pub status: FrameStatus,
}

impl FrameReport {
    /// Check if the frame was accepted
    pub fn is_valid(&self) -> bool {
        matches!(self.status, FrameStatus::Accepted { .. })
    }
}

/// Result of decoding a whole bitstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedStream {
    /// Payloads of the valid frames, concatenated in discovery order
    pub payload: BitSeq,
    pub total_frames: usize,
    pub valid_frames: usize,
    pub reports: Vec<FrameReport>,
}

impl DecodedStream {
    /// Check if no frame validated
    pub fn nothing_decoded(&self) -> bool {
        self.valid_frames == 0
    }

    /// Reports of the rejected frames
    pub fn rejected(&self) -> impl Iterator<Item = &FrameReport> {
        self.reports.iter().filter(|report| !report.is_valid())
    }
}

/// Chunks payloads into frames and reassembles decoded streams
#[derive(Debug, Clone)]
pub struct StreamAssembler {
    codec: FrameCodec,
    chunk_size: usize,
}

impl StreamAssembler {
    /// Create an assembler carrying at most `chunk_size` payload bits per frame
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(FrameError::InvalidChunkSize { size: chunk_size });
        }

        Ok(Self {
            codec: FrameCodec::default(),
            chunk_size,
        })
    }

    /// Use a different frame codec
    pub fn with_codec(mut self, codec: FrameCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Payload bits per frame
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split `payload` into chunks and frame each one
    pub fn encode_stream(&self, payload: &[bool]) -> EncodedStream {
        let frames: Vec<BitSeq> = payload
            .chunks(self.chunk_size)
            .map(|chunk| self.codec.encode(chunk))
            .collect();

        debug!(
            payload_bits = payload.len(),
            chunk_size = self.chunk_size,
            frames = frames.len(),
            "encoded stream"
        );
        EncodedStream { frames }
    }

    /// Locate, validate and reassemble every frame in `stream`.
    ///
    /// Rejected frames contribute no bits and never stop the scan.
    pub fn decode_stream(&self, stream: &[bool]) -> DecodedStream {
        self.decode_spans(stream, &[])
    }

    /// Decode received wire text; frames holding a foreign symbol are rejected
    pub fn decode_received(&self, received: &ReceivedBits) -> DecodedStream {
        self.decode_spans(&received.bits, &received.foreign)
    }

    fn decode_spans(&self, stream: &[bool], foreign: &[ForeignSymbol]) -> DecodedStream {
        let mut decoded = DecodedStream {
            payload: BitSeq::with_capacity(stream.len()),
            ..DecodedStream::default()
        };

        for span in self.codec.frames(stream) {
            decoded.total_frames += 1;
            let index = decoded.total_frames;

            let status = match self.codec.decode_span(&span, foreign) {
                Ok(fragment) => {
                    trace!(
                        index,
                        start = span.start,
                        bits = fragment.len(),
                        "frame accepted"
                    );
                    decoded.valid_frames += 1;
                    decoded.payload.extend_from_slice(&fragment);
                    FrameStatus::Accepted {
                        payload_bits: fragment.len(),
                    }
                }
                Err(reason) => {
                    debug!(index, start = span.start, %reason, "frame rejected");
                    FrameStatus::Rejected { reason }
                }
            };

            decoded.reports.push(FrameReport {
                index,
                start: span.start,
                end: span.end,
                status,
            });
        }

        debug!(
            total = decoded.total_frames,
            valid = decoded.valid_frames,
            payload_bits = decoded.payload.len(),
            "decoded stream"
        );
        decoded
    }
}

impl Default for StreamAssembler {
    fn default() -> Self {
        Self {
            codec: FrameCodec::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Frame `payload` in chunks of `chunk_size` bits with the default codec
pub fn encode_stream(payload: &[bool], chunk_size: usize) -> Result<EncodedStream> {
    Ok(StreamAssembler::new(chunk_size)?.encode_stream(payload))
}

/// Decode a bitstream with the default codec
pub fn decode_stream(stream: &[bool]) -> DecodedStream {
    StreamAssembler::default().decode_stream(stream)
}

/// Validate and frame wire text; any character other than `'0'`/`'1'` fails the call
pub fn encode_text(text: &str, chunk_size: usize) -> Result<EncodedStream> {
    let assembler = StreamAssembler::new(chunk_size)?;
    let payload = BitSeq::parse(text)?;
    Ok(assembler.encode_stream(&payload))
}

/// Decode wire text in either layout; foreign symbols only cost the frame they fall in
pub fn decode_text(text: &str) -> DecodedStream {
    StreamAssembler::default().decode_received(&ReceivedBits::parse(text))
}
