//! bitframe frame - checksums, bit stuffing and flag-delimited framing
//!
//! This crate turns payload bit sequences into a stream of self-delimiting
//! frames and recovers the payload from such a stream, skipping frames that
//! fail validation.

pub mod crc;
pub mod error;
pub mod frame;
pub mod stream;
pub mod stuffing;

pub use error::{FrameError, RejectReason, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        crc::{Crc, CRC8_GENERATOR},
        error::{FrameError, RejectReason, Result},
        frame::{FrameCodec, FrameSearch, FrameSpan, FLAG},
        stream::{
            decode_stream, decode_text, encode_stream, encode_text, DecodedStream, EncodedStream,
            FrameReport, FrameStatus, StreamAssembler, StreamLayout, DEFAULT_CHUNK_SIZE,
        },
        stuffing::{stuff, stuffed_positions, unstuff},
    };
    pub use bitframe_core::BitSeq;
}
