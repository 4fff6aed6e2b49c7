//! Error types for bitframe framing

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame processing error types
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid chunk size: {size} (must be at least 1 bit)")]
    InvalidChunkSize { size: usize },

    #[error("Invalid generator polynomial: {msg}")]
    InvalidGenerator { msg: String },

    #[error("Core error: {0}")]
    Core(#[from] bitframe_core::CoreError),
}

/// Why a single candidate frame was rejected.
///
/// Rejections are never fatal to a stream decode; the scan moves on to the
/// next candidate.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RejectReason {
    #[error("invalid flags")]
    InvalidFlags,

    #[error("empty frame")]
    EmptyFrame,

    #[error("frame too short: {length} bits, checksum needs {required}")]
    TooShort { length: usize, required: usize },

    #[error("bad checksum")]
    BadChecksum,

    #[error("foreign symbol {symbol:?} at text position {position}")]
    ForeignSymbol { symbol: char, position: usize },
}

/// Result type for bitframe framing operations
pub type Result<T> = std::result::Result<T, FrameError>;
