//! Error types for bitframe core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed input: unexpected symbol {symbol:?} at position {position}")]
    MalformedInput { symbol: char, position: usize },
}

/// Result type for bitframe core operations
pub type Result<T> = std::result::Result<T, CoreError>;
