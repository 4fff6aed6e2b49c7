//! bitframe core - bit sequence primitives
//!
//! This crate provides the bit sequence type shared by the framing crates,
//! together with parsing and rendering of the `'0'`/`'1'` wire text.

pub mod bits;
pub mod error;

pub use bits::{find_pattern, BitSeq, ForeignSymbol, ReceivedBits};
pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::{find_pattern, BitSeq, ForeignSymbol, ReceivedBits},
        error::{CoreError, Result},
    };
}
