//! bitframe tools library

pub mod common;
pub mod config;
pub mod decode;
pub mod encode;
pub mod inspect;

pub use common::{init_logging, GlobalConfig};
pub use config::FramingConfig;
pub use decode::{DecodeArgs, Decoder};
pub use encode::{EncodeArgs, EncodeSummary, Encoder};
pub use inspect::{FrameInspection, InspectArgs};
