//! Frame-by-frame dump of a stream with stuffing bits marked

use anyhow::{Context, Result};
use bitframe_core::{BitSeq, ForeignSymbol, ReceivedBits};
use bitframe_frame::frame::{FrameCodec, FLAG};
use bitframe_frame::stream::FrameStatus;
use bitframe_frame::stuffing::stuffed_positions;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arguments of the `inspect` command
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Frame file, flat or one frame per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print the inspection as JSON
    #[arg(long)]
    pub json: bool,
}

/// Layout and outcome of one candidate frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameInspection {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    /// Bits between the flags, still stuffed
    pub interior: BitSeq,
    /// Positions in `interior` of inserted stuffing bits
    pub stuffed_positions: Vec<usize>,
    #[serde(flatten)]
    pub status: FrameStatus,
}

impl FrameInspection {
    /// Interior as text with every stuffing bit written as `[0]`
    pub fn annotated_interior(&self) -> String {
        let capacity = self.interior.len() + 2 * self.stuffed_positions.len();
        let mut text = String::with_capacity(capacity);
        let mut stuffed = self.stuffed_positions.iter().peekable();

        for (i, &bit) in self.interior.iter().enumerate() {
            let symbol = if bit { '1' } else { '0' };
            if stuffed.next_if_eq(&&i).is_some() {
                text.push('[');
                text.push(symbol);
                text.push(']');
            } else {
                text.push(symbol);
            }
        }
        text
    }

    /// Single-line description: flags, annotated interior and outcome
    pub fn describe(&self) -> String {
        let flag = BitSeq::from(&FLAG[..]);
        let outcome = match self.status {
            FrameStatus::Accepted { .. } => "OK".to_string(),
            FrameStatus::Rejected { reason } => format!("ERROR - {}", reason),
        };
        format!(
            "Frame {}: {} {} {} {}",
            self.index,
            flag,
            self.annotated_interior(),
            flag,
            outcome
        )
    }
}

/// Inspect every candidate frame of `stream` in discovery order
pub fn inspect_stream(
    codec: &FrameCodec,
    stream: &[bool],
    foreign: &[ForeignSymbol],
) -> Vec<FrameInspection> {
    codec
        .frames(stream)
        .enumerate()
        .map(|(i, span)| {
            let interior = if span.bits.len() > 2 * FLAG.len() {
                BitSeq::from(&span.bits[FLAG.len()..span.bits.len() - FLAG.len()])
            } else {
                BitSeq::new()
            };
            let status = match codec.decode_span(&span, foreign) {
                Ok(payload) => FrameStatus::Accepted {
                    payload_bits: payload.len(),
                },
                Err(reason) => FrameStatus::Rejected { reason },
            };

            FrameInspection {
                index: i + 1,
                start: span.start,
                end: span.end,
                stuffed_positions: stuffed_positions(&interior),
                interior,
                status,
            }
        })
        .collect()
}

/// Read a frame file and inspect it
pub fn inspect_file(codec: &FrameCodec, path: &Path) -> Result<Vec<FrameInspection>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read frame file: {:?}", path))?;
    let received = ReceivedBits::parse(&text);
    Ok(inspect_stream(codec, &received.bits, &received.foreign))
}
