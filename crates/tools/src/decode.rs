//! Decoding framed stream files back into bit text

use anyhow::{Context, Result};
use bitframe_core::ReceivedBits;
use bitframe_frame::stream::{DecodedStream, FrameStatus, StreamAssembler};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments of the `decode` command
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Frame file, flat or one frame per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination file for the recovered bits
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write per-frame diagnostics as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// File-level decoder
pub struct Decoder {
    assembler: StreamAssembler,
}

impl Decoder {
    /// Create a decoder around a stream assembler
    pub fn new(assembler: StreamAssembler) -> Self {
        Self { assembler }
    }

    /// Decode wire text in either layout
    pub fn decode_str(&self, text: &str) -> DecodedStream {
        self.assembler.decode_received(&ReceivedBits::parse(text))
    }

    /// Decode `input`; the payload is written to `output` only if a frame validated
    pub fn decode_file(
        &self,
        input: &Path,
        output: &Path,
        report: Option<&Path>,
    ) -> Result<DecodedStream> {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read frame file: {:?}", input))?;

        let decoded = self.decode_str(&text);

        if decoded.nothing_decoded() {
            warn!(total = decoded.total_frames, "no valid frames to decode");
        } else {
            std::fs::write(output, decoded.payload.to_string())
                .with_context(|| format!("Failed to write output file: {:?}", output))?;
        }

        if let Some(path) = report {
            let json = serde_json::to_string_pretty(&decoded.reports)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report file: {:?}", path))?;
        }

        info!(
            total = decoded.total_frames,
            valid = decoded.valid_frames,
            rejected = decoded.rejected().count(),
            payload_bits = decoded.payload.len(),
            "decoded file"
        );
        Ok(decoded)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(StreamAssembler::default())
    }
}

/// One line per frame: `Frame n: OK` or `Frame n: ERROR - reason`
pub fn frame_lines(decoded: &DecodedStream) -> Vec<String> {
    decoded
        .reports
        .iter()
        .map(|report| match report.status {
            FrameStatus::Accepted { .. } => format!("Frame {}: OK", report.index),
            FrameStatus::Rejected { reason } => {
                format!("Frame {}: ERROR - {}", report.index, reason)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FramingConfig;
    use crate::encode::Encoder;
    use bitframe_frame::stream::StreamLayout;
    use tempfile::tempdir;

    fn decoder() -> Decoder {
        Decoder::default()
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Z.txt");
        let frames = dir.path().join("W.txt");
        let decoded_path = dir.path().join("Z_decoded.txt");

        let bits = "01111110111111000001111110000011111".repeat(20);
        std::fs::write(&source, &bits).unwrap();

        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let summary = encoder.encode_file(&source, &frames).unwrap();

        let decoded = decoder().decode_file(&frames, &decoded_path, None).unwrap();
        assert_eq!(decoded.total_frames, summary.frame_count);
        assert_eq!(decoded.valid_frames, summary.frame_count);
        assert_eq!(std::fs::read_to_string(&decoded_path).unwrap(), bits);
    }

    #[test]
    fn test_line_layout_file_round_trip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("Z.txt");
        let frames = dir.path().join("W.txt");
        let decoded_path = dir.path().join("Z_decoded.txt");
        std::fs::write(&source, "1011111101").unwrap();

        let config = FramingConfig {
            chunk_size: 3,
            layout: StreamLayout::LinePerFrame,
        };
        Encoder::new(config)
            .unwrap()
            .encode_file(&source, &frames)
            .unwrap();

        let decoded = decoder().decode_file(&frames, &decoded_path, None).unwrap();
        assert_eq!(decoded.valid_frames, 4);
        assert_eq!(std::fs::read_to_string(&decoded_path).unwrap(), "1011111101");
    }

    #[test]
    fn test_nothing_decodable_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("W.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&frames, "0111111001111110\n").unwrap();

        let decoded = decoder().decode_file(&frames, &output, None).unwrap();
        assert_eq!(decoded.total_frames, 1);
        assert!(decoded.nothing_decoded());
        assert!(!output.exists());
        assert_eq!(frame_lines(&decoded), vec!["Frame 1: ERROR - empty frame"]);
    }

    #[test]
    fn test_report_written_as_json() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("W.txt");
        let output = dir.path().join("out.txt");
        let report = dir.path().join("report.json");

        // A valid frame for "1" followed by one whose checksum bit is flipped.
        std::fs::write(
            &frames,
            "01111110100000111011111100111111010000011001111110",
        )
        .unwrap();

        let decoded = decoder()
            .decode_file(&frames, &output, Some(report.as_path()))
            .unwrap();
        assert_eq!(
            frame_lines(&decoded),
            vec!["Frame 1: OK", "Frame 2: ERROR - bad checksum"]
        );

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(json[0]["status"], "accepted");
        assert_eq!(json[0]["payload_bits"], 1);
        assert_eq!(json[1]["reason"]["kind"], "bad-checksum");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1");
    }

    #[test]
    fn test_foreign_character_costs_one_frame() {
        // Frames for "1" and "0"; the second one carries a stray letter.
        let decoded = decoder().decode_str(
            "0111111010000011101111110\n011111100000x0000001111110\n",
        );
        assert_eq!(decoded.total_frames, 2);
        assert_eq!(decoded.payload.to_string(), "1");
        assert_eq!(
            frame_lines(&decoded),
            vec![
                "Frame 1: OK",
                "Frame 2: ERROR - foreign symbol 'x' at text position 38"
            ]
        );
    }

    #[test]
    fn test_decoding_ignores_chunk_size_setting() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("framing.toml");
        let frames = dir.path().join("W.txt");
        let output = dir.path().join("out.txt");
        std::fs::write(&config_path, "chunk_size = 0\n").unwrap();
        std::fs::write(&frames, "0111111010000011101111110").unwrap();

        let config = FramingConfig::from_file(&config_path).unwrap();
        assert!(config.assembler().is_err());

        let decoded = decoder().decode_file(&frames, &output, None).unwrap();
        assert_eq!(decoded.valid_frames, 1);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1");
    }
}
