//! Encoding bit text files into framed streams

use crate::config::FramingConfig;
use anyhow::{Context, Result};
use bitframe_frame::stream::{encode_text, StreamLayout};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments of the `encode` command
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Source file containing only '0' and '1'
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination file for the framed stream
    #[arg(short, long)]
    pub output: PathBuf,

    /// Payload bits per frame
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Output layout: flat | line-per-frame
    #[arg(long)]
    pub layout: Option<StreamLayout>,
}

/// What an encode run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    pub payload_bits: usize,
    pub frame_count: usize,
    pub stream_bits: usize,
}

/// File-level encoder
pub struct Encoder {
    config: FramingConfig,
}

impl Encoder {
    /// Create an encoder, rejecting unusable configurations up front
    pub fn new(config: FramingConfig) -> Result<Self> {
        config.assembler()?;
        Ok(Self { config })
    }

    /// Encode wire text into the configured layout
    pub fn encode_str(&self, text: &str) -> Result<(String, EncodeSummary)> {
        let payload = text.trim();
        let encoded = encode_text(payload, self.config.chunk_size)
            .context("Source must contain only the characters '0' and '1'")?;
        if encoded.is_empty() {
            warn!("empty source, no frames produced");
        }

        let summary = EncodeSummary {
            payload_bits: payload.len(),
            frame_count: encoded.frame_count(),
            stream_bits: encoded.frames().iter().map(|frame| frame.len()).sum(),
        };
        Ok((encoded.render(self.config.layout), summary))
    }

    /// Read `input`, encode it and write the stream to `output`
    pub fn encode_file(&self, input: &Path, output: &Path) -> Result<EncodeSummary> {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read source file: {:?}", input))?;

        let (rendered, summary) = self.encode_str(&text)?;

        std::fs::write(output, rendered)
            .with_context(|| format!("Failed to write frame file: {:?}", output))?;

        info!(
            frames = summary.frame_count,
            payload_bits = summary.payload_bits,
            stream_bits = summary.stream_bits,
            layout = %self.config.layout,
            "encoded file"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_encode_str_single_frame() {
        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let (text, summary) = encoder.encode_str("1101010111110\n").unwrap();

        assert_eq!(text, "01111110110101011111001110011001111110");
        assert_eq!(
            summary,
            EncodeSummary {
                payload_bits: 13,
                frame_count: 1,
                stream_bits: 38,
            }
        );
    }

    #[test]
    fn test_encode_line_layout() {
        let config = FramingConfig {
            chunk_size: 4,
            layout: StreamLayout::LinePerFrame,
        };
        let encoder = Encoder::new(config).unwrap();
        let (text, summary) = encoder.encode_str("1111000011").unwrap();

        assert_eq!(summary.frame_count, 3);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|line| line.starts_with("01111110")));
    }

    #[test]
    fn test_encode_rejects_malformed_source() {
        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let err = encoder.encode_str("0101 2").unwrap_err();
        assert!(format!("{:#}", err).contains("Malformed input"));
    }

    #[test]
    fn test_encode_empty_source() {
        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let (text, summary) = encoder.encode_str("\n").unwrap();
        assert!(text.is_empty());
        assert_eq!(summary.frame_count, 0);
    }

    #[test]
    fn test_encode_rejects_zero_chunk_size() {
        let config = FramingConfig::default().with_overrides(Some(0), None);
        assert!(Encoder::new(config).is_err());
    }

    #[test]
    fn test_encode_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Z.txt");
        let output = dir.path().join("W.txt");
        std::fs::write(&input, "1".repeat(130)).unwrap();

        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let summary = encoder.encode_file(&input, &output).unwrap();
        assert_eq!(summary.frame_count, 3);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.len(), summary.stream_bits);
        assert!(!written.contains('\n'));
    }

    #[test]
    fn test_encode_missing_file() {
        let dir = tempdir().unwrap();
        let encoder = Encoder::new(FramingConfig::default()).unwrap();
        let result =
            encoder.encode_file(&dir.path().join("absent.txt"), &dir.path().join("out.txt"));
        assert!(result.is_err());
    }
}
