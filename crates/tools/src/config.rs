//! Framing configuration for the tools

use crate::common::{load_config, save_config, GlobalConfig};
use anyhow::{Context, Result};
use bitframe_frame::stream::{StreamAssembler, StreamLayout, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Framing parameters, loadable from a TOML or JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Payload bits per frame
    pub chunk_size: usize,
    /// Layout of the encoded wire text
    pub layout: StreamLayout,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            layout: StreamLayout::Flat,
        }
    }
}

impl FramingConfig {
    /// Load the file named by `--config`, or fall back to defaults
    pub fn resolve(global: &GlobalConfig) -> Result<Self> {
        match &global.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = load_config(path)?;
        tracing::debug!(?path, ?config, "loaded framing config");
        Ok(config)
    }

    /// Save configuration; JSON for `.json` paths, TOML otherwise
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        chunk_size: Option<usize>,
        layout: Option<StreamLayout>,
    ) -> Self {
        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }
        if let Some(layout) = layout {
            self.layout = layout;
        }
        self
    }

    /// Build the stream assembler described by this configuration
    pub fn assembler(&self) -> Result<StreamAssembler> {
        StreamAssembler::new(self.chunk_size).context("Invalid framing configuration")
    }
}
