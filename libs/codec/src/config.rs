//! # Codec Configuration
//!
//! Deployment-tunable knobs for the payload decoder. None of them change
//! the wire format: they only control what the decoder reports.
//!
//! ```toml
//! expected_version = 1
//! trace_frames = false
//! ```

use crate::protocol_constants::PROTOCOL_VERSION;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Version a decoded header is compared against; mismatches are logged
    pub expected_version: u8,

    /// Log every decoded frame as hex at trace level
    pub trace_frames: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            expected_version: PROTOCOL_VERSION,
            trace_frames: false,
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Configuration for debugging sessions with frame tracing enabled
    pub fn debugging() -> Self {
        Self {
            trace_frames: true,
            ..Self::default()
        }
    }
}
