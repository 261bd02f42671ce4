//! Bridge Stream Configuration Module
//!
//! This module provides the configuration types shared by stream buffers:
//! the initial allocation size and the limits applied while decoding
//! untrusted input.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Initial capacity of a freshly created or fully reset stream buffer.
pub const DEFAULT_CAPACITY: usize = 16;

/// Decode limits
pub const DEFAULT_MAX_TEXT_LEN: usize = 16 * 1024 * 1024; // 16MB
pub const DEFAULT_MAX_BYTES_LEN: usize = 64 * 1024 * 1024; // 64MB
pub const DEFAULT_MAX_COLLECTION_LEN: usize = 1_048_576;
/// Maximum number of nested object frames below the root buffer.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Upper bounds enforced when a length, count or nesting level is read
/// from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadLimits {
    pub max_text_len: usize,
    pub max_bytes_len: usize,
    pub max_collection_len: usize,
    pub max_depth: usize,
}

impl ReadLimits {
    /// Limits that never reject anything; only the available input bounds reads.
    pub const fn unbounded() -> Self {
        Self {
            max_text_len: usize::MAX,
            max_bytes_len: usize::MAX,
            max_collection_len: usize::MAX,
            max_depth: usize::MAX,
        }
    }
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_text_len: DEFAULT_MAX_TEXT_LEN,
            max_bytes_len: DEFAULT_MAX_BYTES_LEN,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Stream buffer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub default_capacity: usize,
    pub limits: ReadLimits,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            limits: ReadLimits::default(),
        }
    }
}

impl StreamConfig {
    /// Parses a TOML document. Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: StreamConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_capacity == 0 {
            return Err(ConfigError::invalid("default_capacity must be at least 1"));
        }
        if self.limits.max_depth == 0 {
            return Err(ConfigError::invalid("limits.max_depth must be at least 1"));
        }
        Ok(())
    }
}
