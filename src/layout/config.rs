//! Configuration for the layout engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::direction::{LayoutDirection, ParseDirectionError};

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),
}

/// Configuration options for a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Direction of the pass; `auto` defers to the host's locale
    pub direction: LayoutDirection,

    /// Log "won't be applied" diagnostics at warn level
    pub warnings: bool,

    /// Log every resolved reference coordinate at trace level
    pub trace: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::Auto,
            warnings: true,
            trace: false,
        }
    }
}

/// TOML structure for deserializing a configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayoutConfig {
    direction: Option<String>,
    warnings: Option<bool>,
    trace: Option<bool>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlLayoutConfig = toml::from_str(content)?;
        let mut config = Self::default();
        if let Some(direction) = parsed.direction {
            config.direction = direction.parse()?;
        }
        if let Some(warnings) = parsed.warnings {
            config.warnings = warnings;
        }
        if let Some(trace) = parsed.trace {
            config.trace = trace;
        }
        Ok(config)
    }

    /// Set the layout direction
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Enable or disable warning logs
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Enable or disable trace logs
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
