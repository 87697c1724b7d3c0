//! Presentation settings for the component.
//!
//! Every field has a default, so an empty configuration file is valid and
//! a partial one only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Settings for the floating tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// `id` of the tooltip element appended to the body.
    pub element_id: String,
    /// Width assumed when clamping against the right edge, in px.
    pub assumed_width: f64,
    /// Distance between target and tooltip, in px.
    pub gap: f64,
    /// Minimum distance from the viewport edges, in px.
    pub inset: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            element_id: "tip".to_string(),
            assumed_width: 280.0,
            gap: 8.0,
            inset: 12.0,
        }
    }
}

/// Settings for one `<model-tree>` instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    /// Toolbar title.
    pub title: String,
    /// Label of the "expand all" button.
    pub expand_label: String,
    /// Label of the "collapse all" button.
    pub collapse_label: String,
    /// Base URL that relative `src` attributes resolve against.
    pub base_url: Option<String>,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            title: "the complete tree of (bad) naming".to_string(),
            expand_label: "Expand all".to_string(),
            collapse_label: "Collapse all".to_string(),
            base_url: None,
            tooltip: TooltipConfig::default(),
        }
    }
}

impl TreeConfig {
    /// Parse a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed YAML or unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Yaml`] if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}
