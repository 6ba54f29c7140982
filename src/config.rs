//! Build configuration.
//!
//! Everything has a default, so a config file only needs the keys it wants
//! to change. Command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::ParseOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}: {source}", .config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", .config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output PDF path, relative to the project root.
    pub output: PathBuf,
    /// Document title, also used for the synthetic heading.
    pub title: String,
    /// Author recorded in the build log.
    pub author: Option<String>,
    pub fonts: FontConfig,
    pub page: PageConfig,
    pub parse: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("docs/document.pdf"),
            title: "Document".to_string(),
            author: None,
            fonts: FontConfig::default(),
            page: PageConfig::default(),
            parse: ParseOptions::default(),
        }
    }
}

/// Font lookup settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Body font files, tried in order before the built-in candidates.
    pub paths: Vec<PathBuf>,
    /// Monospace font files for code blocks, tried before the built-in
    /// candidates.
    pub code_paths: Vec<PathBuf>,
}

/// Page geometry and base typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Margin on all four sides, in millimetres.
    pub margin_mm: f64,
    /// Body text size in points.
    pub font_size: u8,
    /// Line spacing as a multiple of the font size.
    pub line_spacing: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            margin_mm: 18.0,
            font_size: 11,
            line_spacing: 1.25,
        }
    }
}

impl Config {
    /// Load a config file. A missing file is not an error and yields `None`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
