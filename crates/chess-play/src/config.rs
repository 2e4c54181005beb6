//! Configuration file loading for chess-play.
//!
//! Settings come from a TOML file (`chess.toml` by default). A missing file
//! means defaults; command-line flags are applied on top in `main`.

use chess_core::Color;
use chess_engine::SearchLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The side the search plays.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    #[default]
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Search settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched per engine move. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u8,
    /// Optional node budget per engine move.
    #[serde(default)]
    pub max_nodes: Option<u64>,
}

fn default_depth() -> u8 {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: default_depth(),
            max_nodes: None,
        }
    }
}

/// Top-level chess-play configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct PlayConfig {
    /// Side played by the search. Defaults to black.
    #[serde(default)]
    pub engine: Side,
    #[serde(default)]
    pub search: SearchConfig,
}

impl PlayConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration file path, `chess.toml` in the
    /// current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }

    /// Search limits for one engine move.
    pub fn search_limits(&self) -> SearchLimits {
        let limits = SearchLimits::depth(self.search.depth);
        match self.search.max_nodes {
            Some(max) => limits.with_max_nodes(max),
            None => limits,
        }
    }
}
