//! Pipeline configuration
//!
//! Paths and options for a run, loadable from a TOML file. Every key is
//! optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::raster::RasterOptions;

pub const DEFAULT_SVG_INPUT: &str = "input.svg";
pub const DEFAULT_PNG_PATH: &str = "dvd-logo-3.png";
pub const DEFAULT_CSV_OUTPUT: &str = "output.csv";

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where to read from and write to, and whether to rasterize first
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// SVG document rendered when `rasterize` is set
    pub svg_input: PathBuf,

    /// PNG to scan; the rasterizer's output when `rasterize` is set
    pub png_path: PathBuf,

    /// CSV destination, overwritten on each run
    pub csv_output: PathBuf,

    /// Render `svg_input` into `png_path` before scanning
    pub rasterize: bool,

    /// Rasterizer options
    pub raster: RasterOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            svg_input: PathBuf::from(DEFAULT_SVG_INPUT),
            png_path: PathBuf::from(DEFAULT_PNG_PATH),
            csv_output: PathBuf::from(DEFAULT_CSV_OUTPUT),
            rasterize: false,
            raster: RasterOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_svg_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.svg_input = path.into();
        self
    }

    pub fn with_png_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.png_path = path.into();
        self
    }

    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_output = path.into();
        self
    }

    /// Enable or disable the rasterization step
    pub fn with_rasterize(mut self, rasterize: bool) -> Self {
        self.rasterize = rasterize;
        self
    }

    pub fn with_raster_options(mut self, options: RasterOptions) -> Self {
        self.raster = options;
        self
    }
}
