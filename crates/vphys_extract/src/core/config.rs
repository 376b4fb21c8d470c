//! # Unified Configuration System
//!
//! Configuration for the extraction batch: where documents are read from,
//! where triangle buffers are written, and how verbose the run is.
//!
//! ## Configuration Categories
//!
//! - **Paths Config**: Input/output directories and file extensions
//! - **Logging Config**: Default log filter for the run
//!
//! Both TOML and RON files are accepted through the [`Config`] trait.

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

pub use crate::config::{Config, ConfigError};

/// # Paths Configuration
///
/// Directories and extensions for the batch. Extensions are stored without a
/// leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for physics documents
    pub input_dir: PathBuf,
    /// Directory receiving the triangle buffers
    pub output_dir: PathBuf,
    /// Extension of documents to process
    pub input_extension: String,
    /// Extension given to written triangle buffers
    pub output_extension: String,
}

impl PathsConfig {
    /// Create a paths configuration with the default extensions
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Set the input document extension
    pub fn with_input_extension(mut self, extension: impl Into<String>) -> Self {
        self.input_extension = extension.into();
        self
    }

    /// Set the output buffer extension
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    /// Output path for a given input document: `<output_dir>/<stem>.<output_extension>`
    pub fn output_path_for(&self, document: &Path) -> PathBuf {
        let stem = document
            .file_stem()
            .map_or_else(|| "unnamed".into(), |s| s.to_string_lossy());
        self.output_dir.join(format!("{}.{}", stem, self.output_extension))
    }

    /// Whether `path` carries the configured input extension
    pub fn is_input_document(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.input_extension.as_str())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("Input directory cannot be empty".to_string());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }
        let extensions = [("Input", &self.input_extension), ("Output", &self.output_extension)];
        for (label, extension) in extensions {
            if extension.is_empty() {
                return Err(format!("{} extension cannot be empty", label));
            }
            if extension.starts_with('.') {
                return Err(format!("{} extension must not start with '.': {}", label, extension));
            }
        }
        Ok(())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            input_extension: "vphys".to_string(),
            output_extension: "tri".to_string(),
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub level: String,
}

impl LoggingConfig {
    /// Set log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// # Complete Extractor Configuration
///
/// Top-level configuration handed to [`crate::Extractor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Directory and extension settings
    pub paths: PathsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl ExtractorConfig {
    /// Create a configuration for the given directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig::new(input_dir, output_dir),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate().map_err(ConfigError::Invalid)
    }
}

impl Config for ExtractorConfig {}
