use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shapes::{Pipeline, PipelineBuilder, RenderStyle};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Preprocessing and rendering settings for a detection run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Odd Gaussian blur kernel size
    pub blur_kernel_size: u32,
    /// Lower Canny hysteresis threshold
    pub canny_low: f32,
    /// Upper Canny hysteresis threshold
    pub canny_high: f32,
    /// Font used to draw the legend text onto the annotated image
    pub font: Option<String>,
    pub style: RenderStyle,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            font: None,
            style: RenderStyle::default(),
        }
    }
}

impl DetectionConfig {
    /// Pipeline for these settings
    pub fn pipeline(&self) -> Pipeline {
        PipelineBuilder::build_with(self.blur_kernel_size, self.canny_low, self.canny_high)
    }

    /// JSON schema of the configuration file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DetectionConfig)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConfigError::UnsupportedFileFormat),
        }
    }

    /// Save configuration, format chosen by extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_ref = path.as_ref();
        let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(ConfigError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert configuration to JSON string
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

/// `<dir>/<stem>_shapes.png` next to the input image
pub fn annotated_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_shapes.png"))
}
