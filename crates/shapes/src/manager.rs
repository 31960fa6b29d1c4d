use std::path::Path;

use image::RgbImage;
use tracing::info;
use crate::{
    error::Result,
    io::load_image,
    pipeline::{Pipeline, builder::PipelineBuilder},
    types::DetectionOutput,
};
use serde::{Serialize, Deserialize};
use schemars::JsonSchema;
use strum::{Display, EnumString, EnumIter, IntoStaticStr, VariantNames};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeDetectorCommand {
    /// Detect shapes with the default pipeline (5x5 blur, Canny 50/150)
    #[serde(rename = "detect_shapes")]
    DetectShapes {
        #[schemars(length(min = 1))]
        path: String,
    },

    /// Detect shapes with custom Canny thresholds
    #[serde(rename = "detect_shapes_with_thresholds")]
    DetectShapesWithThresholds {
        #[schemars(length(min = 1))]
        path: String,
        #[schemars(range(min = 0.0, max = 1000.0))]
        low: f32,
        #[schemars(range(min = 0.0, max = 1000.0))]
        high: f32,
    },

    /// Detect shapes with a custom blur kernel size
    #[serde(rename = "detect_shapes_with_blur")]
    DetectShapesWithBlur {
        #[schemars(length(min = 1))]
        path: String,
        #[schemars(range(min = 1, max = 31))]
        kernel_size: u32,
    },
}

impl ShapeDetectorCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ShapeDetectorCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Get a description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Self::DetectShapes { .. } => "Detect and classify shapes using the default pipeline",
            Self::DetectShapesWithThresholds { .. } => "Detect and classify shapes with custom Canny edge thresholds",
            Self::DetectShapesWithBlur { .. } => "Detect and classify shapes with a custom Gaussian blur kernel",
        }
    }

    /// Get parameter requirements for the command
    pub fn parameters_info(&self) -> Vec<(&'static str, &'static str, bool)> {
        let path = ("path", "Path to the image file", true);
        match self {
            Self::DetectShapes { .. } => vec![path],
            Self::DetectShapesWithThresholds { .. } => vec![
                path,
                ("low", "Lower hysteresis threshold for Canny", true),
                ("high", "Upper hysteresis threshold for Canny", true),
            ],
            Self::DetectShapesWithBlur { .. } => vec![
                path,
                ("kernel_size", "Odd Gaussian kernel size", true),
            ],
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::DetectShapes { path }
            | Self::DetectShapesWithThresholds { path, .. }
            | Self::DetectShapesWithBlur { path, .. } => path,
        }
    }

    /// Pipeline configured for this command
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::DetectShapes { .. } => PipelineBuilder::build_default(),
            Self::DetectShapesWithThresholds { low, high, .. } => {
                PipelineBuilder::build_with_thresholds(*low, *high)
            }
            Self::DetectShapesWithBlur { kernel_size, .. } => {
                PipelineBuilder::build_with_blur(*kernel_size)
            }
        }
    }
}

/// The loaded image and what was detected in it
#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub image: RgbImage,
    pub output: DetectionOutput,
}

/// Stateless handler that runs load → preprocess → classify for a command
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeDetector;

impl ShapeDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, command: &ShapeDetectorCommand) -> Result<DetectionReport> {
        info!(command = %command, path = command.path(), "running detection");
        self.detect_with(command.path(), &command.pipeline())
    }

    /// Load an image and run it through `pipeline`
    pub fn detect_with<P: AsRef<Path>>(&self, path: P, pipeline: &Pipeline) -> Result<DetectionReport> {
        let image = load_image(path)?;
        let output = pipeline.detect(&image)?;
        Ok(DetectionReport {
            image: image.to_rgb8(),
            output,
        })
    }
}
