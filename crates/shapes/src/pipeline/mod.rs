pub mod builder;

use image::{DynamicImage, GrayImage};
use tracing::debug;
use crate::{
    algorithms::classify,
    error::{Result, ShapeError},
    io::to_grayscale,
    types::{Contour, DetectionOutput},
    traits::{ImagePreprocessor, ContourExtractor},
};

/// Image-to-shapes pipeline: preprocessing stages, contour extraction, then
/// classification
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
        }
    }

    /// Run the preprocessors in sequence and extract contours from the result
    pub fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ShapeError::ImageProcessing(format!(
                "cannot process an empty {}x{} image",
                image.width(),
                image.height()
            )));
        }

        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
        }

        let contours = self.contour_extractor.extract_contours(&processed_image)?;
        debug!(contours = contours.len(), "extracted contours");
        Ok(contours)
    }

    /// Process a grayscale image through the entire pipeline
    pub fn process(&self, image: &GrayImage) -> Result<DetectionOutput> {
        let contours = self.extract_contours(image)?;
        let classification = classify(&contours);

        Ok(DetectionOutput {
            contours,
            classification,
            image_width: image.width(),
            image_height: image.height(),
        })
    }

    /// Convert a decoded image to BT.601 grayscale and process it
    pub fn detect(&self, image: &DynamicImage) -> Result<DetectionOutput> {
        self.process(&to_grayscale(image))
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, 1 contour extractor",
            self.preprocessors.len()
        )
    }
}
