use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for image preprocessing steps (blur, edge detection, thresholding)
pub trait ImagePreprocessor: Send + Sync  {
    /// Preprocess the input image
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync  {
    /// Extract contours from a binary (edge) image
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}
