use crate::{
    pipeline::Pipeline,
    traits::{ImagePreprocessor, ContourExtractor},
    algorithms::{
        CannyEdgePreprocessor,
        ExternalContourExtractor,
        GaussianBlurPreprocessor,
        ThresholdPreprocessor,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Add a Gaussian blur over a `kernel_size` × `kernel_size` neighbourhood
    pub fn with_blur(self, kernel_size: u32) -> Self {
        self.add_preprocessor(GaussianBlurPreprocessor { kernel_size })
    }

    /// Add Canny edge detection
    pub fn with_canny(self, low_threshold: f32, high_threshold: f32) -> Self {
        self.add_preprocessor(CannyEdgePreprocessor {
            low_threshold,
            high_threshold,
        })
    }

    /// Add a binary threshold
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.add_preprocessor(ThresholdPreprocessor { threshold })
    }

    /// Build the pipeline, using external contours with simple chain
    /// approximation if no extractor was set
    pub fn build(self) -> Pipeline {
        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor::default()));

        Pipeline::new(self.preprocessors, contour_extractor)
    }

    /// Blur (5x5) → Canny (50/150) → external contours
    pub fn build_default() -> Pipeline {
        let blur = GaussianBlurPreprocessor::default();
        let canny = CannyEdgePreprocessor::default();
        Self::build_with(blur.kernel_size, canny.low_threshold, canny.high_threshold)
    }

    /// Default pipeline with custom Canny thresholds
    pub fn build_with_thresholds(low_threshold: f32, high_threshold: f32) -> Pipeline {
        Self::build_with(GaussianBlurPreprocessor::default().kernel_size, low_threshold, high_threshold)
    }

    /// Default pipeline with a custom blur kernel
    pub fn build_with_blur(kernel_size: u32) -> Pipeline {
        let canny = CannyEdgePreprocessor::default();
        Self::build_with(kernel_size, canny.low_threshold, canny.high_threshold)
    }

    /// Blur → Canny → external contours with the given parameters
    pub fn build_with(kernel_size: u32, low_threshold: f32, high_threshold: f32) -> Pipeline {
        Self::new()
            .with_blur(kernel_size)
            .with_canny(low_threshold, high_threshold)
            .build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
