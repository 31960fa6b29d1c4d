use image::GrayImage;
use crate::{error::{Result, ShapeError}, traits::ImagePreprocessor};

/// Gaussian blur over a square `kernel_size` neighbourhood, used to suppress
/// spurious edges before edge detection
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub kernel_size: u32,
}

impl GaussianBlurPreprocessor {
    pub fn new(kernel_size: u32) -> Result<Self> {
        let blur = Self { kernel_size };
        blur.validate()?;
        Ok(blur)
    }

    /// Standard deviation matching a `kernel_size` × `kernel_size` Gaussian
    /// kernel when no sigma is given explicitly
    pub fn sigma(&self) -> f32 {
        0.3 * ((self.kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Normalized one-dimensional taps, exactly `kernel_size` long.
    ///
    /// Sizes up to 7 use the fixed binomial-style tables that derived-sigma
    /// Gaussian kernels snap to; larger sizes are sampled from `sigma()`.
    pub fn kernel(&self) -> Vec<f32> {
        match self.kernel_size {
            1 => vec![1.0],
            3 => vec![0.25, 0.5, 0.25],
            5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
            7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
            size => {
                let radius = (size / 2) as f32;
                let two_sigma_sq = 2.0 * self.sigma().powi(2);
                let taps: Vec<f32> = (0..size)
                    .map(|i| {
                        let x = i as f32 - radius;
                        (-x * x / two_sigma_sq).exp()
                    })
                    .collect();
                let sum: f32 = taps.iter().sum();
                taps.into_iter().map(|t| t / sum).collect()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(ShapeError::InvalidParameter(format!(
                "blur kernel size must be odd and positive, got {}",
                self.kernel_size
            )));
        }
        Ok(())
    }
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self { kernel_size: 5 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        self.validate()?;
        // A 1x1 kernel leaves the image untouched
        if self.kernel_size == 1 {
            return Ok(image.clone());
        }
        Ok(imageproc::filter::separable_filter_equal(image, &self.kernel()))
    }
}

/// Canny edge detector with hysteresis thresholds
#[derive(Debug, Clone)]
pub struct CannyEdgePreprocessor {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl CannyEdgePreprocessor {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Result<Self> {
        let canny = Self { low_threshold, high_threshold };
        canny.validate()?;
        Ok(canny)
    }

    fn validate(&self) -> Result<()> {
        let valid = self.low_threshold.is_finite()
            && self.high_threshold.is_finite()
            && self.low_threshold >= 0.0
            && self.low_threshold <= self.high_threshold;
        if !valid {
            return Err(ShapeError::InvalidParameter(format!(
                "Canny thresholds must satisfy 0 <= low <= high, got low={} high={}",
                self.low_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}

impl Default for CannyEdgePreprocessor {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl ImagePreprocessor for CannyEdgePreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        self.validate()?;
        Ok(imageproc::edges::canny(image, self.low_threshold, self.high_threshold))
    }
}

/// Simple thresholding preprocessor
#[derive(Debug, Clone)]
pub struct ThresholdPreprocessor {
    pub threshold: u8,
}

impl Default for ThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl ImagePreprocessor for ThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::contrast::threshold(image, self.threshold))
    }
}
