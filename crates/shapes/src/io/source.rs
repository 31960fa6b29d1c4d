use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use tracing::debug;
use crate::error::{Result, ShapeError};

/// Decode an image from disk
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = image::open(path)?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Decode an image from memory
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Grayscale with BT.601 weights (0.299 R + 0.587 G + 0.114 B), rounded
/// to the nearest level; alpha is discarded
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }
    imageproc::map::map_colors(&image.to_rgb8(), |p| {
        let [r, g, b] = p.0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Encode an RGB image to disk, format chosen by extension
pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|source| ShapeError::ImageSave {
        path: path.display().to_string(),
        source,
    })
}
