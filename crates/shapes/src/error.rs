use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Failed to save image to {path}: {source}")]
    ImageSave {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
