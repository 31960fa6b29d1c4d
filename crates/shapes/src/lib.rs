//! # Shape Detection Library
//!
//! Finds closed contours in a raster image and classifies each one as a
//! triangle, quadrilateral, pentagon, circle or "other".
//!
//! ## Core Features
//!
//! - **Pure classification**: [`classify`] turns contours into per-category
//!   counts plus a per-contour category, without touching any image
//! - **Pipeline System**: blur, edge detection and contour extraction composed
//!   through the [`ImagePreprocessor`] and [`ContourExtractor`] traits
//! - **Annotation**: outlines and a count legend drawn onto a copy of the image
//! - **GeoJSON Support**: export detected contours with their categories
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapes::{PipelineBuilder, RenderStyle, annotate, load_image};
//!
//! let image = load_image("shapes.png")?;
//! let output = PipelineBuilder::build_default().detect(&image)?;
//!
//! let annotated = annotate(&image.to_rgb8(), &output, &RenderStyle::default(), None);
//! annotated.save("shapes_annotated.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Classifying Contours Directly
//!
//! ```rust
//! use shapes::{classify, Contour, ShapeCategory};
//!
//! let square = Contour::new(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
//! let result = classify(&[square]);
//! assert_eq!(result.count(ShapeCategory::Quadrilateral), 1);
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;
pub mod render;
pub mod manager;

// Re-exports for convenience
pub use error::{ShapeError, Result};
pub use types::{ClassificationResult, ClassifiedShape, Contour, DetectionOutput, ShapeCategory, ShapeCounts};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use io::{load_image, load_image_from_bytes, save_image, to_grayscale};
pub use render::{Legend, RenderStyle, annotate, load_font};
pub use manager::{DetectionReport, ShapeDetector, ShapeDetectorCommand};
