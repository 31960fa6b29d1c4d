use std::f64::consts::PI;

use tracing::{debug, info};

use crate::{
    algorithms::approximation::approximate_closed_polygon,
    types::{ClassificationResult, ClassifiedShape, Contour, ShapeCategory},
};

/// Approximation tolerance as a fraction of the contour perimeter
pub const APPROXIMATION_EPSILON_FACTOR: f64 = 0.02;

/// Contours above this circularity are circles
pub const CIRCULARITY_THRESHOLD: f64 = 0.8;

/// Classify every contour and tally the categories.
///
/// Never fails: degenerate geometry is classified as [`ShapeCategory::Other`].
pub fn classify(contours: &[Contour]) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for (index, contour) in contours.iter().enumerate() {
        let shape = classify_contour(index, contour);
        debug!(
            index,
            category = %shape.category,
            vertices = shape.vertices,
            circularity = ?shape.circularity,
            "classified contour"
        );
        result.record(shape);
    }

    info!(
        contours = contours.len(),
        triangles = result.count(ShapeCategory::Triangle),
        quadrilaterals = result.count(ShapeCategory::Quadrilateral),
        pentagons = result.count(ShapeCategory::Pentagon),
        circles = result.count(ShapeCategory::Circle),
        other = result.count(ShapeCategory::Other),
        "classification finished"
    );

    result
}

/// Classify a single contour
pub fn classify_contour(index: usize, contour: &Contour) -> ClassifiedShape {
    let perimeter = contour.perimeter();
    let area = contour.area();

    let mut shape = ClassifiedShape {
        index,
        category: ShapeCategory::Other,
        vertices: contour.len(),
        perimeter,
        area,
        circularity: None,
    };

    if contour.len() < 3 || !perimeter.is_finite() || perimeter <= 0.0 {
        return shape;
    }

    let approximation =
        approximate_closed_polygon(&contour.to_coords(), APPROXIMATION_EPSILON_FACTOR * perimeter);
    shape.vertices = approximation.len();

    if let Some(category) = ShapeCategory::from_vertex_count(shape.vertices) {
        shape.category = category;
        return shape;
    }

    let c = circularity(area, perimeter);
    shape.circularity = Some(c);
    if c > CIRCULARITY_THRESHOLD {
        shape.category = ShapeCategory::Circle;
    }
    shape
}

/// `4π·A / P²`; 1.0 for a perfect circle. Not clamped.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    4.0 * PI * area / (perimeter * perimeter)
}
