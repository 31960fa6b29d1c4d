use std::collections::BTreeMap;

use geo_types::{Coord, LineString, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr, VariantNames};

/// A closed polyline outlining the external boundary of a detected region.
///
/// The closing edge from the last point back to the first is implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[f32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[f32; 2]>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `geo` coordinates in double precision
    pub fn to_coords(&self) -> Vec<Coord<f64>> {
        self.points
            .iter()
            .map(|&[x, y]| Coord { x: x as f64, y: y as f64 })
            .collect()
    }

    /// Convert to a geo-types Polygon (the ring is closed automatically)
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::new(self.to_coords()), vec![])
    }

    /// Closed perimeter, including the edge from the last point back to the first
    pub fn perimeter(&self) -> f64 {
        use geo::EuclideanLength;

        let mut ring = LineString::new(self.to_coords());
        ring.close();
        ring.euclidean_length()
    }

    /// Enclosed area (shoelace), independent of winding direction
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Get the bounding box of the contour
    pub fn bounding_box(&self) -> ([f32; 2], [f32; 2]) {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for &[x, y] in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        ([min_x, min_y], [max_x, max_y])
    }
}

impl From<Vec<[f32; 2]>> for Contour {
    fn from(points: Vec<[f32; 2]>) -> Self {
        Self::new(points)
    }
}

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash, PartialOrd, Ord
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeCategory {
    Triangle,
    Quadrilateral,
    Pentagon,
    Circle,
    Other,
}

impl ShapeCategory {
    /// Category for a polygon approximation with `vertices` corners, if the
    /// vertex count alone decides it
    pub fn from_vertex_count(vertices: usize) -> Option<Self> {
        match vertices {
            3 => Some(Self::Triangle),
            4 => Some(Self::Quadrilateral),
            5 => Some(Self::Pentagon),
            _ => None,
        }
    }

    /// Whether the contour was recognized as one of the named shapes
    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Plural label used in the legend
    pub fn label(self) -> &'static str {
        match self {
            Self::Triangle => "Triangle(s)",
            Self::Quadrilateral => "Quadrilateral(s)",
            Self::Pentagon => "Pentagon(s)",
            Self::Circle => "Circle(s)",
            Self::Other => "Other(s)",
        }
    }
}

/// Count of contours per category. Every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeCounts(BTreeMap<ShapeCategory, usize>);

impl ShapeCounts {
    pub fn new() -> Self {
        Self(ShapeCategory::iter().map(|category| (category, 0)).collect())
    }

    pub fn increment(&mut self, category: ShapeCategory) {
        *self.0.entry(category).or_insert(0) += 1;
    }

    pub fn get(&self, category: ShapeCategory) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeCategory, usize)> + '_ {
        self.0.iter().map(|(&category, &count)| (category, count))
    }
}

impl Default for ShapeCounts {
    fn default() -> Self {
        Self::new()
    }
}

/// Classification of a single contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedShape {
    /// Position of the contour in the classified sequence
    pub index: usize,
    pub category: ShapeCategory,
    /// Vertex count of the polygon approximation
    pub vertices: usize,
    pub perimeter: f64,
    pub area: f64,
    /// Only computed when the vertex count did not decide the category
    pub circularity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub counts: ShapeCounts,
    /// One entry per input contour, in input order
    pub shapes: Vec<ClassifiedShape>,
}

impl ClassificationResult {
    pub fn record(&mut self, shape: ClassifiedShape) {
        self.counts.increment(shape.category);
        self.shapes.push(shape);
    }

    pub fn count(&self, category: ShapeCategory) -> usize {
        self.counts.get(category)
    }

    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn category_of(&self, index: usize) -> Option<ShapeCategory> {
        self.shapes.get(index).map(|shape| shape.category)
    }
}

/// Contours found in an image together with their classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionOutput {
    pub contours: Vec<Contour>,
    pub classification: ClassificationResult,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectionOutput {
    /// Pair each contour with its classification
    pub fn iter(&self) -> impl Iterator<Item = (&Contour, &ClassifiedShape)> {
        self.contours.iter().zip(self.classification.shapes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_start_with_every_category_at_zero() {
        let counts = ShapeCounts::new();
        assert_eq!(counts.iter().count(), 5);
        assert!(counts.iter().all(|(_, count)| count == 0));
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn counts_serialize_as_snake_case_map() {
        let mut counts = ShapeCounts::new();
        counts.increment(ShapeCategory::Circle);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["circle"], 1);
        assert_eq!(json["quadrilateral"], 0);
    }

    #[test]
    fn category_names_round_trip_through_strum() {
        assert_eq!(ShapeCategory::Quadrilateral.to_string(), "quadrilateral");
        assert_eq!("pentagon".parse::<ShapeCategory>().unwrap(), ShapeCategory::Pentagon);
        assert_eq!(ShapeCategory::VARIANTS.len(), 5);
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        let square = Contour::new(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]);
        assert!((square.perimeter() - 40.0).abs() < 1e-9);
        assert!((square.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn area_ignores_winding_direction() {
        let clockwise = Contour::new(vec![[0.0, 0.0], [0.0, 4.0], [3.0, 0.0]]);
        assert!((clockwise.area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_contours_have_zero_measurements() {
        let point = Contour::new(vec![[2.0, 2.0]; 4]);
        assert_eq!(point.perimeter(), 0.0);
        assert_eq!(point.area(), 0.0);
        assert_eq!(Contour::default().perimeter(), 0.0);
    }
}
