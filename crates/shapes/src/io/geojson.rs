use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Number;
use crate::{
    algorithms::classify,
    error::{Result, ShapeError},
    types::{Contour, DetectionOutput},
};

fn float(value: f64) -> serde_json::Value {
    Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Closed GeoJSON ring for a contour
fn ring(contour: &Contour) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = contour
        .points
        .iter()
        .map(|&[x, y]| vec![x as f64, y as f64])
        .collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}

impl DetectionOutput {
    /// Export contours and their categories as a GeoJSON feature collection
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::with_capacity(self.contours.len());

        for (contour, shape) in self.iter() {
            let geometry = Geometry::new(Value::Polygon(vec![ring(contour)]));

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), shape.index.into());
            properties.insert("category".to_string(), shape.category.to_string().into());
            properties.insert("vertices".to_string(), shape.vertices.into());
            properties.insert("perimeter".to_string(), float(shape.perimeter));
            properties.insert("area".to_string(), float(shape.area));
            properties.insert(
                "circularity".to_string(),
                shape.circularity.map(float).unwrap_or(serde_json::Value::Null),
            );

            features.push(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(geojson::feature::Id::Number(Number::from(shape.index))),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("image_width".to_string(), self.image_width.into());
        foreign_members.insert("image_height".to_string(), self.image_height.into());
        foreign_members.insert("shape_count".to_string(), self.contours.len().into());
        foreign_members.insert(
            "counts".to_string(),
            serde_json::to_value(&self.classification.counts)?,
        );

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        std::fs::write(path, geojson_string)?;
        Ok(())
    }

    /// Load contours from a GeoJSON file and classify them
    pub fn from_geojson_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let geojson_str = std::fs::read_to_string(path)?;
        Self::from_geojson_string(&geojson_str)
    }

    /// Load contours from a GeoJSON string and classify them.
    ///
    /// The exterior ring of every Polygon feature becomes a contour; stored
    /// categories are ignored and recomputed.
    pub fn from_geojson_string(geojson_str: &str) -> Result<Self> {
        let geojson: FeatureCollection = geojson_str.parse()?;

        let dimension = |key: &str| -> Result<u32> {
            geojson
                .foreign_members
                .as_ref()
                .and_then(|members| members.get(key))
                .and_then(|v| v.as_u64())
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| ShapeError::InvalidParameter(format!("Missing or invalid {key}")))
        };
        let image_width = dimension("image_width")?;
        let image_height = dimension("image_height")?;

        let mut contours = Vec::new();
        for feature in &geojson.features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            let Value::Polygon(rings) = &geometry.value else {
                continue;
            };
            let Some(exterior) = rings.first() else {
                continue;
            };

            let mut points: Vec<[f32; 2]> = exterior
                .iter()
                .filter(|coord| coord.len() >= 2)
                .map(|coord| [coord[0] as f32, coord[1] as f32])
                .collect();
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            contours.push(Contour::new(points));
        }

        let classification = classify(&contours);
        Ok(DetectionOutput {
            contours,
            classification,
            image_width,
            image_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeCategory;

    fn output() -> DetectionOutput {
        let contours = vec![
            Contour::new(vec![[10.0, 10.0], [60.0, 10.0], [60.0, 60.0], [10.0, 60.0]]),
            Contour::new(vec![[100.0, 100.0], [150.0, 100.0], [125.0, 140.0]]),
        ];
        let classification = classify(&contours);
        DetectionOutput {
            contours,
            classification,
            image_width: 200,
            image_height: 160,
        }
    }

    #[test]
    fn one_feature_per_contour() {
        let collection = output().to_geojson().unwrap();
        assert_eq!(collection.features.len(), 2);

        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(properties["category"], "quadrilateral");
        assert_eq!(properties["vertices"], 4);
        assert!(properties["circularity"].is_null());

        let members = collection.foreign_members.as_ref().unwrap();
        assert_eq!(members["shape_count"], 2);
        assert_eq!(members["counts"]["triangle"], 1);
    }

    #[test]
    fn rings_are_closed() {
        let collection = output().to_geojson().unwrap();
        let geometry = collection.features[1].geometry.as_ref().unwrap();
        let Value::Polygon(rings) = &geometry.value else {
            panic!("expected a polygon");
        };
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[test]
    fn reloading_reclassifies_the_same_shapes() {
        let original = output();
        let text = original.to_geojson_string().unwrap();
        let reloaded = DetectionOutput::from_geojson_string(&text).unwrap();

        assert_eq!(reloaded.image_width, 200);
        assert_eq!(reloaded.image_height, 160);
        assert_eq!(reloaded.contours, original.contours);
        assert_eq!(reloaded.classification.category_of(1), Some(ShapeCategory::Triangle));
    }

    #[test]
    fn missing_dimensions_are_rejected() {
        let text = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            DetectionOutput::from_geojson_string(text),
            Err(ShapeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let text = r#"{"type":"FeatureCollection","features":[],"image_width":4294967296,"image_height":10}"#;
        assert!(matches!(
            DetectionOutput::from_geojson_string(text),
            Err(ShapeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn saves_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shapes.geojson");
        output().save_geojson(&path).unwrap();
        let reloaded = DetectionOutput::from_geojson_file(&path).unwrap();
        assert_eq!(reloaded.classification.total(), 2);
    }
}
