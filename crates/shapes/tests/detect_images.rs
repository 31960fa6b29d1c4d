use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use shapes::{
    Pipeline, PipelineBuilder, RenderStyle, ShapeCategory, ShapeDetector, ShapeDetectorCommand,
    ShapeError, annotate,
};

const FOREGROUND: Luma<u8> = Luma([255u8]);

fn canvas() -> GrayImage {
    GrayImage::new(200, 200)
}

fn regular(sides: usize, radius: f32, rotation: f32) -> Vec<Point<i32>> {
    (0..sides)
        .map(|i| {
            let angle = rotation + std::f32::consts::TAU * i as f32 / sides as f32;
            Point::new(
                (100.0 + radius * angle.cos()).round() as i32,
                (100.0 + radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

fn star_image() -> GrayImage {
    let mut img = canvas();
    let star: Vec<Point<i32>> = (0..10)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + std::f32::consts::PI * i as f32 / 5.0;
            let r = if i % 2 == 0 { 55.0 } else { 20.0 };
            Point::new(
                (100.0 + r * angle.cos()).round() as i32,
                (100.0 + r * angle.sin()).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(&mut img, &star, FOREGROUND);
    img
}

fn silhouette_pipeline() -> Pipeline {
    Pipeline::builder().with_threshold(128).build()
}

fn only_category(image: &GrayImage) -> ShapeCategory {
    let output = silhouette_pipeline().process(image).unwrap();
    assert_eq!(output.contours.len(), 1, "expected exactly one contour");
    output.classification.shapes[0].category
}

#[test]
fn filled_triangle() {
    let mut img = canvas();
    draw_polygon_mut(&mut img, &[Point::new(40, 150), Point::new(160, 150), Point::new(100, 40)], FOREGROUND);
    assert_eq!(only_category(&img), ShapeCategory::Triangle);
}

#[test]
fn filled_square() {
    let mut img = canvas();
    draw_filled_rect_mut(&mut img, Rect::at(50, 50).of_size(100, 100), FOREGROUND);
    assert_eq!(only_category(&img), ShapeCategory::Quadrilateral);
}

#[test]
fn filled_pentagon() {
    let mut img = canvas();
    let pentagon = regular(5, 60.0, -std::f32::consts::FRAC_PI_2);
    draw_polygon_mut(&mut img, &pentagon, FOREGROUND);
    assert_eq!(only_category(&img), ShapeCategory::Pentagon);
}

#[test]
fn filled_circle() {
    let mut img = canvas();
    draw_filled_circle_mut(&mut img, (100, 100), 45, FOREGROUND);
    assert_eq!(only_category(&img), ShapeCategory::Circle);
}

#[test]
fn filled_star_is_other() {
    assert_eq!(only_category(&star_image()), ShapeCategory::Other);
}

#[test]
fn edge_pipeline_finds_a_square() {
    let mut img = canvas();
    draw_filled_rect_mut(&mut img, Rect::at(50, 50).of_size(100, 100), FOREGROUND);

    let output = PipelineBuilder::build_default().process(&img).unwrap();
    assert_eq!(output.classification.total(), output.contours.len());
    assert_eq!(output.classification.count(ShapeCategory::Quadrilateral), 1);
}

#[test]
fn counts_match_contours_for_a_busy_scene() {
    let mut img = GrayImage::new(400, 200);
    draw_filled_rect_mut(&mut img, Rect::at(20, 20).of_size(60, 60), FOREGROUND);
    draw_filled_circle_mut(&mut img, (300, 100), 40, FOREGROUND);
    draw_polygon_mut(&mut img, &[Point::new(120, 180), Point::new(220, 180), Point::new(170, 100)], FOREGROUND);

    let output = PipelineBuilder::build_default().process(&img).unwrap();
    assert!(output.contours.len() >= 3);
    assert_eq!(output.classification.total(), output.contours.len());
    assert_eq!(output.classification.shapes.len(), output.contours.len());
}

#[test]
fn detector_runs_from_a_file_and_annotates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.png");
    let mut img = canvas();
    draw_filled_rect_mut(&mut img, Rect::at(50, 50).of_size(100, 100), FOREGROUND);
    DynamicImage::ImageLuma8(img).save(&path).unwrap();

    let command = ShapeDetectorCommand::DetectShapes {
        path: path.to_string_lossy().to_string(),
    };
    let report = ShapeDetector::new().execute(&command).unwrap();

    assert_eq!(report.image.dimensions(), (200, 200));
    assert_eq!(report.output.classification.count(ShapeCategory::Quadrilateral), 1);

    let annotated = annotate(&report.image, &report.output, &RenderStyle::default(), None);
    let green = annotated.pixels().filter(|p| p.0 == [0, 255, 0]).count();
    assert!(green > 100, "expected a green outline, found {green} pixels");
}

#[test]
fn invalid_thresholds_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.png");
    DynamicImage::ImageLuma8(canvas()).save(&path).unwrap();

    let command = ShapeDetectorCommand::DetectShapesWithThresholds {
        path: path.to_string_lossy().to_string(),
        low: 200.0,
        high: 100.0,
    };
    let err = ShapeDetector::new().execute(&command).unwrap_err();
    assert!(matches!(err, ShapeError::InvalidParameter(_)));
}
