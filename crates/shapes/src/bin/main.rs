use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;
use shapes::{Legend, PipelineBuilder, RenderStyle, ShapeDetectorCommand, annotate, save_image};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🎯 Shape Detection Demo");
    println!("=======================");

    demo_commands()?;
    demo_synthetic_scene()?;

    println!("✅ Demo completed successfully!");
    println!("📁 Generated files: demo_shapes.png, demo_shapes_annotated.png, demo_shapes.geojson");

    Ok(())
}

fn demo_commands() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n🔧 Available commands:");
    for (i, name) in ShapeDetectorCommand::command_names().iter().enumerate() {
        println!("   {}. {}", i + 1, name);
    }

    let command = ShapeDetectorCommand::DetectShapesWithThresholds {
        path: "demo_shapes.png".to_string(),
        low: 50.0,
        high: 150.0,
    };
    println!("\n📝 {}: {}", command, command.description());
    for (name, desc, required) in command.parameters_info() {
        let req_marker = if required { "*" } else { " " };
        println!("     {}{}: {}", req_marker, name, desc);
    }
    println!("   JSON: {}", serde_json::to_string(&command)?);
    Ok(())
}

fn demo_synthetic_scene() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n🔬 Classifying a synthetic scene");
    println!("--------------------------------");

    let image = create_scene();
    save_image(&image, "demo_shapes.png")?;

    let pipeline = PipelineBuilder::build_default();
    println!("   {}", pipeline.info());

    let output = pipeline.detect(&image::DynamicImage::ImageRgb8(image.clone()))?;
    for (contour, shape) in output.iter() {
        println!(
            "   • Contour {}: {} points → {} vertices → {} (circularity {:?})",
            shape.index,
            contour.len(),
            shape.vertices,
            shape.category,
            shape.circularity.map(|c| (c * 1000.0).round() / 1000.0),
        );
    }

    println!("\n{}", Legend::from_counts(&output.classification.counts));

    let annotated = annotate(&image, &output, &RenderStyle::default(), None);
    save_image(&annotated, "demo_shapes_annotated.png")?;
    output.save_geojson("demo_shapes.geojson")?;

    Ok(())
}

fn create_scene() -> RgbImage {
    let mut img = RgbImage::from_pixel(480, 320, Rgb([30, 30, 30]));
    let fill = Rgb([220, 220, 220]);

    // Triangle
    draw_polygon_mut(
        &mut img,
        &[Point::new(60, 140), Point::new(140, 140), Point::new(100, 60)],
        fill,
    );

    // Square
    draw_polygon_mut(
        &mut img,
        &[Point::new(180, 60), Point::new(260, 60), Point::new(260, 140), Point::new(180, 140)],
        fill,
    );

    // Pentagon
    let pentagon: Vec<Point<i32>> = (0..5)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + std::f32::consts::TAU * i as f32 / 5.0;
            Point::new(
                (370.0 + 45.0 * angle.cos()).round() as i32,
                (100.0 + 45.0 * angle.sin()).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(&mut img, &pentagon, fill);

    // Circle
    draw_filled_circle_mut(&mut img, (120, 240), 45, fill);

    // Star
    let star: Vec<Point<i32>> = (0..10)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + std::f32::consts::PI * i as f32 / 5.0;
            let r = if i % 2 == 0 { 55.0 } else { 20.0 };
            Point::new(
                (300.0 + r * angle.cos()).round() as i32,
                (240.0 + r * angle.sin()).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(&mut img, &star, fill);

    img
}
