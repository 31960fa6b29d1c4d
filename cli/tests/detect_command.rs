use std::path::Path;
use std::process::{Command, Output};

use image::{Rgb, RgbImage};

fn shape_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shape_cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch shape_cli")
}

fn error_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.starts_with("Error processing image:"))
        .map(str::to_string)
        .collect()
}

fn write_square(path: &Path) {
    let mut img = RgbImage::new(120, 120);
    for y in 30..90 {
        for x in 30..90 {
            img.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    img.save(path).unwrap();
}

#[test]
fn missing_image_exits_with_one_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nowhere.png");

    let output = shape_cli(&["detect", "--input", input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(error_lines(&output).len(), 1, "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(!dir.path().join("nowhere_shapes.png").exists());
}

#[test]
fn undecodable_image_exits_with_one_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.png");
    std::fs::write(&input, b"not a png at all").unwrap();

    let output = shape_cli(&["detect", "--input", input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(error_lines(&output).len(), 1);
}

#[test]
fn inverted_thresholds_exit_with_one_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("square.png");
    write_square(&input);

    let output = shape_cli(&[
        "detect", "--input", input.to_str().unwrap(), "--low", "200", "--high", "100",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(error_lines(&output).len(), 1);
}

#[test]
fn successful_run_writes_image_and_prints_legend() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("square.png");
    write_square(&input);

    let output = shape_cli(&["detect", "--input", input.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(error_lines(&output).is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detected shapes:"));
    assert!(stdout.contains("Quadrilateral(s): 1"));
    assert!(dir.path().join("square_shapes.png").exists());
}
