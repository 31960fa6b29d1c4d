//! Drawing classification results onto an image.
//!
//! Contours are outlined in one colour when they were recognized as a named
//! shape and in another when they fell through to `Other`. A legend with the
//! per-category counts is placed near the bottom-left corner on a
//! half-transparent white panel. Glyphs are only drawn when a font is given;
//! the panel is drawn either way.

use std::fmt;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut};
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use crate::{
    error::{Result, ShapeError},
    types::{Contour, DetectionOutput, ShapeCategory, ShapeCounts},
};

/// Order in which categories are listed in the legend
pub const LEGEND_ORDER: [ShapeCategory; 5] = [
    ShapeCategory::Triangle,
    ShapeCategory::Quadrilateral,
    ShapeCategory::Circle,
    ShapeCategory::Pentagon,
    ShapeCategory::Other,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderStyle {
    /// Outline colour for triangles, quadrilaterals, pentagons and circles
    pub recognized_color: [u8; 3],
    /// Outline colour for everything else
    pub other_color: [u8; 3],
    /// Outline thickness in pixels
    pub thickness: u32,
    /// Opacity of the white legend panel
    pub legend_alpha: f32,
    /// Legend font size in pixels
    pub font_scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            recognized_color: [0, 255, 0],
            other_color: [255, 255, 255],
            thickness: 2,
            legend_alpha: 0.5,
            font_scale: 18.0,
        }
    }
}

impl RenderStyle {
    pub fn color_for(&self, category: ShapeCategory) -> Rgb<u8> {
        if category.is_recognized() {
            Rgb(self.recognized_color)
        } else {
            Rgb(self.other_color)
        }
    }
}

/// Text summary of the category counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    pub lines: Vec<String>,
}

impl Legend {
    pub fn from_counts(counts: &ShapeCounts) -> Self {
        let mut lines = vec!["Detected shapes:".to_string()];
        lines.extend(
            LEGEND_ORDER
                .iter()
                .map(|&category| format!("{}: {}", category.label(), counts.get(category))),
        );
        Self { lines }
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Load a TrueType/OpenType font for the legend
pub fn load_font<P: AsRef<Path>>(path: P) -> Result<FontVec> {
    let bytes = std::fs::read(path)?;
    load_font_from_bytes(bytes)
}

pub fn load_font_from_bytes(bytes: Vec<u8>) -> Result<FontVec> {
    FontVec::try_from_vec(bytes).map_err(|e| ShapeError::Font(e.to_string()))
}

/// Draw every contour and the legend onto a copy of `image`
pub fn annotate(
    image: &RgbImage,
    output: &DetectionOutput,
    style: &RenderStyle,
    font: Option<&FontVec>,
) -> RgbImage {
    let mut canvas = image.clone();

    for (contour, shape) in output.iter() {
        draw_contour_mut(&mut canvas, contour, style.color_for(shape.category), style.thickness);
    }

    let legend = Legend::from_counts(&output.classification.counts);
    draw_legend_mut(&mut canvas, &legend, style, font);
    canvas
}

/// Draw a closed contour outline
pub fn draw_contour_mut(canvas: &mut RgbImage, contour: &Contour, color: Rgb<u8>, thickness: u32) {
    let n = contour.len();
    if n == 0 {
        return;
    }

    let thickness = thickness.max(1) as i32;
    let half = thickness / 2;
    for dy in 0..thickness {
        for dx in 0..thickness {
            let (ox, oy) = ((dx - half) as f32, (dy - half) as f32);
            for i in 0..n {
                let [x0, y0] = contour.points[i];
                let [x1, y1] = contour.points[(i + 1) % n];
                draw_line_segment_mut(canvas, (x0 + ox, y0 + oy), (x1 + ox, y1 + oy), color);
            }
        }
    }
}

/// Draw the legend panel with its bottom-left corner at 5% of the width and
/// 95% of the height
pub fn draw_legend_mut(canvas: &mut RgbImage, legend: &Legend, style: &RenderStyle, font: Option<&FontVec>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    const PADDING: u32 = 6;
    let line_height = style.font_scale.max(1.0).ceil() as u32;
    let longest = legend.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as f32;
    let panel_width = (longest * style.font_scale * 0.55).ceil() as u32 + 2 * PADDING;
    let panel_height = line_height * legend.lines.len() as u32 + 2 * PADDING;

    let left = (width as f32 * 0.05) as u32;
    let bottom = ((height as f32 * 0.95) as u32).min(height - 1);
    let top = bottom.saturating_sub(panel_height);
    let right = (left + panel_width).min(width - 1);

    let alpha = style.legend_alpha.clamp(0.0, 1.0);
    for y in top..=bottom {
        for x in left..=right {
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f32 * (1.0 - alpha) + 255.0 * alpha).round() as u8;
            }
        }
    }

    let Some(font) = font else {
        return;
    };
    let scale = PxScale::from(style.font_scale);
    for (i, line) in legend.lines.iter().enumerate() {
        let y = top + PADDING + i as u32 * line_height;
        draw_text_mut(canvas, Rgb([0, 0, 0]), (left + PADDING) as i32, y as i32, scale, font, line);
    }
}
