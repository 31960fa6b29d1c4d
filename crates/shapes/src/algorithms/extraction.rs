use image::GrayImage;
use imageproc::contours::BorderType;
use crate::{error::Result, traits::ContourExtractor, types::Contour};

/// How contour points are stored after border following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainApproximation {
    /// Every boundary pixel
    None,
    /// Straight horizontal, vertical and diagonal runs reduced to their end points
    #[default]
    Simple,
}

/// Border-following contour extractor that only reports the outermost
/// boundaries; holes and anything nested inside them are skipped
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor {
    pub approximation: ChainApproximation,
}

impl ExternalContourExtractor {
    pub fn new(approximation: ChainApproximation) -> Self {
        Self { approximation }
    }
}

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);

        let result = contours
            .into_iter()
            .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
            .map(|contour| {
                let points: Vec<[i32; 2]> = contour.points.iter().map(|p| [p.x, p.y]).collect();
                let points = match self.approximation {
                    ChainApproximation::None => points,
                    ChainApproximation::Simple => compress_chain(&points),
                };
                Contour::new(points.into_iter().map(|[x, y]| [x as f32, y as f32]).collect())
            })
            .collect();

        Ok(result)
    }
}

/// Drop every point whose incoming and outgoing steps are identical, treating
/// the chain as closed
pub fn compress_chain(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let mut points = points.to_vec();
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let n = points.len();
    if n < 3 {
        return points;
    }

    let step = |from: [i32; 2], to: [i32; 2]| [to[0] - from[0], to[1] - from[1]];

    // Steps around a closed chain sum to zero, so at least one point survives
    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn filled_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn straight_runs_collapse_to_corners() {
        let mut square = Vec::new();
        for x in 0..5 {
            square.push([x, 0]);
        }
        for y in 1..5 {
            square.push([4, y]);
        }
        for x in (0..4).rev() {
            square.push([x, 4]);
        }
        for y in (1..4).rev() {
            square.push([0, y]);
        }
        let compressed = compress_chain(&square);
        assert_eq!(compressed, vec![[0, 0], [4, 0], [4, 4], [0, 4]]);
    }

    #[test]
    fn diagonal_runs_are_compressed() {
        let triangle = vec![[0, 0], [1, 1], [2, 2], [3, 3], [2, 3], [1, 3], [0, 3], [0, 2], [0, 1]];
        assert_eq!(compress_chain(&triangle), vec![[0, 0], [3, 3], [0, 3]]);
    }

    #[test]
    fn short_chains_are_untouched() {
        assert_eq!(compress_chain(&[[1, 1], [2, 1]]), vec![[1, 1], [2, 1]]);
    }

    #[test]
    fn holes_and_nested_shapes_are_skipped() {
        let mut img = GrayImage::new(60, 60);
        filled_rect(&mut img, 5, 5, 55, 55, 255);
        filled_rect(&mut img, 15, 15, 45, 45, 0);
        filled_rect(&mut img, 25, 25, 35, 35, 255);

        let contours = ExternalContourExtractor::default().extract_contours(&img).unwrap();
        assert_eq!(contours.len(), 1);
        let ([min_x, min_y], [max_x, max_y]) = contours[0].bounding_box();
        assert_eq!((min_x, min_y, max_x, max_y), (5.0, 5.0, 54.0, 54.0));
    }

    #[test]
    fn simple_chain_keeps_only_corners_of_a_rectangle() {
        let mut img = GrayImage::new(40, 40);
        filled_rect(&mut img, 10, 10, 30, 20, 255);

        let simple = ExternalContourExtractor::default().extract_contours(&img).unwrap();
        let full = ExternalContourExtractor::new(ChainApproximation::None)
            .extract_contours(&img)
            .unwrap();

        assert_eq!(simple.len(), 1);
        assert_eq!(simple[0].len(), 4);
        assert!(full[0].len() > simple[0].len());
    }

    #[test]
    fn separate_blobs_give_separate_contours() {
        let mut img = GrayImage::new(80, 40);
        filled_rect(&mut img, 5, 5, 25, 25, 255);
        filled_rect(&mut img, 40, 5, 70, 30, 255);

        let contours = ExternalContourExtractor::default().extract_contours(&img).unwrap();
        assert_eq!(contours.len(), 2);
    }
}
