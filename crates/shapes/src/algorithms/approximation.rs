use geo_types::{Coord, LineString};

/// Closed-curve Douglas-Peucker approximation.
///
/// The ring is split at two mutually distant points, each half is simplified
/// as an open polyline with `geo`'s Ramer-Douglas-Peucker implementation, and
/// the halves are joined back without repeating the split points. A final
/// sweep drops vertices, split points included, that sit on a nearly
/// straight run between their neighbours. Returns the vertices of the
/// approximating polygon (not closed).
pub fn approximate_closed_polygon(points: &[Coord<f64>], epsilon: f64) -> Vec<Coord<f64>> {
    use geo::Simplify;

    if points.len() < 3 {
        return points.to_vec();
    }

    let (first, second) = split_points(points);
    let (lo, hi) = (first.min(second), first.max(second));

    if distance(points[lo], points[hi]) <= epsilon {
        return vec![points[lo]];
    }

    let forward = LineString::new(points[lo..=hi].to_vec());
    let backward = LineString::new(
        points[hi..]
            .iter()
            .chain(points[..=lo].iter())
            .copied()
            .collect(),
    );

    let forward = forward.simplify(&epsilon);
    let backward = backward.simplify(&epsilon);

    // Both halves start and end on the split points; keep those once.
    let backward_len = backward.0.len();
    let mut approximation: Vec<Coord<f64>> = forward.0;
    approximation.extend(
        backward
            .0
            .into_iter()
            .skip(1)
            .take(backward_len.saturating_sub(2)),
    );
    drop_collinear_vertices(approximation, epsilon)
}

/// One pass around the polygon removing each vertex whose distance to the
/// chord between the previous kept vertex and the next vertex is at most
/// `epsilon / √2`. Never goes below two vertices.
fn drop_collinear_vertices(vertices: Vec<Coord<f64>>, epsilon: f64) -> Vec<Coord<f64>> {
    let n = vertices.len();
    if n < 3 {
        return vertices;
    }

    let mut kept: Vec<Coord<f64>> = Vec::with_capacity(n);
    let mut start = vertices[n - 1];
    for (i, &point) in vertices.iter().enumerate() {
        let end = if i + 1 == n {
            kept.first().copied().unwrap_or(vertices[0])
        } else {
            vertices[i + 1]
        };
        let remaining = kept.len() + (n - i);
        if remaining > 2 && near_chord(start, point, end, epsilon) {
            continue;
        }
        kept.push(point);
        start = point;
    }
    kept
}

fn near_chord(start: Coord<f64>, point: Coord<f64>, end: Coord<f64>, epsilon: f64) -> bool {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let chord_sq = dx * dx + dy * dy;
    let cross = (point.x - start.x) * dy - (point.y - start.y) * dx;
    chord_sq > 0.0 && cross * cross <= 0.5 * epsilon * epsilon * chord_sq
}

/// Pick two far-apart indices: start at the first point, then hop to the
/// farthest point from the current anchor a fixed number of times
fn split_points(points: &[Coord<f64>]) -> (usize, usize) {
    const ITERATIONS: usize = 3;

    let mut anchor = 0;
    let mut farthest = farthest_from(points, anchor);
    for _ in 1..ITERATIONS {
        let next = farthest_from(points, farthest);
        anchor = farthest;
        farthest = next;
    }
    (anchor, farthest)
}

fn farthest_from(points: &[Coord<f64>], anchor: usize) -> usize {
    let origin = points[anchor];
    let mut best = anchor;
    let mut best_distance = 0.0;
    for (i, &point) in points.iter().enumerate() {
        let d = distance(origin, point);
        if d > best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
