//! Point type and the small pieces of geometry the drawing core needs.

use std::f32::consts::TAU;

/// A position in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Interleaved `x, y` coordinates for rendering.
///
/// `live_tail` is appended after the committed vertices; pass `None` once the
/// shape is closed. An empty vertex list always yields an empty sequence.
pub fn flatten(vertices: &[Point], live_tail: Option<Point>) -> Vec<f32> {
    if vertices.is_empty() {
        return Vec::new();
    }
    vertices
        .iter()
        .chain(live_tail.iter())
        .flat_map(|p| [p.x, p.y])
        .collect()
}

/// Corners of a regular polygon inscribed in a circle centered at
/// `(radius, radius)`, vertex `i` at angle `i * 2π / side_count`.
pub fn regular_polygon_vertices(side_count: usize, radius: f32) -> Vec<Point> {
    if side_count == 0 {
        return Vec::new();
    }
    let sweep = TAU / side_count as f32;
    (0..side_count)
        .map(|i| {
            let angle = i as f32 * sweep;
            Point::new(radius + radius * angle.cos(), radius + radius * angle.sin())
        })
        .collect()
}

/// Size an image is displayed at inside a container, preserving its aspect
/// ratio. Images that already fit keep their natural size.
pub fn fit_within(image: (f32, f32), container: (f32, f32)) -> (f32, f32) {
    let (w, h) = image;
    if w <= 0.0 || h <= 0.0 {
        return (0.0, 0.0);
    }
    let ratio = (container.0 / w).min(container.1 / h).min(1.0);
    (w * ratio, h * ratio)
}

/// Twice the signed area; positive for counter-clockwise winding in a
/// y-up frame.
fn signed_area2(polygon: &[Point]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(a: Point, b: Point, c: Point) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Split a simple polygon (no closing duplicate) into triangles by ear
/// clipping. Self-intersecting leftovers are fanned from their first vertex.
pub fn triangulate(polygon: &[Point]) -> Vec<[usize; 3]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }
    let orientation = signed_area2(polygon).signum();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (pa, pb, pc) = (
                polygon[remaining[(i + m - 1) % m]],
                polygon[remaining[i]],
                polygon[remaining[(i + 1) % m]],
            );
            if cross(pa, pb, pc) * orientation < 0.0 {
                return false;
            }
            // Vertices coinciding with a corner do not block the ear.
            !remaining
                .iter()
                .map(|&j| polygon[j])
                .filter(|&p| p != pa && p != pb && p != pc)
                .any(|p| in_triangle(p, pa, pb, pc))
        });
        match ear {
            Some(i) => {
                triangles.push([remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    for k in 1..remaining.len() - 1 {
        triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
    }
    triangles
}
