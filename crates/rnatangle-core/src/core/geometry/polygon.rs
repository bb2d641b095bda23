use super::plane::Plane;
use nalgebra::{Point3, Vector2};
use serde::{Deserialize, Serialize};

/// An ordered vertex sequence in a plane's 2-D basis.
///
/// Valid iff it has at least three vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon2D {
    pub vertices: Vec<Vector2<f64>>,
    pub valid: bool,
}

fn cross2d(a: &Vector2<f64>, b: &Vector2<f64>, c: &Vector2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn distance_point_segment_squared(p: &Vector2<f64>, a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let v = b - a;
    let w = p - a;
    let vv = v.norm_squared();
    if vv <= 0.0 {
        return w.norm_squared();
    }
    let t = w.dot(&v) / vv;
    if t < 0.0 {
        return w.norm_squared();
    }
    if t > 1.0 {
        return (p - b).norm_squared();
    }
    (p - (a + v * t)).norm_squared()
}

/// Andrew monotone-chain convex hull.
///
/// Vertices are returned counter-clockwise; collinear points on hull edges are
/// dropped. Inputs with fewer than three points pass through unchanged.
pub fn convex_hull(mut points: Vec<Vector2<f64>>) -> Vec<Vector2<f64>> {
    if points.len() < 3 {
        return points;
    }
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut hull: Vec<Vector2<f64>> = Vec::with_capacity(points.len() * 2);
    for p in &points {
        while hull.len() >= 2 && cross2d(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_size = hull.len();
    for p in points.iter().rev() {
        while hull.len() > lower_size
            && cross2d(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

/// Projects 3-D points into the plane basis and takes their convex hull.
///
/// Returns an invalid polygon if the plane is invalid, fewer than three points
/// are supplied, or the hull collapses below three vertices.
pub fn project_polygon(points: &[Point3<f64>], plane: &Plane) -> Polygon2D {
    if !plane.valid {
        return Polygon2D::default();
    }
    let vertices: Vec<Vector2<f64>> = points.iter().map(|p| plane.project(p)).collect();
    if vertices.len() < 3 {
        return Polygon2D::default();
    }
    let hull = convex_hull(vertices);
    let valid = hull.len() >= 3;
    Polygon2D {
        vertices: hull,
        valid,
    }
}

/// Point-in-polygon test with a boundary tolerance band.
///
/// A query within `eps_polygon` of any edge counts as inside; otherwise the
/// verdict comes from ray-crossing parity.
pub fn point_in_polygon(q: &Vector2<f64>, poly: &Polygon2D, eps_polygon: f64) -> bool {
    if !poly.valid || poly.vertices.len() < 3 {
        return false;
    }
    let eps2 = eps_polygon * eps_polygon;
    let n = poly.vertices.len();
    for i in 0..n {
        let a = &poly.vertices[i];
        let b = &poly.vertices[(i + 1) % n];
        if distance_point_segment_squared(q, a, b) <= eps2 {
            return true;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &poly.vertices[i];
        let pj = &poly.vertices[j];
        let crosses = ((pi.y > q.y) != (pj.y > q.y))
            && (q.x < (pj.x - pi.x) * (q.y - pi.y) / (pj.y - pi.y + 1e-12) + pi.x);
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Signed area of a closed polygon (positive for counter-clockwise winding).
pub fn signed_area(poly: &[Vector2<f64>]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..poly.len() {
        let a = &poly[i];
        let b = &poly[(i + 1) % poly.len()];
        area += a.x * b.y - a.y * b.x;
    }
    0.5 * area
}

fn point_in_triangle(
    p: &Vector2<f64>,
    a: &Vector2<f64>,
    b: &Vector2<f64>,
    c: &Vector2<f64>,
    eps: f64,
) -> bool {
    let c1 = cross2d(a, b, p);
    let c2 = cross2d(b, c, p);
    let c3 = cross2d(c, a, p);
    let has_neg = c1 < -eps || c2 < -eps || c3 < -eps;
    let has_pos = c1 > eps || c2 > eps || c3 > eps;
    !(has_neg && has_pos)
}

const EAR_CLIP_GUARD: usize = 10_000;

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns vertex index triples. Works with either winding; near-zero-area
/// polygons and polygons where no ear can be found (self-intersecting input)
/// yield an empty triangulation rather than an error.
pub fn ear_clip_triangulate(poly: &[Vector2<f64>], eps: f64) -> Vec<[usize; 3]> {
    let mut tris = Vec::new();
    if poly.len() < 3 {
        return tris;
    }
    let area = signed_area(poly);
    if area.abs() <= eps {
        return tris;
    }
    let orientation = if area > 0.0 { 1.0 } else { -1.0 };

    let mut indices: Vec<usize> = (0..poly.len()).collect();
    let mut guard = 0;
    while indices.len() > 3 && guard < EAR_CLIP_GUARD {
        let n = indices.len();
        let mut ear_found = false;
        for i in 0..n {
            let i_prev = indices[(i + n - 1) % n];
            let i_curr = indices[i];
            let i_next = indices[(i + 1) % n];
            let a = &poly[i_prev];
            let b = &poly[i_curr];
            let c = &poly[i_next];
            if orientation * cross2d(a, b, c) <= eps {
                continue;
            }
            let has_inside = indices.iter().any(|&idx| {
                idx != i_prev && idx != i_curr && idx != i_next && {
                    point_in_triangle(&poly[idx], a, b, c, eps)
                }
            });
            if has_inside {
                continue;
            }
            tris.push([i_prev, i_curr, i_next]);
            indices.remove(i);
            ear_found = true;
            break;
        }
        if !ear_found {
            tris.clear();
            return tris;
        }
        guard += 1;
    }
    if indices.len() == 3 {
        tris.push([indices[0], indices[1], indices[2]]);
    }
    tris
}
