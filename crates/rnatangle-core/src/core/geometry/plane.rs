use super::eigen::jacobi_eigen_symmetric;
use nalgebra::{Matrix3, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A best-fit plane with an orthonormal in-plane basis.
///
/// Invariant: when `valid`, `normal`, `e1`, and `e2` are unit vectors that are
/// mutually orthogonal. An invalid plane carries zeroed fields and is produced
/// for every degenerate input instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Centroid of the fitted points.
    pub centroid: Point3<f64>,
    /// Unit normal (eigenvector of the smallest covariance eigenvalue).
    pub normal: Vector3<f64>,
    /// First in-plane basis vector.
    pub e1: Vector3<f64>,
    /// Second in-plane basis vector.
    pub e2: Vector3<f64>,
    /// Whether the fit succeeded.
    pub valid: bool,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            centroid: Point3::origin(),
            normal: Vector3::zeros(),
            e1: Vector3::zeros(),
            e2: Vector3::zeros(),
            valid: false,
        }
    }
}

impl Plane {
    /// Signed distance of `p` along the plane normal.
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        (p - self.centroid).dot(&self.normal)
    }

    /// Projects `p` into the plane's 2-D basis.
    pub fn project(&self, p: &Point3<f64>) -> Vector2<f64> {
        let d = p - self.centroid;
        Vector2::new(d.dot(&self.e1), d.dot(&self.e2))
    }

    /// Lifts 2-D basis coordinates back onto the plane in 3-D.
    pub fn lift(&self, q: &Vector2<f64>) -> Point3<f64> {
        self.centroid + self.e1 * q.x + self.e2 * q.y
    }
}

/// Fits a plane through `points` by covariance eigen-analysis.
///
/// The normal is the eigenvector of the smallest covariance eigenvalue. The
/// fit is reported invalid when there are fewer than three points, the largest
/// eigenvalue is not positive, or the smallest-to-largest eigenvalue ratio
/// falls below `eps_collinear` (near-collinear or otherwise degenerate point
/// sets).
pub fn fit_plane(points: &[Point3<f64>], eps_collinear: f64) -> Plane {
    if points.len() < 3 {
        return Plane::default();
    }

    let inv_n = 1.0 / points.len() as f64;
    let centroid = Point3::from(
        points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            * inv_n,
    );

    let mut cov = Matrix3::zeros();
    for p in points {
        let d = p - centroid;
        cov += d * d.transpose();
    }

    let (values, vectors) = jacobi_eigen_symmetric(cov);

    let mut min_idx = 0;
    let mut max_idx = 0;
    for i in 1..3 {
        if values[i] < values[min_idx] {
            min_idx = i;
        }
        if values[i] > values[max_idx] {
            max_idx = i;
        }
    }
    let max_value = values[max_idx];
    if max_value <= 0.0 {
        return Plane::default();
    }
    if values[min_idx] / max_value < eps_collinear {
        return Plane::default();
    }

    let normal_raw: Vector3<f64> = vectors.column(min_idx).into();
    let norm = normal_raw.norm();
    if norm <= 0.0 {
        return Plane::default();
    }
    let normal = normal_raw / norm;

    let reference = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let e1 = reference.cross(&normal).normalize();
    let e2 = normal.cross(&e1);

    Plane {
        centroid,
        normal,
        e1,
        e2,
        valid: true,
    }
}

/// Intersects the segment `a`-`b` with a plane.
///
/// Returns the crossing point when the endpoints lie strictly on opposite
/// sides, both farther than `eps_plane` from the plane, and the crossing
/// parameter is strictly inside the segment. Ambiguous near-plane endpoints
/// are reported as no crossing, biasing toward false negatives rather than
/// boundary flicker.
pub fn segment_plane_intersection(
    a: &Point3<f64>,
    b: &Point3<f64>,
    plane: &Plane,
    eps_plane: f64,
) -> Option<Point3<f64>> {
    if !plane.valid {
        return None;
    }
    let d_a = plane.signed_distance(a);
    let d_b = plane.signed_distance(b);
    if d_a * d_b > 0.0 {
        return None;
    }
    if d_a.abs() < eps_plane || d_b.abs() < eps_plane {
        return None;
    }
    let denom = d_a - d_b;
    if denom.abs() <= 0.0 {
        return None;
    }
    let t = d_a / denom;
    if t <= 0.0 || t >= 1.0 {
        return None;
    }
    Some(a + (b - a) * t)
}
