use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A triangle in 3-D, one facet of a loop surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl Triangle {
    /// Magnitude of the cross product of the edge vectors (twice the area).
    /// Used to discard degenerate facets.
    pub fn double_area(&self) -> f64 {
        (self.b - self.a).cross(&(self.c - self.a)).norm()
    }
}

/// Intersects the segment `a`-`b` with a triangle (Möller–Trumbore).
///
/// `eps` bounds both the determinant (parallel rejection) and the barycentric
/// coordinate tolerance. The crossing parameter must be strictly inside the
/// segment; endpoints resting on the triangle plane do not count.
pub fn segment_triangle_intersection(
    a: &Point3<f64>,
    b: &Point3<f64>,
    tri: &Triangle,
    eps: f64,
) -> Option<Point3<f64>> {
    let dir = b - a;
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;

    let pvec = dir.cross(&edge2);
    let det = edge1.dot(&pvec);
    if det.abs() < eps {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = a - tri.a;
    let u = tvec.dot(&pvec) * inv_det;
    if u < -eps || u > 1.0 + eps {
        return None;
    }

    let qvec = tvec.cross(&edge1);
    let v = dir.dot(&qvec) * inv_det;
    if v < -eps || u + v > 1.0 + eps {
        return None;
    }

    let t = edge2.dot(&qvec) * inv_det;
    if t <= eps || t >= 1.0 - eps {
        return None;
    }
    Some(a + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle {
            a: Point3::new(0.0, 0.0, 0.0),
            b: Point3::new(2.0, 0.0, 0.0),
            c: Point3::new(0.0, 2.0, 0.0),
        }
    }

    #[test]
    fn segment_through_interior_hits() {
        let hit = segment_triangle_intersection(
            &Point3::new(0.5, 0.5, 1.0),
            &Point3::new(0.5, 0.5, -1.0),
            &unit_triangle(),
            1e-8,
        )
        .expect("segment crosses the triangle interior");
        assert_relative_eq!(hit, Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn segment_outside_triangle_misses() {
        let miss = segment_triangle_intersection(
            &Point3::new(3.0, 3.0, 1.0),
            &Point3::new(3.0, 3.0, -1.0),
            &unit_triangle(),
            1e-8,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn parallel_segment_misses() {
        let miss = segment_triangle_intersection(
            &Point3::new(0.2, 0.2, 1.0),
            &Point3::new(0.8, 0.2, 1.0),
            &unit_triangle(),
            1e-8,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn segment_stopping_short_misses() {
        let miss = segment_triangle_intersection(
            &Point3::new(0.5, 0.5, 2.0),
            &Point3::new(0.5, 0.5, 0.5),
            &unit_triangle(),
            1e-8,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let flat = Triangle {
            a: Point3::new(0.0, 0.0, 0.0),
            b: Point3::new(1.0, 1.0, 1.0),
            c: Point3::new(2.0, 2.0, 2.0),
        };
        assert_relative_eq!(flat.double_area(), 0.0, epsilon = 1e-12);
        let miss = segment_triangle_intersection(
            &Point3::new(1.0, 1.0, 2.0),
            &Point3::new(1.0, 1.0, -2.0),
            &flat,
            1e-8,
        );
        assert!(miss.is_none());
    }
}
