use super::loops::LoopKind;
use super::pair::BasePair;
use crate::core::geometry::plane::Plane;
use crate::core::geometry::polygon::Polygon2D;
use crate::core::geometry::triangle::Triangle;
use serde::{Deserialize, Serialize};

/// Geometric approximation of one loop, used for puncture testing.
///
/// A surface is represented either by a best-fit plane plus a 2-D polygon in
/// the plane's basis, or by a list of triangles (in which case the polygon is
/// kept only for bookkeeping). A surface is usable for evaluation only if its
/// geometric fields are valid, see [`Surface::is_testable`]; invalid surfaces
/// are excluded from evaluation, never treated as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Identifier of the loop this surface approximates.
    pub loop_id: usize,
    /// Kind of the originating loop.
    pub kind: LoopKind,
    /// Closing pairs of the originating loop (outer pair first).
    pub closing_pairs: Vec<BasePair>,
    /// Best-fit plane through the boundary points.
    pub plane: Plane,
    /// Boundary polygon in the plane's 2-D basis.
    pub polygon: Polygon2D,
    /// Triangle decomposition of the boundary (empty in best-fit-plane mode).
    pub triangles: Vec<Triangle>,
    /// Residues structurally belonging to the loop; backbone segments touching
    /// them are never tested against this surface.
    pub skip_residues: Vec<usize>,
}

impl Surface {
    /// Whether the surface can participate in evaluation: it needs either a
    /// nonempty triangle list or a valid plane and polygon.
    pub fn is_testable(&self) -> bool {
        !self.triangles.is_empty() || (self.plane.valid && self.polygon.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_without_geometry_is_not_testable() {
        let surface = Surface {
            loop_id: 1,
            kind: LoopKind::Hairpin,
            closing_pairs: vec![BasePair::new(1, 10)],
            plane: Plane::default(),
            polygon: Polygon2D::default(),
            triangles: Vec::new(),
            skip_residues: (1..=10).collect(),
        };
        assert!(!surface.is_testable());
    }
}
