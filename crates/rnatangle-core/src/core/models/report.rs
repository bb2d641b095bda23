use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Role of the atom a segment endpoint was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AtomRole {
    /// Single representative atom per residue.
    #[default]
    Single,
    /// Backbone phosphate.
    Phosphate,
    /// C4' sugar atom.
    C4Prime,
}

/// One backbone line segment between two residue atoms.
///
/// Segments are built fresh for each evaluation call and are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment identifier (consecutive-residue index in single-atom mode,
    /// polyline ordinal in alternating-atom mode).
    pub id: usize,
    /// Residue index of the first endpoint (1-based).
    pub res_a: usize,
    /// Residue index of the second endpoint (1-based).
    pub res_b: usize,
    /// Atom role of the first endpoint.
    pub role_a: AtomRole,
    /// Atom role of the second endpoint.
    pub role_b: AtomRole,
    /// First endpoint position.
    pub a: Point3<f64>,
    /// Second endpoint position.
    pub b: Point3<f64>,
}

/// One confirmed puncture: a backbone segment crossing a loop surface inside
/// its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitInfo {
    /// Identifier of the punctured loop.
    pub loop_id: usize,
    /// Identifier of the crossing segment.
    pub segment_id: usize,
    /// Residue at the segment's first endpoint.
    pub res_a: usize,
    /// Residue at the segment's second endpoint.
    pub res_b: usize,
    /// Atom role at the first endpoint.
    pub role_a: AtomRole,
    /// Atom role at the second endpoint.
    pub role_b: AtomRole,
    /// Intersection point in 3-D.
    pub point: Point3<f64>,
}

/// Aggregated outcome of one entanglement evaluation.
///
/// `k` counts distinct `(loop, segment)` punctures; a surface made of many
/// triangles still contributes at most one hit per segment. Evaluating the
/// same inputs twice yields an identical result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntanglementResult {
    /// Number of distinct `(loop, segment)` punctures.
    pub k: usize,
    /// Details of every confirmed puncture.
    pub hits: Vec<HitInfo>,
}

impl EntanglementResult {
    /// Boolean verdict: the backbone threads through at least one loop surface.
    pub fn entangled(&self) -> bool {
        self.k > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_not_entangled() {
        let result = EntanglementResult::default();
        assert_eq!(result.k, 0);
        assert!(!result.entangled());
    }

    #[test]
    fn result_with_hit_is_entangled() {
        let result = EntanglementResult {
            k: 1,
            hits: vec![HitInfo {
                loop_id: 2,
                segment_id: 7,
                res_a: 7,
                res_b: 8,
                role_a: AtomRole::Single,
                role_b: AtomRole::Single,
                point: Point3::origin(),
            }],
        };
        assert!(result.entangled());
    }

    #[test]
    fn serde_round_trip() {
        let result = EntanglementResult {
            k: 1,
            hits: vec![HitInfo {
                loop_id: 1,
                segment_id: 4,
                res_a: 4,
                res_b: 5,
                role_a: AtomRole::Phosphate,
                role_b: AtomRole::C4Prime,
                point: Point3::new(0.5, -1.0, 2.0),
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: EntanglementResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
