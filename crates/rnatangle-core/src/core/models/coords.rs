use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Atom positions for one residue.
///
/// The coordinate set for a structure is a sparse list of these entries:
/// residues may be missing entirely, and a residue may carry fewer atoms than
/// the evaluation options ask for. A residue with no usable atom simply
/// contributes no segment endpoint and no boundary point; it is never an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidueCoord {
    /// Residue index (1-based).
    pub res_index: usize,
    /// Atom positions in Angstroms, indexed by the caller's atom convention
    /// (e.g. slot 0 = phosphate, slot 1 = C4').
    pub atoms: Vec<Point3<f64>>,
}

impl ResidueCoord {
    /// Creates a residue entry with the given atoms.
    pub fn new(res_index: usize, atoms: Vec<Point3<f64>>) -> Self {
        Self { res_index, atoms }
    }

    /// Creates a residue entry with a single representative atom.
    pub fn single(res_index: usize, atom: Point3<f64>) -> Self {
        Self {
            res_index,
            atoms: vec![atom],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stores_one_atom() {
        let rc = ResidueCoord::single(4, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(rc.res_index, 4);
        assert_eq!(rc.atoms.len(), 1);
        assert_eq!(rc.atoms[0], Point3::new(1.0, 2.0, 3.0));
    }
}
