use super::pair::BasePair;
use serde::{Deserialize, Serialize};

/// The kind of closed secondary-structure element bounded by a closing pair.
///
/// Classification follows the number of immediate child pairs found inside the
/// outer pair: zero children make a hairpin, one makes an internal loop
/// (bulges and stacks are degenerate sub-cases), two or more make a multi-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LoopKind {
    /// Loop closed by a single pair with no paired residues inside.
    Hairpin,
    /// Loop between an outer pair and exactly one immediate child pair.
    Internal,
    /// Loop with two or more immediate child pairs.
    Multi,
    /// Unclassifiable element (inconsistent pairing inside the interval).
    #[default]
    Unknown,
}

/// A closed structural element produced by loop decomposition.
///
/// `closing_pairs` always begins with the outer pair, followed by each
/// immediate child pair in ascending order of their first residue.
/// `boundary_residues` holds the unpaired residues on the loop boundary.
/// Loops are immutable once built and owned exclusively by the pipeline run
/// that created them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    /// Identifier, assigned from 1 in ascending order of the outer pair's
    /// first residue.
    pub id: usize,
    /// Loop classification.
    pub kind: LoopKind,
    /// Outer pair followed by immediate child pairs in scan order.
    pub closing_pairs: Vec<BasePair>,
    /// Unpaired residues on the loop boundary (1-based, ascending).
    pub boundary_residues: Vec<usize>,
}

impl Loop {
    /// Returns the outer closing pair, if the loop has one.
    pub fn outer_pair(&self) -> Option<&BasePair> {
        self.closing_pairs.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_pair_is_first_closing_pair() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Internal,
            closing_pairs: vec![BasePair::new(1, 10), BasePair::new(3, 8)],
            boundary_residues: vec![2, 9],
        };
        assert_eq!(lp.outer_pair().unwrap().sorted(), (1, 10));
    }

    #[test]
    fn default_kind_is_unknown() {
        assert_eq!(LoopKind::default(), LoopKind::Unknown);
    }
}
