use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification of a base-pairing interaction.
///
/// The tag is inert metadata: it is carried through main-layer extraction
/// unchanged so that callers can round-trip their annotations, but it never
/// influences loop decomposition or geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairKind {
    /// No classification supplied.
    #[default]
    Unclassified,
    /// Canonical Watson-Crick or wobble pair.
    Canonical,
    /// Any non-canonical interaction.
    NonCanonical,
}

/// Two residues joined by a hydrogen-bonding interaction in the secondary
/// structure.
///
/// Residue indices are 1-based. A pair is identified by its unordered index
/// set, so `(i, j)` and `(j, i)` denote the same pair; use [`BasePair::sorted`]
/// when a canonical `(min, max)` orientation is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePair {
    /// First residue index (1-based).
    pub i: usize,
    /// Second residue index (1-based).
    pub j: usize,
    /// Inert classification tag.
    pub kind: PairKind,
}

impl BasePair {
    /// Creates an unclassified base pair between residues `i` and `j`.
    pub fn new(i: usize, j: usize) -> Self {
        Self {
            i,
            j,
            kind: PairKind::Unclassified,
        }
    }

    /// Creates a base pair carrying a classification tag.
    pub fn with_kind(i: usize, j: usize, kind: PairKind) -> Self {
        Self { i, j, kind }
    }

    /// Returns the pair indices ordered ascending.
    pub fn sorted(&self) -> (usize, usize) {
        (self.i.min(self.j), self.i.max(self.j))
    }
}

impl FromStr for PairKind {
    type Err = ();

    /// Parses a string into a `PairKind`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `()` if the input does not name a known classification.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unclassified" | "unknown" => Ok(PairKind::Unclassified),
            "canonical" => Ok(PairKind::Canonical),
            "noncanonical" | "non-canonical" | "non_canonical" => Ok(PairKind::NonCanonical),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pair_is_unclassified() {
        let bp = BasePair::new(3, 9);
        assert_eq!(bp.i, 3);
        assert_eq!(bp.j, 9);
        assert_eq!(bp.kind, PairKind::Unclassified);
    }

    #[test]
    fn sorted_orders_indices_ascending() {
        assert_eq!(BasePair::new(9, 3).sorted(), (3, 9));
        assert_eq!(BasePair::new(3, 9).sorted(), (3, 9));
    }

    #[test]
    fn unordered_identity_via_sorted() {
        let a = BasePair::new(2, 7);
        let b = BasePair::new(7, 2);
        assert_eq!(a.sorted(), b.sorted());
    }

    #[test]
    fn serde_round_trip() {
        let bp = BasePair::with_kind(3, 9, PairKind::Canonical);
        let json = serde_json::to_string(&bp).unwrap();
        let back: BasePair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bp);
    }

    #[test]
    fn from_str_parses_known_kinds() {
        assert_eq!(PairKind::from_str("canonical"), Ok(PairKind::Canonical));
        assert_eq!(
            PairKind::from_str("non-canonical"),
            Ok(PairKind::NonCanonical)
        );
        assert_eq!(PairKind::from_str("UNKNOWN"), Ok(PairKind::Unclassified));
        assert_eq!(PairKind::from_str("wobble"), Err(()));
    }
}
