use thiserror::Error;

/// The only hard failure of the pipeline: a malformed base-pair set or residue
/// count.
///
/// Raised synchronously and meant to be fixed by the caller before retrying.
/// Geometric irregularities (missing atoms, degenerate boundaries, failed
/// triangulations) are never errors; they degrade to loops that contribute
/// nothing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("base pair ({i}, {j}) is out of range for {n_res} residues")]
    PairOutOfRange { i: usize, j: usize, n_res: usize },

    #[error("residue {index} cannot be paired with itself")]
    SelfPair { index: usize },

    #[error("residue {index} is paired more than once")]
    PairedTwice { index: usize },

    #[error("residue count must be positive")]
    NonPositiveResidueCount,
}
