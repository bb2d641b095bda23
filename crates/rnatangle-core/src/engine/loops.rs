use crate::core::models::loops::{Loop, LoopKind};
use crate::core::models::pair::BasePair;
use crate::engine::config::LoopBuildOptions;
use crate::engine::error::InvalidInput;
use crate::engine::main_layer::extract_main_layer;
use tracing::debug;

/// Residue-to-partner mapping derived from a base-pair set.
///
/// Index 0 is unused; a partner of 0 means unpaired. Construction validates
/// that the map is symmetric and injective, with no self-pairs and no
/// out-of-range indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMap {
    partner: Vec<usize>,
}

impl PairMap {
    /// Builds and validates the pair map for `n_res` residues.
    ///
    /// # Errors
    ///
    /// Any violation of the base-pair invariants returns the matching
    /// [`InvalidInput`] variant.
    pub fn from_pairs(base_pairs: &[BasePair], n_res: usize) -> Result<Self, InvalidInput> {
        if n_res == 0 {
            return Err(InvalidInput::NonPositiveResidueCount);
        }
        let mut partner = vec![0usize; n_res + 1];
        for bp in base_pairs {
            if bp.i == 0 || bp.j == 0 || bp.i > n_res || bp.j > n_res {
                return Err(InvalidInput::PairOutOfRange {
                    i: bp.i,
                    j: bp.j,
                    n_res,
                });
            }
            if bp.i == bp.j {
                return Err(InvalidInput::SelfPair { index: bp.i });
            }
            let (i, j) = bp.sorted();
            if partner[i] != 0 {
                return Err(InvalidInput::PairedTwice { index: i });
            }
            if partner[j] != 0 {
                return Err(InvalidInput::PairedTwice { index: j });
            }
            partner[i] = j;
            partner[j] = i;
        }
        Ok(Self { partner })
    }

    /// Number of residues covered by the map.
    pub fn n_res(&self) -> usize {
        self.partner.len() - 1
    }

    /// Partner of residue `idx`, or 0 if unpaired.
    pub fn partner(&self, idx: usize) -> usize {
        self.partner[idx]
    }

    /// Whether residue `idx` is paired.
    pub fn is_paired(&self, idx: usize) -> bool {
        self.partner[idx] != 0
    }

    /// Unpaired residues in the inclusive range `[start, end]`.
    fn collect_unpaired(&self, start: usize, end: usize) -> Vec<usize> {
        if start > end {
            return Vec::new();
        }
        (start..=end.min(self.n_res()))
            .filter(|&k| !self.is_paired(k))
            .collect()
    }

    /// Immediate child pairs inside the open interval `(i, j)`.
    ///
    /// A child pair is a paired region encountered at nesting depth zero when
    /// scanning the interval; pairs nested inside a child are not reported.
    fn find_child_pairs(&self, i: usize, j: usize) -> Vec<BasePair> {
        let mut children = Vec::new();
        let mut depth = 0usize;
        for idx in (i + 1)..j {
            if !self.is_paired(idx) {
                continue;
            }
            let partner = self.partner(idx);
            if idx < partner {
                if depth == 0 {
                    children.push(BasePair::new(idx, partner));
                }
                depth += 1;
            } else if idx > partner {
                depth = depth.saturating_sub(1);
            }
        }
        children
    }

    /// Classifies the loop closed by `(i, j)` and collects its boundary and
    /// closing pairs. Zero children make a hairpin, one an internal loop,
    /// two or more a multi-loop.
    fn classify_loop(&self, i: usize, j: usize) -> (LoopKind, Vec<usize>, Vec<BasePair>) {
        let mut closing_pairs = vec![BasePair::new(i, j)];
        let children = self.find_child_pairs(i, j);
        closing_pairs.extend(children.iter().copied());

        match children.len() {
            0 => {
                let boundary = self.collect_unpaired(i + 1, j.saturating_sub(1));
                (LoopKind::Hairpin, boundary, closing_pairs)
            }
            1 => {
                let (k, l) = children[0].sorted();
                let mut boundary = self.collect_unpaired(i + 1, k - 1);
                boundary.extend(self.collect_unpaired(l + 1, j - 1));
                (LoopKind::Internal, boundary, closing_pairs)
            }
            _ => {
                let boundary = self.collect_unpaired(i + 1, j - 1);
                (LoopKind::Multi, boundary, closing_pairs)
            }
        }
    }
}

/// Decomposes a nested base-pair set into classified closed elements.
///
/// Loops are emitted in ascending order of their outer pair's first residue,
/// with ids assigned from 1. With `main_layer_only`, a maximum non-crossing
/// subset is extracted first, making the call safe for pseudoknotted input.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a non-positive residue count, out-of-range
/// indices, self-pairs, or a residue paired twice.
pub fn build_loops(
    base_pairs: &[BasePair],
    n_res: usize,
    options: &LoopBuildOptions,
) -> Result<Vec<Loop>, InvalidInput> {
    if n_res == 0 {
        return Err(InvalidInput::NonPositiveResidueCount);
    }
    let filtered;
    let effective: &[BasePair] = if options.main_layer_only {
        filtered = extract_main_layer(base_pairs)?;
        &filtered
    } else {
        base_pairs
    };
    let pair_map = PairMap::from_pairs(effective, n_res)?;

    let mut loops = Vec::new();
    let mut loop_id = 1;
    for i in 1..=n_res {
        let j = pair_map.partner(i);
        if j == 0 || i > j {
            continue;
        }
        let (kind, boundary, closing_pairs) = pair_map.classify_loop(i, j);
        if kind == LoopKind::Multi && !options.include_multi {
            continue;
        }
        loops.push(Loop {
            id: loop_id,
            kind,
            closing_pairs,
            boundary_residues: boundary,
        });
        loop_id += 1;
    }
    debug!(count = loops.len(), n_res, "Loops built.");
    Ok(loops)
}

/// Collects the closing pairs of every multi-loop in the structure.
///
/// Exposed for external visualization tooling that highlights multi-loop
/// junction pairs.
///
/// # Errors
///
/// Same validation as [`build_loops`].
pub fn collect_multi_loop_pairs(
    base_pairs: &[BasePair],
    n_res: usize,
    options: &LoopBuildOptions,
) -> Result<Vec<BasePair>, InvalidInput> {
    let options = LoopBuildOptions {
        include_multi: true,
        ..*options
    };
    let loops = build_loops(base_pairs, n_res, &options)?;
    Ok(loops
        .into_iter()
        .filter(|lp| lp.kind == LoopKind::Multi)
        .flat_map(|lp| lp.closing_pairs)
        .collect())
}

/// Residues structurally belonging to a loop, used to suppress spurious
/// self-punctures where the backbone attaches to its own loop.
///
/// Hairpin: the inclusive closing-pair span. Internal: both strand spans
/// between the outer and child pair. Multi: every closing-pair endpoint plus
/// the inclusive span over all closing pairs.
pub(crate) fn build_skip_residues(lp: &Loop) -> Vec<usize> {
    let Some(outer) = lp.outer_pair() else {
        return Vec::new();
    };
    match lp.kind {
        LoopKind::Hairpin => {
            let (i, j) = outer.sorted();
            (i..=j).collect()
        }
        LoopKind::Internal => {
            let (i, j) = outer.sorted();
            if lp.closing_pairs.len() < 2 {
                return (i..=j).collect();
            }
            let (k, l) = lp.closing_pairs[1].sorted();
            let mut skip: Vec<usize> = (i..=k).collect();
            skip.extend(l..=j);
            skip
        }
        LoopKind::Multi => {
            let mut min_res = usize::MAX;
            let mut max_res = 0usize;
            let mut skip = Vec::new();
            for pair in &lp.closing_pairs {
                let (i, j) = pair.sorted();
                min_res = min_res.min(i);
                max_res = max_res.max(j);
                skip.push(i);
                skip.push(j);
            }
            if min_res <= max_res {
                skip.extend(min_res..=max_res);
            }
            skip.sort_unstable();
            skip.dedup();
            skip
        }
        LoopKind::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn pairs(list: &[(usize, usize)]) -> Vec<BasePair> {
        list.iter().map(|&(i, j)| BasePair::new(i, j)).collect()
    }

    #[test]
    fn pair_map_is_symmetric() {
        let map = PairMap::from_pairs(&pairs(&[(2, 9), (3, 8)]), 10).unwrap();
        for idx in 1..=10 {
            if map.is_paired(idx) {
                assert_eq!(map.partner(map.partner(idx)), idx);
            }
        }
        assert_eq!(map.partner(2), 9);
        assert_eq!(map.partner(5), 0);
    }

    #[test]
    fn zero_residue_count_is_invalid() {
        let err = build_loops(&pairs(&[(1, 2)]), 0, &LoopBuildOptions::default()).unwrap_err();
        assert_eq!(err, InvalidInput::NonPositiveResidueCount);
    }

    #[test]
    fn self_pair_is_invalid() {
        let err = build_loops(&pairs(&[(5, 5)]), 10, &LoopBuildOptions::default()).unwrap_err();
        assert_eq!(err, InvalidInput::SelfPair { index: 5 });
    }

    #[test]
    fn residue_paired_twice_is_invalid() {
        let err =
            build_loops(&pairs(&[(1, 2), (1, 3)]), 10, &LoopBuildOptions::default()).unwrap_err();
        assert_eq!(err, InvalidInput::PairedTwice { index: 1 });
    }

    #[test]
    fn out_of_range_pair_is_invalid() {
        let err = build_loops(&pairs(&[(1, 11)]), 10, &LoopBuildOptions::default()).unwrap_err();
        assert!(matches!(err, InvalidInput::PairOutOfRange { .. }));
    }

    #[test]
    fn lone_pair_is_a_hairpin() {
        let loops = build_loops(&pairs(&[(1, 10)]), 10, &LoopBuildOptions::default()).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].id, 1);
        assert_eq!(loops[0].kind, LoopKind::Hairpin);
        assert_eq!(loops[0].closing_pairs, pairs(&[(1, 10)]));
        assert_eq!(loops[0].boundary_residues, (2..=9).collect::<Vec<_>>());
    }

    #[test]
    fn one_child_makes_an_internal_loop() {
        let loops = build_loops(&pairs(&[(1, 10), (3, 8)]), 10, &LoopBuildOptions::default())
            .unwrap();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].kind, LoopKind::Internal);
        assert_eq!(loops[0].closing_pairs, pairs(&[(1, 10), (3, 8)]));
        assert_eq!(loops[0].boundary_residues, vec![2, 9]);
        assert_eq!(loops[1].kind, LoopKind::Hairpin);
        assert_eq!(loops[1].boundary_residues, vec![4, 5, 6, 7]);
    }

    #[test]
    fn stacked_pairs_are_degenerate_internal_loops() {
        let loops = build_loops(&pairs(&[(1, 10), (2, 9)]), 10, &LoopBuildOptions::default())
            .unwrap();
        assert_eq!(loops[0].kind, LoopKind::Internal);
        assert!(loops[0].boundary_residues.is_empty());
    }

    #[test]
    fn two_children_make_a_multi_loop() {
        let loops = build_loops(
            &pairs(&[(1, 20), (3, 8), (10, 15)]),
            20,
            &LoopBuildOptions::default(),
        )
        .unwrap();
        assert_eq!(loops.len(), 3);
        assert_eq!(loops[0].kind, LoopKind::Multi);
        assert_eq!(loops[0].closing_pairs, pairs(&[(1, 20), (3, 8), (10, 15)]));
        // Every unpaired residue in the open span, including those under the
        // child pairs.
        assert_eq!(
            loops[0].boundary_residues,
            vec![2, 4, 5, 6, 7, 9, 11, 12, 13, 14, 16, 17, 18, 19]
        );
        assert_eq!(loops[1].closing_pairs[0].sorted(), (3, 8));
        assert_eq!(loops[2].closing_pairs[0].sorted(), (10, 15));
    }

    #[test]
    fn nested_pairs_are_not_children_of_the_grandparent() {
        let loops = build_loops(
            &pairs(&[(1, 20), (3, 12), (5, 10), (14, 18)]),
            20,
            &LoopBuildOptions::default(),
        )
        .unwrap();
        // (5, 10) nests inside (3, 12) and must not appear among the outer
        // loop's closing pairs.
        assert_eq!(loops[0].kind, LoopKind::Multi);
        assert_eq!(loops[0].closing_pairs, pairs(&[(1, 20), (3, 12), (14, 18)]));
    }

    #[test]
    fn multi_loops_can_be_excluded() {
        let options = LoopBuildOptions {
            include_multi: false,
            ..LoopBuildOptions::default()
        };
        let loops = build_loops(&pairs(&[(1, 20), (3, 8), (10, 15)]), 20, &options).unwrap();
        assert_eq!(loops.len(), 2);
        assert!(loops.iter().all(|lp| lp.kind == LoopKind::Hairpin));
        assert_eq!(loops[0].id, 1);
        assert_eq!(loops[1].id, 2);
    }

    #[test]
    fn main_layer_only_handles_pseudoknots() {
        let options = LoopBuildOptions {
            main_layer_only: true,
            ..LoopBuildOptions::default()
        };
        let loops = build_loops(&pairs(&[(1, 10), (2, 9), (5, 12)]), 12, &options).unwrap();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].closing_pairs[0].sorted(), (1, 10));
    }

    #[test]
    fn closing_pairs_round_trip_the_input() {
        let input = pairs(&[(1, 20), (3, 8), (10, 15), (4, 7), (11, 14)]);
        let loops = build_loops(&input, 20, &LoopBuildOptions::default()).unwrap();
        let recovered: Vec<(usize, usize)> = loops
            .iter()
            .flat_map(|lp| lp.closing_pairs.iter().map(|bp| bp.sorted()))
            .sorted()
            .dedup()
            .collect();
        let expected: Vec<(usize, usize)> =
            input.iter().map(|bp| bp.sorted()).sorted().collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn collect_multi_loop_pairs_reports_junctions() {
        let junctions = collect_multi_loop_pairs(
            &pairs(&[(1, 20), (3, 8), (10, 15)]),
            20,
            &LoopBuildOptions::default(),
        )
        .unwrap();
        assert_eq!(junctions, pairs(&[(1, 20), (3, 8), (10, 15)]));
    }

    #[test]
    fn hairpin_skip_covers_the_whole_span() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Hairpin,
            closing_pairs: pairs(&[(3, 9)]),
            boundary_residues: (4..=8).collect(),
        };
        assert_eq!(build_skip_residues(&lp), (3..=9).collect::<Vec<_>>());
    }

    #[test]
    fn internal_skip_covers_both_strands() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Internal,
            closing_pairs: pairs(&[(1, 10), (4, 7)]),
            boundary_residues: vec![2, 3, 8, 9],
        };
        assert_eq!(build_skip_residues(&lp), vec![1, 2, 3, 4, 7, 8, 9, 10]);
    }

    #[test]
    fn multi_skip_covers_the_junction_span() {
        let lp = Loop {
            id: 1,
            kind: LoopKind::Multi,
            closing_pairs: pairs(&[(5, 20), (8, 12), (14, 17)]),
            boundary_residues: vec![6, 7, 13, 18, 19],
        };
        assert_eq!(build_skip_residues(&lp), (5..=20).collect::<Vec<_>>());
    }
}
