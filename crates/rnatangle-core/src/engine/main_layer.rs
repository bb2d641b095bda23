use crate::core::models::pair::{BasePair, PairKind};
use crate::engine::error::InvalidInput;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Extracts the maximum-cardinality non-crossing subset of a base-pair set.
///
/// The "main layer" of a possibly pseudoknotted pairing: every surviving pair
/// is nested or disjoint with respect to every other. Classification tags are
/// preserved for pairs that survive. The operation is idempotent and fully
/// deterministic: ties in the dynamic program are broken by a fixed traceback
/// preference order.
///
/// # Errors
///
/// Returns [`InvalidInput::SelfPair`] if any pair joins a residue to itself.
pub fn extract_main_layer(base_pairs: &[BasePair]) -> Result<Vec<BasePair>, InvalidInput> {
    if base_pairs.is_empty() {
        return Ok(Vec::new());
    }

    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(base_pairs.len());
    let mut kind_map: HashMap<(usize, usize), PairKind> = HashMap::with_capacity(base_pairs.len());
    for bp in base_pairs {
        if bp.i == bp.j {
            return Err(InvalidInput::SelfPair { index: bp.i });
        }
        let key = bp.sorted();
        pairs.push(key);
        kind_map.entry(key).or_insert(bp.kind);
    }

    let layer = extract_layer_pairs(&pairs);
    debug!(
        input = base_pairs.len(),
        kept = layer.len(),
        "Main layer extracted."
    );

    Ok(layer
        .into_iter()
        .map(|key| {
            let kind = kind_map.get(&key).copied().unwrap_or_default();
            BasePair::with_kind(key.0, key.1, kind)
        })
        .collect())
}

/// Interval DP over the compressed index range with iterative traceback.
fn extract_layer_pairs(pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
    // Compress the residues actually referenced into a dense range [0, L).
    let inv_hash: Vec<usize> = pairs
        .iter()
        .flat_map(|&(i, j)| [i, j])
        .sorted_unstable()
        .dedup()
        .collect();
    let index_of: HashMap<usize, usize> = inv_hash
        .iter()
        .enumerate()
        .map(|(idx, &res)| (res, idx))
        .collect();
    let l = inv_hash.len();

    let pair_set: HashSet<(usize, usize)> = pairs
        .iter()
        .map(|&(i, j)| {
            let a = index_of[&i];
            let b = index_of[&j];
            (a.min(b), a.max(b))
        })
        .collect();

    // gamma[i][j]: best achievable pair count on the compressed interval [i, j].
    let mut gamma = vec![vec![0usize; l]; l];
    let at = |gamma: &Vec<Vec<usize>>, i: usize, j: usize| -> usize {
        if i >= l || j >= l || i > j { 0 } else { gamma[i][j] }
    };

    for d in 1..l {
        for i in 0..(l - d) {
            let j = i + d;
            let mut best = at(&gamma, i + 1, j).max(at(&gamma, i, j - 1));
            let diag = at(&gamma, i + 1, j - 1);
            if pair_set.contains(&(i, j)) {
                best = best.max(diag + 1);
            } else {
                best = best.max(diag);
            }
            for k in i..j {
                best = best.max(at(&gamma, i, k) + at(&gamma, k + 1, j));
            }
            gamma[i][j] = best;
        }
    }

    // Iterative traceback with an explicit frame stack; preference order is
    // shrink-right, shrink-left, take (i, j), then the best split point.
    let mut layer = Vec::new();
    let mut occupied = vec![false; l];
    let mut stack = vec![(0usize, l - 1)];

    while let Some((i, j)) = stack.pop() {
        if i >= j {
            continue;
        }
        if at(&gamma, i + 1, j) == gamma[i][j] {
            stack.push((i + 1, j));
            continue;
        }
        if at(&gamma, i, j - 1) == gamma[i][j] {
            stack.push((i, j - 1));
            continue;
        }
        if pair_set.contains(&(i, j))
            && at(&gamma, i + 1, j - 1) + 1 == gamma[i][j]
            && !occupied[i]
            && !occupied[j]
        {
            occupied[i] = true;
            occupied[j] = true;
            layer.push((i, j));
            stack.push((i + 1, j - 1));
            continue;
        }
        for k in i..j {
            if at(&gamma, i, k) + at(&gamma, k + 1, j) == gamma[i][j] {
                stack.push((k + 1, j));
                stack.push((i, k));
                break;
            }
        }
    }

    layer
        .into_iter()
        .map(|(i, j)| (inv_hash[i], inv_hash[j]))
        .collect()
}
