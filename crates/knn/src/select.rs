//! Top-k nearest neighbor selection.

use std::cmp::Ordering;

/// Orders by distance, then by original row index.
#[inline]
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Selects the `k_eff` nearest rows from per-row distances.
///
/// Ties are broken by original row order, so the result is the same as a
/// stable sort by distance truncated to `k_eff`. Uses a partial selection
/// (`select_nth_unstable_by`) followed by a sort of the kept prefix.
///
/// Writes results into caller-provided buffers:
/// - `pairs`: scratch buffer for (distance, index) pairs
/// - `nn_indices`: indices of the k nearest rows, ascending by distance
/// - `nn_dists`: distances of the k nearest rows, ascending
///
/// # Panics
///
/// Debug-asserts that `k_eff >= 1` and `k_eff <= dists.len()`.
pub(crate) fn select_k_nearest(
    dists: &[f64],
    k_eff: usize,
    pairs: &mut Vec<(f64, usize)>,
    nn_indices: &mut Vec<usize>,
    nn_dists: &mut Vec<f64>,
) {
    debug_assert!(k_eff >= 1);
    debug_assert!(k_eff <= dists.len());

    pairs.clear();
    pairs.extend(dists.iter().copied().enumerate().map(|(i, d)| (d, i)));

    if k_eff < pairs.len() {
        pairs.select_nth_unstable_by(k_eff - 1, by_distance_then_index);
        pairs.truncate(k_eff);
    }
    pairs.sort_unstable_by(by_distance_then_index);

    nn_indices.clear();
    nn_dists.clear();
    for &(d, idx) in pairs.iter() {
        nn_indices.push(idx);
        nn_dists.push(d);
    }
}
