//! Unordered k-subsets of a sequence.
//!
//! Feeds the proximity updater: every pair of authors credited on the same
//! paper gets its proximity edge reinforced once.

use std::collections::BTreeSet;

/// All `k`-element subsets of `items`.
///
/// Duplicates in the input collapse and input order does not matter, since
/// each subset is a set. Returns an empty set when there are fewer than `k`
/// distinct items. `k == 0` yields the single empty subset.
pub fn combinations<T: Ord + Clone>(items: &[T], k: usize) -> BTreeSet<BTreeSet<T>> {
    let distinct: Vec<T> = items.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
    let mut out = BTreeSet::new();
    if k > distinct.len() {
        return out;
    }

    let mut current: Vec<usize> = Vec::with_capacity(k);
    collect(&distinct, k, 0, &mut current, &mut out);
    out
}

fn collect<T: Ord + Clone>(
    items: &[T],
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    out: &mut BTreeSet<BTreeSet<T>>,
) {
    if current.len() == k {
        out.insert(current.iter().map(|&i| items[i].clone()).collect());
        return;
    }
    let remaining = k - current.len();
    for i in start..=(items.len() - remaining) {
        current.push(i);
        collect(items, k, i + 1, current, out);
        current.pop();
    }
}

/// All unordered pairs of `items` as `(lo, hi)` tuples with `lo < hi`.
///
/// Equivalent to `combinations(items, 2)`, in a shape that is convenient for
/// keying edges.
pub fn pairs<T: Ord + Clone>(items: &[T]) -> Vec<(T, T)> {
    let distinct: Vec<T> = items.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
    let mut out = Vec::with_capacity(distinct.len() * distinct.len().saturating_sub(1) / 2);
    for (i, lo) in distinct.iter().enumerate() {
        for hi in &distinct[i + 1..] {
            out.push((lo.clone(), hi.clone()));
        }
    }
    out
}
