//! Post-operation invariant checkers for correctness validation.
//!
//! These use only the public API of `algokit-core`, so they can be run
//! against any forest or table a benchmark produced.

use algokit_core::{Bst, UnionFind};

/// Verifies a forest against a brute-force relabelling of the same unions.
///
/// `uf` must have had exactly `pairs` applied to a fresh universe of
/// `uf.len()` elements.
pub fn check_union_find_partition(
    uf: &mut UnionFind,
    pairs: &[(usize, usize)],
) -> Result<(), String> {
    let n = uf.len();
    let mut label: Vec<usize> = (0..n).collect();
    for &(p, q) in pairs {
        if p >= n || q >= n {
            return Err(format!("pair ({p}, {q}) outside universe of {n}"));
        }
        let (from, to) = (label[q], label[p]);
        if from != to {
            for l in &mut label {
                if *l == from {
                    *l = to;
                }
            }
        }
    }

    let mut distinct = label.clone();
    distinct.sort_unstable();
    distinct.dedup();
    if uf.count() != distinct.len() {
        return Err(format!(
            "count mismatch: forest={}, reference={}",
            uf.count(),
            distinct.len()
        ));
    }

    let components = uf.components();
    if components.len() != uf.count() {
        return Err(format!(
            "components() returned {} sets but count() is {}",
            components.len(),
            uf.count()
        ));
    }
    for set in &components {
        let Some(&first) = set.first() else {
            return Err("components() returned an empty set".to_owned());
        };
        if let Some(&stray) = set.iter().find(|&&x| label[x] != label[first]) {
            return Err(format!(
                "{stray} grouped with {first} but the reference separates them"
            ));
        }
    }
    Ok(())
}

/// Verifies the order-statistics invariants of a table:
/// - keys are strictly ascending and their number equals `len()`
/// - `select(i)` is the i-th key and `rank(select(i)) == i`
/// - `size_of_range(min, max) == len()`
pub fn check_order_statistics<K: Ord + std::fmt::Debug, V>(table: &Bst<K, V>) -> Result<(), String> {
    let keys = table.keys();
    if keys.len() != table.len() {
        return Err(format!(
            "len() is {} but keys() yields {}",
            table.len(),
            keys.len()
        ));
    }
    if let Some(w) = keys.windows(2).find(|w| w[0] >= w[1]) {
        return Err(format!("keys out of order: {:?} before {:?}", w[0], w[1]));
    }
    for (i, key) in keys.iter().enumerate() {
        let selected = table
            .select(i)
            .map_err(|e| format!("select({i}) failed: {e}"))?;
        if selected != *key {
            return Err(format!("select({i}) = {selected:?}, expected {key:?}"));
        }
        let rank = table.rank(key);
        if rank != i {
            return Err(format!("rank({key:?}) = {rank}, expected {i}"));
        }
    }
    if let (Some(lo), Some(hi)) = (keys.first(), keys.last()) {
        let span = table.size_of_range(lo, hi);
        if span != table.len() {
            return Err(format!(
                "size_of_range(min, max) = {span}, expected {}",
                table.len()
            ));
        }
    }
    Ok(())
}

/// Verifies that a tree's height lies between the balanced lower bound
/// `floor(log2(len))` and the degenerate upper bound `len - 1`.
pub fn check_height_bounds<K: Ord, V>(table: &Bst<K, V>) -> Result<(), String> {
    let len = table.len();
    match table.height() {
        None if len == 0 => Ok(()),
        None => Err(format!("height() is None for a table of {len} keys")),
        Some(h) if len == 0 => Err(format!("height() is {h} for an empty table")),
        Some(h) => {
            let lower = usize::try_from(len.ilog2()).unwrap_or(usize::MAX);
            if h < lower || h >= len {
                Err(format!("height {h} outside [{lower}, {}]", len - 1))
            } else {
                Ok(())
            }
        }
    }
}
