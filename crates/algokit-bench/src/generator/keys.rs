//! Key order strategies for tree-building workloads.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::KeyOrder;

/// Returns the keys `0..n` arranged according to `order`.
pub fn build_keys(n: usize, order: KeyOrder, rng: &mut StdRng) -> Vec<i64> {
    let upper = i64::try_from(n).unwrap_or(i64::MAX);
    let mut keys: Vec<i64> = (0..upper).collect();
    match order {
        KeyOrder::Shuffled => keys.shuffle(rng),
        KeyOrder::Ascending => {}
        KeyOrder::ZigZag => keys = zig_zag(&keys),
    }
    keys
}

/// Interleaves the ascending input from both ends: `0, n-1, 1, n-2, ...`.
fn zig_zag(sorted: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(sorted.len());
    let (mut lo, mut hi) = (0usize, sorted.len());
    while lo < hi {
        out.push(sorted[lo]);
        lo += 1;
        if lo < hi {
            hi -= 1;
            out.push(sorted[hi]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut keys = build_keys(50, KeyOrder::Shuffled, &mut rng);
        keys.sort_unstable();
        assert_eq!(keys, (0..50).collect::<Vec<i64>>());
    }

    #[test]
    fn zig_zag_alternates_ends() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            build_keys(5, KeyOrder::ZigZag, &mut rng),
            vec![0, 4, 1, 3, 2]
        );
        assert_eq!(
            build_keys(4, KeyOrder::ZigZag, &mut rng),
            vec![0, 3, 1, 2]
        );
    }
}
