//! Union-Find (disjoint set) forest over a fixed universe of `n` elements.
//!
//! Path compression uses iterative path-halving: during [`UnionFind::find`] each
//! visited node is pointed directly at its grandparent, halving the path length
//! without needing a second pass or recursion. Union-by-rank keeps trees shallow.
//! Together they give the amortized inverse-Ackermann bound; dropping either
//! one loses it.
//!
//! When two roots of equal rank are merged, the root of the **second**
//! argument is attached under the root of the first, and the first root's rank
//! is incremented.

use log::{debug, trace};

/// Errors returned by [`UnionFind`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnionFindError {
    /// A negative universe size was supplied at construction.
    #[error("invalid argument: universe size cannot be negative, got {n}")]
    InvalidArgument {
        /// The rejected size.
        n: i64,
    },
    /// An element index fell outside `[0, len)`.
    #[error("index {index} is out of range for a universe of {len} elements")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The universe size.
        len: usize,
    },
    /// The forest for the requested universe could not be allocated.
    #[error("a universe of {n} elements is too large to allocate")]
    CapacityExceeded {
        /// The requested size.
        n: u64,
    },
}

/// A union-find (disjoint set) structure with path-halving and union-by-rank.
///
/// Each element is identified by a `usize` ordinal in `[0, n)` where `n` is
/// the number of elements supplied at construction time. The universe never
/// grows or shrinks.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    count: usize,
}

impl UnionFind {
    /// Creates a new `UnionFind` with `n` singleton sets.
    ///
    /// Each element `i` is initially its own representative (`parent[i] == i`,
    /// `rank[i] == 0`), and [`UnionFind::count`] is `n`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0u8; n],
            count: n,
        }
    }

    /// Like [`UnionFind::new`], but reports an allocation failure instead of
    /// aborting.
    ///
    /// # Errors
    ///
    /// Returns [`UnionFindError::CapacityExceeded`] if the parent and rank
    /// arrays for `n` elements cannot be reserved.
    pub fn try_new(n: usize) -> Result<Self, UnionFindError> {
        let mut parent = Vec::new();
        let mut rank = Vec::new();
        parent
            .try_reserve_exact(n)
            .and_then(|()| rank.try_reserve_exact(n))
            .map_err(|_| UnionFindError::CapacityExceeded { n: n as u64 })?;
        parent.extend(0..n);
        rank.resize(n, 0u8);
        Ok(Self {
            parent,
            rank,
            count: n,
        })
    }

    /// Returns the representative of the set containing `p`.
    ///
    /// Uses iterative path-halving: each node visited during the traversal is
    /// linked directly to its grandparent. This mutates the forest but never
    /// the partition it describes.
    ///
    /// # Errors
    ///
    /// Returns [`UnionFindError::IndexOutOfRange`] if `p >= self.len()`.
    pub fn find(&mut self, p: usize) -> Result<usize, UnionFindError> {
        self.validate(p)?;
        let root = self.root_of(p);
        trace!("find({p}) -> {root}");
        Ok(root)
    }

    /// Merges the set containing `p` with the set containing `q`.
    ///
    /// Returns `Ok(true)` if two distinct sets were merged and `Ok(false)` if
    /// `p` and `q` were already connected, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`UnionFindError::IndexOutOfRange`] if either index is outside
    /// the universe. Validation happens before any mutation.
    pub fn union(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        self.validate(q)?;
        let rp = self.find(p)?;
        let rq = self.find(q)?;

        if rp == rq {
            return Ok(false);
        }

        match self.rank[rp].cmp(&self.rank[rq]) {
            std::cmp::Ordering::Less => {
                self.parent[rp] = rq;
            }
            std::cmp::Ordering::Greater => {
                self.parent[rq] = rp;
            }
            std::cmp::Ordering::Equal => {
                self.parent[rq] = rp;
                self.rank[rp] += 1;
            }
        }
        self.count -= 1;
        debug!(
            "union({p}, {q}): merged roots {rp} and {rq}, {} sets remain",
            self.count
        );
        Ok(true)
    }

    /// Returns `true` if `p` and `q` belong to the same set.
    ///
    /// # Errors
    ///
    /// Returns [`UnionFindError::IndexOutOfRange`] if either index is outside
    /// the universe.
    pub fn connected(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        self.validate(q)?;
        Ok(self.find(p)? == self.find(q)?)
    }

    /// Returns the number of disjoint sets.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the number of elements in this `UnionFind`.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if this `UnionFind` contains no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns every set as an ascending list of its members.
    ///
    /// Sets are ordered by their smallest member, so the output is independent
    /// of which element happens to be the root. Compresses every path as a
    /// side effect.
    pub fn components(&mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root = vec![usize::MAX; self.len()];
        let mut sets: Vec<Vec<usize>> = Vec::with_capacity(self.count);
        for x in 0..self.len() {
            let root = self.root_of(x);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = sets.len();
                sets.push(Vec::new());
            }
            sets[slot_of_root[root]].push(x);
        }
        sets
    }

    /// Path-halving walk for an index already known to be in range.
    fn root_of(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    fn validate(&self, index: usize) -> Result<(), UnionFindError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(UnionFindError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl TryFrom<i64> for UnionFind {
    type Error = UnionFindError;

    /// Builds a forest from a signed size, rejecting negative values and
    /// sizes that cannot be allocated.
    fn try_from(n: i64) -> Result<Self, Self::Error> {
        if n < 0 {
            return Err(UnionFindError::InvalidArgument { n });
        }
        let len = usize::try_from(n).map_err(|_| UnionFindError::CapacityExceeded {
            n: n.unsigned_abs(),
        })?;
        Self::try_new(len)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn new_creates_singletons() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.count(), 5);
        for i in 0..5 {
            assert_eq!(
                uf.find(i).expect("in range"),
                i,
                "element {i} should be its own representative"
            );
        }
    }

    #[test]
    fn new_sets_rank_zero() {
        let uf = UnionFind::new(3);
        assert!(uf.rank.iter().all(|&r| r == 0));
        assert_eq!(uf.parent, vec![0, 1, 2]);
    }

    #[test]
    fn try_from_negative_is_invalid_argument() {
        let err = UnionFind::try_from(-1).expect_err("negative size must fail");
        assert_eq!(err, UnionFindError::InvalidArgument { n: -1 });
    }

    #[test]
    fn try_from_non_negative_matches_new() {
        let uf = UnionFind::try_from(4).expect("non-negative size");
        assert_eq!(uf.len(), 4);
        assert_eq!(uf.count(), 4);
    }

    #[test]
    fn try_from_unallocatable_size_is_capacity_exceeded() {
        let err = UnionFind::try_from(i64::MAX).expect_err("cannot allocate");
        assert_eq!(
            err,
            UnionFindError::CapacityExceeded {
                n: i64::MAX.unsigned_abs()
            }
        );
        let err = UnionFind::try_from(1_i64 << 62).expect_err("cannot allocate");
        assert!(matches!(err, UnionFindError::CapacityExceeded { .. }));
    }

    #[test]
    fn try_new_matches_new() {
        let uf = UnionFind::try_new(6).expect("small forest");
        assert_eq!(uf.parent, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(uf.rank, vec![0; 6]);
        assert_eq!(uf.count(), 6);
        assert!(matches!(
            UnionFind::try_new(usize::MAX),
            Err(UnionFindError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn find_out_of_range() {
        let mut uf = UnionFind::new(3);
        assert_eq!(
            uf.find(3),
            Err(UnionFindError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn union_out_of_range_does_not_mutate() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 7).is_err());
        assert!(uf.union(7, 0).is_err());
        assert_eq!(uf.count(), 3);
        assert_eq!(uf.parent, vec![0, 1, 2]);
    }

    #[test]
    fn connected_out_of_range() {
        let mut uf = UnionFind::new(2);
        assert!(uf.connected(0, 2).is_err());
    }

    #[test]
    fn union_two_elements_same_set() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1).expect("in range"));
        assert!(uf.connected(0, 1).expect("in range"));
        assert_eq!(uf.count(), 3);
    }

    #[test]
    fn union_does_not_affect_others() {
        let mut uf = UnionFind::new(4);
        uf.union(0, 1).expect("in range");
        assert!(!uf.connected(0, 2).expect("in range"));
        assert!(!uf.connected(0, 3).expect("in range"));
        assert!(!uf.connected(2, 3).expect("in range"));
    }

    #[test]
    fn transitive_closure() {
        let mut uf = UnionFind::new(3);
        uf.union(0, 1).expect("in range");
        uf.union(1, 2).expect("in range");
        assert!(uf.connected(0, 2).expect("in range"));
        assert_eq!(uf.count(), 1);
    }

    #[test]
    fn tie_attaches_second_root_under_first() {
        let mut uf = UnionFind::new(5);
        uf.union(3, 1).expect("in range");
        assert_eq!(uf.find(1).expect("in range"), 3);
        assert_eq!(uf.rank[3], 1);
        assert_eq!(uf.rank[1], 0);
    }

    #[test]
    fn idempotent_union() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(0, 1).expect("in range"));
        let rep_before = uf.find(0).expect("in range");
        assert!(!uf.union(0, 1).expect("in range"));
        assert_eq!(uf.count(), 2, "second union must not decrement count");
        assert_eq!(rep_before, uf.find(0).expect("in range"));
    }

    #[test]
    fn union_by_rank_higher_rank_wins() {
        let mut uf = UnionFind::new(3);
        uf.union(0, 1).expect("in range");
        // Singleton 2 has rank 0, root 0 has rank 1.
        uf.union(2, 0).expect("in range");
        assert_eq!(
            uf.find(2).expect("in range"),
            0,
            "singleton should go under the higher-rank root"
        );
    }

    #[test]
    fn path_halving_shortens_chain() {
        // Build a chain by hand: 4 -> 3 -> 2 -> 1 -> 0.
        let mut uf = UnionFind::new(5);
        uf.parent = vec![0, 0, 1, 2, 3];
        uf.count = 1;
        assert_eq!(uf.find(4).expect("in range"), 0);
        assert_eq!(uf.parent, vec![0, 0, 0, 2, 2]);
    }

    #[test]
    fn reference_scenario_of_ten() {
        let mut uf = UnionFind::new(10);
        let pairs = [
            (4, 3),
            (3, 8),
            (6, 5),
            (9, 4),
            (2, 1),
            (5, 0),
            (7, 2),
            (6, 1),
            (1, 0),
        ];
        for (i, &(p, q)) in pairs.iter().enumerate() {
            uf.union(p, q).expect("in range");
            if i == 4 {
                assert_eq!(uf.count(), 5);
                assert!(!uf.connected(0, 7).expect("in range"));
                assert!(uf.connected(8, 9).expect("in range"));
            }
        }
        assert_eq!(uf.count(), 2);
        assert!(uf.connected(0, 7).expect("in range"));
    }

    #[test]
    fn components_are_sorted_by_smallest_member() {
        let mut uf = UnionFind::new(6);
        uf.union(5, 1).expect("in range");
        uf.union(4, 0).expect("in range");
        uf.union(3, 5).expect("in range");
        assert_eq!(
            uf.components(),
            vec![vec![0, 4], vec![1, 3, 5], vec![2]]
        );
    }

    #[test]
    fn len_and_is_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.len(), 0);
        assert_eq!(uf.count(), 0);
        assert!(uf.components().is_empty());

        let uf = UnionFind::new(3);
        assert!(!uf.is_empty());
        assert_eq!(uf.len(), 3);
    }

    #[test]
    fn large_component_merge() {
        const N: usize = 64;
        let mut uf = UnionFind::new(N);
        for i in 1..N {
            uf.union(0, i).expect("in range");
        }
        assert_eq!(uf.count(), 1);
        let root = uf.find(0).expect("in range");
        for i in 0..N {
            assert_eq!(
                uf.find(i).expect("in range"),
                root,
                "element {i} should share the root after merging all into one component"
            );
        }
    }
}
