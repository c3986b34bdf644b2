//! Workload generator.
//!
//! Produces union sequences for [`algokit_core::UnionFind`] and key orders for
//! [`algokit_core::Bst`]. All randomness flows through an explicit
//! [`StdRng`] seeded from [`GeneratorConfig::seed`]; there is no global RNG
//! state.

pub mod keys;
pub mod unions;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Insertion order for generated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    /// A uniformly random permutation; expected tree height is `O(log n)`.
    Shuffled,
    /// Strictly ascending; degenerates the tree into a right spine.
    Ascending,
    /// Alternates between the smallest and largest remaining key, producing
    /// a zig-zag tree of linear height.
    ZigZag,
}

/// Configuration for the workload generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of elements in the union-find universe.
    pub universe: usize,
    /// Number of `(p, q)` union pairs.
    pub num_unions: usize,
    /// Fraction of union pairs drawn inside a small cluster of elements
    /// (0.0-1.0). Clustered pairs are often already connected, exercising the
    /// no-op path of `union`.
    pub cluster_fraction: f64,
    /// Number of distinct keys for the order-statistics tree.
    pub num_keys: usize,
    /// Insertion order for the keys.
    pub key_order: KeyOrder,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 100 elements, 150 unions, 100 keys
    Small,
    /// 10K elements, 15K unions, 10K keys
    Medium,
    /// 100K elements, 150K unions, 100K keys
    Large,
    /// 1M elements, 1.5M unions, 1M keys
    XLarge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let n = match self {
            SizeTier::Small => 100,
            SizeTier::Medium => 10_000,
            SizeTier::Large => 100_000,
            SizeTier::XLarge => 1_000_000,
        };
        GeneratorConfig {
            seed,
            universe: n,
            num_unions: n + n / 2,
            cluster_fraction: 0.2,
            num_keys: n,
            key_order: KeyOrder::Shuffled,
        }
    }
}

/// Generates union pairs from the given configuration.
///
/// Every index lies in `[0, config.universe)`. Returns an empty sequence for
/// an empty universe.
pub fn generate_unions(config: &GeneratorConfig) -> Vec<(usize, usize)> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    unions::build_pairs(config, &mut rng)
}

/// Generates the distinct keys `0..config.num_keys` in the configured order.
pub fn generate_keys(config: &GeneratorConfig) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    keys::build_keys(config.num_keys, config.key_order, &mut rng)
}
