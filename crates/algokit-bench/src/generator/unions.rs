//! Union pair strategies: uniform random pairs mixed with pairs drawn from a
//! small hot cluster.

use rand::Rng;
use rand::rngs::StdRng;

use super::GeneratorConfig;

/// The hot cluster spans the first `universe / CLUSTER_DIVISOR` elements (at least one).
const CLUSTER_DIVISOR: usize = 50;

/// Builds `config.num_unions` pairs inside `[0, config.universe)`.
pub fn build_pairs(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<(usize, usize)> {
    let n = config.universe;
    if n == 0 {
        return Vec::new();
    }
    let cluster = (n / CLUSTER_DIVISOR).clamp(1, n);
    let fraction = config.cluster_fraction.clamp(0.0, 1.0);

    let mut pairs = Vec::with_capacity(config.num_unions);
    for _ in 0..config.num_unions {
        let pair = if rng.gen_bool(fraction) {
            (rng.gen_range(0..cluster), rng.gen_range(0..cluster))
        } else {
            (rng.gen_range(0..n), rng.gen_range(0..n))
        };
        pairs.push(pair);
    }
    pairs
}
