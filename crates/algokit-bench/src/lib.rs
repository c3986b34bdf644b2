//! Workload generator and benchmark utilities for algokit.
//!
//! This crate provides deterministic, seeded generation of union sequences and
//! key orders for benchmarking and invariant testing of `algokit-core`.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, KeyOrder, SizeTier, generate_keys, generate_unions};

/// Returns the path where the generated union-find workload is stored on disk.
///
/// The file lives under `target/bench-fixtures/unions.txt` so it is
/// automatically gitignored and can be fed straight to
/// `algokit union-find`.
pub fn union_fixture_path() -> PathBuf {
    fixtures_dir().join("unions.txt")
}

/// Returns the path where the generated symbol-table workload is stored.
///
/// The file lives under `target/bench-fixtures/table.txt`, one `key value`
/// pair per line, and can be fed to `algokit symbol-table`.
pub fn table_fixture_path() -> PathBuf {
    fixtures_dir().join("table.txt")
}

fn fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
