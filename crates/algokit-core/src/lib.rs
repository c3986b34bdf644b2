#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod bst;
pub mod union_find;

pub use bst::{Bst, BstError};
pub use union_find::{UnionFind, UnionFindError};

/// Returns the current version of the algokit-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
