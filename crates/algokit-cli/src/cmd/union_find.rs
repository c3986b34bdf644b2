//! Implementation of `algokit union-find <file>`.
//!
//! Input is whitespace-separated integers: the universe size `n` followed by
//! `p q` pairs, conventionally one pair per line. Each pair is applied with
//! [`UnionFind::union`]. Lines may carry `#` comments.
//!
//! Human mode prints every pair that merged two previously separate sets,
//! then the final number of components. `--format json` emits a single object
//! with the count, the merging pairs, and every component.
//!
//! Exit codes: 0 = success, 2 = unreadable or malformed input, negative size,
//! a size above `--max-universe`, or an index outside the universe.
use std::io::Write;

use algokit_core::UnionFind;
use log::info;

use crate::OutputFormat;
use crate::error::CliError;

/// The forest after replaying an input, plus the pairs that merged sets.
pub struct Replay {
    /// The resulting forest.
    pub uf: UnionFind,
    /// Pairs whose union merged two distinct sets, in input order.
    pub merged: Vec<(usize, usize)>,
}

/// Parses `content` and applies every pair to a fresh forest of at most
/// `max_universe` elements.
///
/// # Errors
///
/// Returns [`CliError::MalformedInput`] for missing or non-integer tokens,
/// [`CliError::UniverseTooLarge`] for a size above `max_universe`, and
/// [`CliError::UnionFind`] when the forest rejects the size or an index.
pub fn replay(content: &str, max_universe: u64) -> Result<Replay, CliError> {
    let mut tokens = content.lines().enumerate().flat_map(|(i, line)| {
        let body = line.split_once('#').map_or(line, |(body, _)| body);
        body.split_whitespace().map(move |t| (i + 1, t))
    });

    let (line, first) = tokens.next().ok_or_else(|| CliError::MalformedInput {
        line: 1,
        detail: "missing universe size".to_owned(),
    })?;
    let n: i64 = first.parse().map_err(|_| CliError::MalformedInput {
        line,
        detail: format!("universe size {first:?} is not an integer"),
    })?;
    if u64::try_from(n).is_ok_and(|size| size > max_universe) {
        return Err(CliError::UniverseTooLarge {
            line,
            n,
            limit: max_universe,
        });
    }
    let mut uf = UnionFind::try_from(n).map_err(|source| CliError::UnionFind { line, source })?;

    let mut merged = Vec::new();
    while let Some((line, p)) = tokens.next() {
        let p = parse_index(line, p)?;
        let (line, q) = tokens.next().ok_or_else(|| CliError::MalformedInput {
            line,
            detail: format!("pair starting with {p} has no second element"),
        })?;
        let q = parse_index(line, q)?;
        if uf
            .union(p, q)
            .map_err(|source| CliError::UnionFind { line, source })?
        {
            merged.push((p, q));
        }
    }

    info!(
        "replayed unions over {} elements: {} merged, {} components",
        uf.len(),
        merged.len(),
        uf.count()
    );
    Ok(Replay { uf, merged })
}

fn parse_index(line: usize, token: &str) -> Result<usize, CliError> {
    token.parse().map_err(|_| CliError::MalformedInput {
        line,
        detail: format!("{token:?} is not a non-negative integer index"),
    })
}

/// Runs the `union-find` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the input cannot be replayed or
/// stdout cannot be written.
pub fn run(content: &str, max_universe: u64, format: &OutputFormat) -> Result<(), CliError> {
    let mut replay = replay(content, max_universe)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &replay),
        OutputFormat::Json => print_json(&mut out, &mut replay),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn print_human<W: Write>(w: &mut W, replay: &Replay) -> std::io::Result<()> {
    for (p, q) in &replay.merged {
        writeln!(w, "{p} {q}")?;
    }
    let count = replay.uf.count();
    let noun = if count == 1 { "component" } else { "components" };
    writeln!(w, "{count} {noun}")
}

fn print_json<W: Write>(w: &mut W, replay: &mut Replay) -> std::io::Result<()> {
    let value = serde_json::json!({
        "count": replay.uf.count(),
        "merged": replay.merged,
        "components": replay.uf.components(),
    });
    writeln!(w, "{value}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use algokit_core::UnionFindError;

    use super::*;

    const LIMIT: u64 = 1 << 20;

    const TINY: &str = "10\n4 3\n3 8\n6 5\n9 4\n2 1\n8 9\n5 0\n7 2\n6 1\n1 0\n6 7\n";

    #[test]
    fn tiny_input_leaves_two_components() {
        let mut replay = replay(TINY, LIMIT).expect("valid input");
        assert_eq!(replay.uf.count(), 2);
        assert_eq!(
            replay.merged,
            vec![(4, 3), (3, 8), (6, 5), (9, 4), (2, 1), (5, 0), (7, 2), (6, 1)]
        );
        assert!(replay.uf.connected(0, 7).expect("in range"));
    }

    #[test]
    fn human_output_lists_merges_then_count() {
        let replay = replay("3\n0 1\n1 0\n", LIMIT).expect("valid input");
        let mut buf = Vec::new();
        print_human(&mut buf, &replay).expect("write");
        assert_eq!(String::from_utf8_lossy(&buf), "0 1\n2 components\n");
    }

    #[test]
    fn json_output_has_components() {
        let mut replay = replay("4 # universe\n0 2\n3 1\n", LIMIT).expect("valid input");
        let mut buf = Vec::new();
        print_json(&mut buf, &mut replay).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["count"], 2);
        assert_eq!(value["components"], serde_json::json!([[0, 2], [1, 3]]));
        assert_eq!(value["merged"], serde_json::json!([[0, 2], [3, 1]]));
    }

    #[test]
    fn empty_universe_is_valid() {
        let replay = replay("0\n", LIMIT).expect("valid input");
        assert_eq!(replay.uf.count(), 0);
        assert!(replay.merged.is_empty());
    }

    #[test]
    fn missing_size_is_malformed() {
        match replay("  \n# nothing\n", LIMIT) {
            Err(CliError::MalformedInput { line: 1, .. }) => {}
            other => panic!("expected MalformedInput, got {:?}", other.err()),
        }
    }

    #[test]
    fn negative_size_is_invalid_argument() {
        match replay("-3\n", LIMIT) {
            Err(CliError::UnionFind {
                source: UnionFindError::InvalidArgument { n: -3 },
                ..
            }) => {}
            other => panic!("expected InvalidArgument, got {:?}", other.err()),
        }
    }

    #[test]
    fn out_of_range_index_reports_line() {
        match replay("3\n0 1\n1 5\n", LIMIT) {
            Err(CliError::UnionFind {
                line: 3,
                source: UnionFindError::IndexOutOfRange { index: 5, len: 3 },
            }) => {}
            other => panic!("expected IndexOutOfRange, got {:?}", other.err()),
        }
    }

    #[test]
    fn dangling_element_is_malformed() {
        match replay("3\n0 1\n2\n", LIMIT) {
            Err(CliError::MalformedInput { line: 3, .. }) => {}
            other => panic!("expected MalformedInput, got {:?}", other.err()),
        }
    }

    #[test]
    fn non_numeric_index_is_malformed() {
        let err = replay("3\n0 x\n", LIMIT).err().expect("should fail");
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("\"x\""), "message: {}", err.message());
    }

    #[test]
    fn size_above_limit_is_rejected_before_allocating() {
        match replay("4611686018427387904\n", LIMIT) {
            Err(CliError::UniverseTooLarge {
                line: 1,
                n: 4_611_686_018_427_387_904,
                limit: LIMIT,
            }) => {}
            other => panic!("expected UniverseTooLarge, got {:?}", other.err()),
        }
    }

    #[test]
    fn size_at_limit_is_accepted() {
        let at_limit = replay("8\n0 7\n", 8).expect("size equals limit");
        assert_eq!(at_limit.uf.count(), 7);
        assert!(replay("9\n", 8).is_err());
    }

    #[test]
    fn unallocatable_size_under_a_raised_limit_is_an_error() {
        match replay("9223372036854775807\n", u64::MAX) {
            Err(CliError::UnionFind {
                source: UnionFindError::CapacityExceeded { .. },
                ..
            }) => {}
            other => panic!("expected CapacityExceeded, got {:?}", other.err()),
        }
    }
}
