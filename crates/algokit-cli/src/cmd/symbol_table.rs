//! Implementation of `algokit symbol-table <file> [queries]`.
//!
//! Each non-blank input line is `key value`, where `key` is an `i64` and
//! `value` is the rest of the line. A line carrying only a key removes that
//! key. Lines starting with `#` are comments.
//!
//! After loading, the command prints the table summary and every entry in
//! ascending key order, then answers the requested order-statistic queries.
//!
//! Exit codes: 0 = all queries answered, 1 = at least one query failed,
//! 2 = unreadable or malformed input.
use std::io::Write;

use algokit_core::{Bst, BstError};
use log::{debug, info};

use crate::OutputFormat;
use crate::error::CliError;

/// One order-statistic question asked of the loaded table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// Largest key `<=` the argument.
    Floor(i64),
    /// Smallest key `>=` the argument.
    Ceiling(i64),
    /// Key of the given rank.
    Select(usize),
    /// Number of keys strictly below the argument.
    Rank(i64),
    /// Keys in the inclusive range `[lo, hi]`.
    Range(i64, i64),
}

impl Query {
    fn label(&self) -> String {
        match self {
            Self::Floor(k) => format!("floor({k})"),
            Self::Ceiling(k) => format!("ceiling({k})"),
            Self::Select(r) => format!("select({r})"),
            Self::Rank(k) => format!("rank({k})"),
            Self::Range(lo, hi) => format!("range({lo}, {hi})"),
        }
    }
}

/// A successful query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// A single key (floor, ceiling, select).
    Key(i64),
    /// A count (rank).
    Count(usize),
    /// The keys of a range, with their count.
    Range {
        /// Number of keys in the range.
        count: usize,
        /// The keys, ascending.
        keys: Vec<i64>,
    },
}

/// A query paired with its result.
#[derive(Debug)]
pub struct QueryOutcome {
    /// Printable form of the query, e.g. `floor(30)`.
    pub label: String,
    /// The answer or the tree's rejection.
    pub result: Result<Answer, BstError>,
}

/// Builds the query list in the order the flags are documented.
pub fn collect_queries(
    floor: &[i64],
    ceiling: &[i64],
    select: &[usize],
    rank: &[i64],
    range: Option<&[i64]>,
) -> Vec<Query> {
    let mut queries: Vec<Query> = floor.iter().copied().map(Query::Floor).collect();
    queries.extend(ceiling.iter().copied().map(Query::Ceiling));
    queries.extend(select.iter().copied().map(Query::Select));
    queries.extend(rank.iter().copied().map(Query::Rank));
    if let Some(&[lo, hi]) = range {
        queries.push(Query::Range(lo, hi));
    }
    queries
}

/// Parses `content` into a symbol table, applying lines in order.
///
/// # Errors
///
/// Returns [`CliError::MalformedInput`] if a line's key is not an `i64`.
pub fn load(content: &str) -> Result<Bst<i64, String>, CliError> {
    let mut table = Bst::new();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key_text, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(k, v)| (k, v.trim()));
        let key: i64 = key_text.parse().map_err(|_| CliError::MalformedInput {
            line: i + 1,
            detail: format!("key {key_text:?} is not an integer"),
        })?;
        if rest.is_empty() {
            debug!("line {}: removing key {key}", i + 1);
            table.put_or_delete(key, None);
        } else {
            table.put_or_delete(key, Some(rest.to_owned()));
        }
    }
    info!(
        "loaded symbol table: {} keys, height {:?}",
        table.len(),
        table.height()
    );
    Ok(table)
}

/// Answers every query against `table`.
pub fn answer(table: &Bst<i64, String>, queries: &[Query]) -> Vec<QueryOutcome> {
    queries
        .iter()
        .map(|q| {
            let result = match q {
                Query::Floor(k) => table.floor(k).map(|&f| Answer::Key(f)),
                Query::Ceiling(k) => table.ceiling(k).map(|&c| Answer::Key(c)),
                Query::Select(r) => table.select(*r).map(|&s| Answer::Key(s)),
                Query::Rank(k) => Ok(Answer::Count(table.rank(k))),
                Query::Range(lo, hi) => Ok(Answer::Range {
                    count: table.size_of_range(lo, hi),
                    keys: table.keys_in_range(lo, hi).into_iter().copied().collect(),
                }),
            };
            if let Err(e) = &result {
                debug!("{} rejected: {e}", q.label());
            }
            QueryOutcome {
                label: q.label(),
                result,
            }
        })
        .collect()
}

/// Runs the `symbol-table` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 for unreadable input, or
/// [`CliError::QueryErrors`] (exit code 1) after printing if any query failed.
pub fn run(content: &str, queries: &[Query], format: &OutputFormat) -> Result<(), CliError> {
    let table = load(content)?;
    let outcomes = answer(&table, queries);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &table, &outcomes),
        OutputFormat::Json => print_json(&mut out, &table, &outcomes),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::QueryErrors { failed });
    }
    Ok(())
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

fn print_human<W: Write>(
    w: &mut W,
    table: &Bst<i64, String>,
    outcomes: &[QueryOutcome],
) -> std::io::Result<()> {
    writeln!(w, "size:    {}", table.len())?;
    writeln!(w, "min:     {}", or_dash(table.min().ok()))?;
    writeln!(w, "max:     {}", or_dash(table.max().ok()))?;
    writeln!(w, "height:  {}", or_dash(table.height()))?;

    if !table.is_empty() {
        writeln!(w)?;
        let width = table
            .iter()
            .map(|(k, _)| k.to_string().len())
            .max()
            .unwrap_or(0);
        for (key, value) in table {
            writeln!(w, "  {key:>width$}  {value}")?;
        }
    }

    if !outcomes.is_empty() {
        writeln!(w)?;
        for outcome in outcomes {
            match &outcome.result {
                Ok(Answer::Key(k)) => writeln!(w, "{}: {k}", outcome.label)?,
                Ok(Answer::Count(n)) => writeln!(w, "{}: {n}", outcome.label)?,
                Ok(Answer::Range { count, keys }) => {
                    let joined = keys
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(w, "{}: {count} [{joined}]", outcome.label)?;
                }
                Err(e) => writeln!(w, "{}: error: {e}", outcome.label)?,
            }
        }
    }
    Ok(())
}

fn print_json<W: Write>(
    w: &mut W,
    table: &Bst<i64, String>,
    outcomes: &[QueryOutcome],
) -> std::io::Result<()> {
    let entries: Vec<serde_json::Value> = table
        .iter()
        .map(|(k, v)| serde_json::json!({ "key": k, "value": v }))
        .collect();
    let queries: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(Answer::Key(k)) => serde_json::json!({ "query": o.label, "key": k }),
            Ok(Answer::Count(n)) => serde_json::json!({ "query": o.label, "count": n }),
            Ok(Answer::Range { count, keys }) => {
                serde_json::json!({ "query": o.label, "count": count, "keys": keys })
            }
            Err(e) => serde_json::json!({ "query": o.label, "error": e.to_string() }),
        })
        .collect();
    let value = serde_json::json!({
        "size": table.len(),
        "min": table.min().ok(),
        "max": table.max().ok(),
        "height": table.height(),
        "entries": entries,
        "queries": queries,
    });
    writeln!(w, "{value}")
}
