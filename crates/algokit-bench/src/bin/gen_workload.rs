//! Writes benchmark workloads to disk in the `algokit` CLI input formats.
//!
//! Produces `target/bench-fixtures/unions.txt` (universe size, then one
//! `p q` pair per line) and `target/bench-fixtures/table.txt` (one
//! `key value` pair per line) for the requested tier.

use std::error::Error;
use std::fs;
use std::io::{BufWriter, Write};

use algokit_bench::{
    SizeTier, generate_keys, generate_unions, table_fixture_path, union_fixture_path,
};

fn main() -> Result<(), Box<dyn Error>> {
    let tier = match std::env::args().nth(1).as_deref() {
        Some("small") => SizeTier::Small,
        Some("large") => SizeTier::Large,
        Some("xlarge") => SizeTier::XLarge,
        Some("medium") | None => SizeTier::Medium,
        Some(other) => return Err(format!("unknown tier {other:?}").into()),
    };
    let config = tier.config(42);

    let union_path = union_fixture_path();
    if let Some(parent) = union_path.parent() {
        fs::create_dir_all(parent)?;
    }

    eprintln!("Writing {tier:?} unions to {}...", union_path.display());
    let mut out = BufWriter::new(fs::File::create(&union_path)?);
    writeln!(out, "{}", config.universe)?;
    for (p, q) in generate_unions(&config) {
        writeln!(out, "{p} {q}")?;
    }
    out.flush()?;

    let table_path = table_fixture_path();
    eprintln!("Writing {tier:?} keys to {}...", table_path.display());
    let mut out = BufWriter::new(fs::File::create(&table_path)?);
    for key in generate_keys(&config) {
        writeln!(out, "{key} v{key}")?;
    }
    out.flush()?;

    eprintln!("Done.");
    Ok(())
}
