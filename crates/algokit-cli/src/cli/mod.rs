//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text (default).
    Human,
    /// A single JSON object on stdout.
    Json,
}

/// All top-level subcommands exposed by the `algokit` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Replay union operations and report the resulting components.
    ///
    /// Input: the universe size, then whitespace-separated `p q` pairs.
    #[command(name = "union-find")]
    UnionFind {
        /// Path to an input file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Load `key value` lines into an order-statistics tree and query it.
    ///
    /// A line holding only a key deletes that key.
    #[command(name = "symbol-table")]
    SymbolTable {
        /// Path to an input file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Largest key less than or equal to K (repeatable).
        #[arg(long, value_name = "K", allow_negative_numbers = true)]
        floor: Vec<i64>,
        /// Smallest key greater than or equal to K (repeatable).
        #[arg(long, value_name = "K", allow_negative_numbers = true)]
        ceiling: Vec<i64>,
        /// Key with exactly R smaller keys (repeatable).
        #[arg(long, value_name = "R")]
        select: Vec<usize>,
        /// Number of keys strictly less than K (repeatable).
        #[arg(long, value_name = "K", allow_negative_numbers = true)]
        rank: Vec<i64>,
        /// Keys within the inclusive range [LO, HI].
        #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
        range: Option<Vec<i64>>,
    },

    /// Print the algokit-core library version.
    Version,
}

/// Root CLI struct for the `algokit` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "algokit",
    version,
    about = "Union-find and order-statistics tree driver",
    long_about = "Drives the algokit disjoint-set forest and order-statistics\n\
                  binary search tree from plain-text input files."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors to stderr (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every merge and deletion to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `ALGOKIT_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 16777216 (16 MiB).
    #[arg(
        long,
        global = true,
        env = "ALGOKIT_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Largest universe size `union-find` will allocate.
    ///
    /// Can also be set via the `ALGOKIT_MAX_UNIVERSE` environment variable.
    /// Default: 67108864 (2^26 elements).
    #[arg(
        long,
        global = true,
        env = "ALGOKIT_MAX_UNIVERSE",
        default_value = "67108864"
    )]
    pub max_universe: u64,

    /// Disable ANSI color codes in log output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
