/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `algokit` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read, parse, or
///   replay the input at all.
/// - Exit code **1**: the tool ran to completion but at least one requested
///   query was rejected by the tree.
use std::fmt;
use std::path::PathBuf;

use algokit_core::UnionFindError;

/// All error conditions that the `algokit` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// Any other I/O error, including failures writing to stdout.
    IoError {
        /// `"-"` for stdin, `"stdout"`, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input text does not follow the subcommand's format.
    MalformedInput {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        detail: String,
    },

    /// The forest rejected a size or index taken from the input.
    UnionFind {
        /// 1-based line number of the offending line.
        line: usize,
        /// The rejection.
        source: UnionFindError,
    },

    /// The universe size in the input exceeds `--max-universe`.
    UniverseTooLarge {
        /// 1-based line number of the size.
        line: usize,
        /// The requested size.
        n: i64,
        /// The configured limit.
        limit: u64,
    },

    // --- Exit code 1: logical failures ---
    /// One or more symbol-table queries failed.
    ///
    /// The per-query errors have already been printed; this variant exists so
    /// `main` can exit with code 1.
    QueryErrors {
        /// Number of failed queries.
        failed: usize,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::IoError { .. }
            | Self::MalformedInput { .. }
            | Self::UnionFind { .. }
            | Self::UniverseTooLarge { .. } => 2,

            Self::QueryErrors { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::MalformedInput { line, detail } => {
                format!("error: malformed input at line {line}: {detail}")
            }
            Self::UnionFind { line, source } => {
                format!("error: line {line}: {source}")
            }
            Self::UniverseTooLarge { line, n, limit } => {
                format!("error: line {line}: universe of {n} elements exceeds the limit of {limit}")
            }
            Self::QueryErrors { failed: 1 } => "error: 1 query failed".to_owned(),
            Self::QueryErrors { failed } => format!("error: {failed} queries failed"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("pairs.txt"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/secret.txt"),
            },
            CliError::FileTooLarge {
                source: "big.txt".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::InvalidUtf8 {
                source: "bad.txt".to_owned(),
                byte_offset: 42,
            },
            CliError::IoError {
                source: "-".to_owned(),
                detail: "broken pipe".to_owned(),
            },
            CliError::MalformedInput {
                line: 3,
                detail: "expected an integer".to_owned(),
            },
            CliError::UnionFind {
                line: 1,
                source: UnionFindError::InvalidArgument { n: -4 },
            },
            CliError::UniverseTooLarge {
                line: 1,
                n: 1 << 40,
                limit: 1 << 26,
            },
        ];
        for e in &errors {
            assert_eq!(e.exit_code(), 2, "{e:?}");
        }
    }

    #[test]
    fn query_errors_is_exit_1() {
        assert_eq!(CliError::QueryErrors { failed: 2 }.exit_code(), 1);
    }

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("unions.txt"),
        };
        let msg = e.message();
        assert!(msg.contains("unions.txt"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn file_too_large_without_actual_mentions_limit() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 512,
            actual: None,
        };
        assert!(e.message().contains("512"));
    }

    #[test]
    fn union_find_message_carries_line_and_cause() {
        let e = CliError::UnionFind {
            line: 7,
            source: UnionFindError::IndexOutOfRange { index: 12, len: 10 },
        };
        let msg = e.message();
        assert!(msg.contains("line 7"), "message: {msg}");
        assert!(msg.contains("index 12"), "message: {msg}");
    }

    #[test]
    fn query_errors_message_pluralises() {
        assert_eq!(
            CliError::QueryErrors { failed: 1 }.message(),
            "error: 1 query failed"
        );
        assert_eq!(
            CliError::QueryErrors { failed: 3 }.message(),
            "error: 3 queries failed"
        );
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::MalformedInput {
            line: 2,
            detail: "x".to_owned(),
        };
        assert_eq!(format!("{e}"), e.message());
    }

    #[test]
    fn error_trait_is_implemented() {
        let e: Box<dyn std::error::Error> = Box::new(CliError::QueryErrors { failed: 1 });
        assert!(!e.to_string().is_empty());
    }
}
