//! Error types at the I/O and CLI boundary.
//!
//! Core algorithm code (models, feasibility, constructive, local search, LNS,
//! ILS) never returns `Result` — infeasibility is a value, not an error (see
//! `ils::SolveOutcome`). Only instance/solution file I/O can fail.

use std::path::PathBuf;

/// Errors surfaced while reading instances, solutions, or writing results.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The instance or solution file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content did not match the expected grammar for its format.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number where parsing failed.
        line: usize,
        /// Human-readable description of what was expected.
        message: String,
    },

    /// Neither the Li & Lim nor the Sartori–Buriol header shape was detected.
    #[error("could not detect instance format (expected Li & Lim or Sartori-Buriol header)")]
    UnknownFormat,

    /// A result could not be serialized or written to its destination.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for fallible I/O-boundary operations.
pub type Result<T> = std::result::Result<T, SolverError>;
