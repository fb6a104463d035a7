//! External interfaces (spec §6): instance parsing (two auto-detected
//! formats), solution text encoding, best-known-solution lookup, and result
//! records (JSON/CSV).

mod bks;
mod li_lim;
mod result;
mod sartori_buriol;
mod solution_text;

pub use bks::{gap, lookup as lookup_bks, Bks};
pub use result::{write_csv, write_csv_file, write_json, write_json_file, ResultRecord};
pub use solution_text::{decode as decode_solution, encode as encode_solution, SolutionHeader};

use std::path::Path;

use crate::error::{Result, SolverError};
use crate::model::Instance;

/// Reads and parses an instance file, auto-detecting Li & Lim vs
/// Sartori-Buriol format from the first non-empty line's shape (spec §6).
pub fn read_instance(path: &Path) -> Result<Instance> {
    let contents = std::fs::read_to_string(path).map_err(|source| SolverError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let first_line = contents
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    if sartori_buriol::looks_like_sartori_buriol(first_line) {
        sartori_buriol::parse(path, &contents)
    } else if li_lim::looks_like_li_lim(first_line) {
        li_lim::parse(path, &contents)
    } else {
        Err(SolverError::UnknownFormat)
    }
}
