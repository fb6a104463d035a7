//! Result records (spec §6): one per solved instance, serializable to JSON
//! (always) and CSV (optionally).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// The outcome of solving one instance: always produced, whether or not a
/// feasible solution was found (spec §7 — the solver never throws on
/// infeasibility, it classifies the outcome).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub instance: String,
    pub vehicles: usize,
    pub cost: f64,
    pub feasible: bool,
    pub runtime_secs: f64,
    pub gap_vehicles: Option<f64>,
    pub gap_cost: Option<f64>,
}

/// Serializes `records` as a JSON array.
pub fn write_json(records: &[ResultRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| SolverError::Parse {
        line: 0,
        message: format!("failed to serialize results: {e}"),
    })
}

/// Serializes `records` as CSV (header + one row per record).
pub fn write_csv(records: &[ResultRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).map_err(|e| SolverError::Parse {
            line: 0,
            message: format!("failed to serialize csv row: {e}"),
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| SolverError::Parse {
        line: 0,
        message: format!("failed to flush csv writer: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| SolverError::Parse {
        line: 0,
        message: format!("csv output was not valid utf-8: {e}"),
    })
}

/// Writes `records` as JSON to `path`.
pub fn write_json_file(records: &[ResultRecord], path: &Path) -> Result<()> {
    let json = write_json(records)?;
    std::fs::write(path, json).map_err(|source| SolverError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `records` as CSV to `path`.
pub fn write_csv_file(records: &[ResultRecord], path: &Path) -> Result<()> {
    let csv = write_csv(records)?;
    std::fs::write(path, csv).map_err(|source| SolverError::Write {
        path: path.to_path_buf(),
        source,
    })
}
