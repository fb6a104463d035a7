//! Sartori–Buriol PDPTW instance format.
//!
//! A key-value header (`NAME`, `SIZE`, `CAPACITY`, ...) terminated by a
//! `NODES` line, followed by `SIZE` node rows
//! (`idx lat long dem etw ltw dur [pickup_pair] [delivery_pair]`), then an
//! `EDGES` line followed by `SIZE` rows of an explicit integer travel-time
//! matrix. Unknown header keys are ignored.

use std::path::Path;

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolverError};
use crate::model::{Instance, Node, TimeWindow};

/// `true` if the file's first non-empty line carries a Sartori–Buriol
/// header keyword.
pub fn looks_like_sartori_buriol(first_line: &str) -> bool {
    let upper = first_line.to_uppercase();
    upper.contains("SIZE") || upper.contains("CAPACITY")
}

/// Parses a Sartori–Buriol format instance file.
pub fn parse(path: &Path, contents: &str) -> Result<Instance> {
    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".to_string());

    let mut lines = contents.lines().enumerate();
    let mut name = default_name;
    let mut size: Option<usize> = None;
    let mut capacity: Option<i32> = None;

    let mut node_start_line = 0;
    for (line_no, line) in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed == "NODES" {
            node_start_line = line_no + 1;
            break;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        let key = fields[0].trim_end_matches(':').to_uppercase();
        let value = fields[1..].join(" ");
        match key.as_str() {
            "NAME" => name = value,
            "SIZE" => {
                size = Some(value.parse().map_err(|_| SolverError::Parse {
                    line: line_no + 1,
                    message: format!("invalid SIZE '{value}'"),
                })?)
            }
            "CAPACITY" => {
                capacity = Some(value.parse().map_err(|_| SolverError::Parse {
                    line: line_no + 1,
                    message: format!("invalid CAPACITY '{value}'"),
                })?)
            }
            _ => {}
        }
    }

    let size = size.ok_or_else(|| SolverError::Parse {
        line: node_start_line,
        message: "missing SIZE header".to_string(),
    })?;
    let capacity = capacity.ok_or_else(|| SolverError::Parse {
        line: node_start_line,
        message: "missing CAPACITY header".to_string(),
    })?;

    let mut nodes = Vec::with_capacity(size);
    let mut read = 0;
    while read < size {
        let Some((line_no, line)) = lines.next() else {
            return Err(SolverError::Parse {
                line: node_start_line + read,
                message: "unexpected end of file while reading NODES".to_string(),
            });
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 7 {
            return Err(SolverError::Parse {
                line: line_no + 1,
                message: "node row needs at least 7 fields".to_string(),
            });
        }
        let parse_f = |s: &str| -> Result<f64> {
            s.parse().map_err(|_| SolverError::Parse {
                line: line_no + 1,
                message: format!("invalid number '{s}'"),
            })
        };
        let idx: usize = fields[0].parse().map_err(|_| SolverError::Parse {
            line: line_no + 1,
            message: format!("invalid index '{}'", fields[0]),
        })?;
        let x = parse_f(fields[1])?;
        let y = parse_f(fields[2])?;
        let demand: i32 = fields[3].parse().map_err(|_| SolverError::Parse {
            line: line_no + 1,
            message: format!("invalid demand '{}'", fields[3]),
        })?;
        let etw = parse_f(fields[4])?;
        let ltw = parse_f(fields[5])?;
        let dur = parse_f(fields[6])?;

        let explicit_pair = |field_idx: usize| -> Option<usize> {
            fields
                .get(field_idx)
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|&v| v > 0)
        };
        let pair = if demand > 0 {
            explicit_pair(7).unwrap_or(idx + size / 2)
        } else if demand < 0 {
            explicit_pair(8).unwrap_or(idx.saturating_sub(size / 2))
        } else {
            0
        };

        let tw = TimeWindow::new(etw, ltw);
        nodes.push(if idx == 0 {
            Node::depot(x, y, tw)
        } else {
            Node::new(idx, x, y, demand, tw, dur, pair)
        });
        read += 1;
    }
    nodes.sort_by_key(|n| n.idx());

    loop {
        match lines.next() {
            Some((_, line)) if line.trim() == "EDGES" => break,
            Some(_) => continue,
            None => {
                return Err(SolverError::Parse {
                    line: node_start_line + size,
                    message: "missing EDGES section".to_string(),
                })
            }
        }
    }

    let mut data = Vec::with_capacity(size * size);
    for _ in 0..size {
        let Some((line_no, line)) = lines.next() else {
            return Err(SolverError::Parse {
                line: node_start_line + size,
                message: "unexpected end of file while reading EDGES".to_string(),
            });
        };
        for tok in line.split_whitespace() {
            data.push(tok.parse().map_err(|_| SolverError::Parse {
                line: line_no + 1,
                message: format!("invalid travel time '{tok}'"),
            })?);
        }
    }

    let matrix = DistanceMatrix::from_data(size, data).ok_or_else(|| SolverError::Parse {
        line: node_start_line + size,
        message: "EDGES matrix size does not match SIZE".to_string(),
    })?;

    Ok(Instance::with_matrix(name, capacity, nodes, matrix))
}
