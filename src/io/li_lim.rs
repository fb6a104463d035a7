//! Li & Lim PDPTW instance format.
//!
//! Header: `n_customers capacity speed` (speed unused). Each subsequent
//! line: `idx x y demand ready due service pickup_ref delivery_ref`. For the
//! depot both refs are 0; for a pickup `delivery_ref` points at its
//! delivery and `pickup_ref` is 0; for a delivery `pickup_ref` points at its
//! pickup and `delivery_ref` is 0. Distances are rounded Euclidean.

use std::path::Path;

use crate::error::{Result, SolverError};
use crate::model::{Instance, Node, TimeWindow};

/// `true` if the file's first non-empty line looks like a Li & Lim header
/// (two or three integers, no `SIZE`/`CAPACITY` keyword).
pub fn looks_like_li_lim(first_line: &str) -> bool {
    let upper = first_line.to_uppercase();
    if upper.contains("SIZE") || upper.contains("CAPACITY") {
        return false;
    }
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    parts.len() >= 2 && parts[0].parse::<i64>().is_ok() && parts[1].parse::<i64>().is_ok()
}

/// Parses a Li & Lim format instance file.
pub fn parse(path: &Path, contents: &str) -> Result<Instance> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".to_string());

    let mut lines = contents.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_no, header) = lines.next().ok_or_else(|| SolverError::Parse {
        line: 1,
        message: "empty file".to_string(),
    })?;
    let header_parts: Vec<&str> = header.split_whitespace().collect();
    if header_parts.len() < 2 {
        return Err(SolverError::Parse {
            line: header_no + 1,
            message: "expected 'n capacity [speed]' header".to_string(),
        });
    }
    let capacity: i32 = header_parts[1].parse().map_err(|_| SolverError::Parse {
        line: header_no + 1,
        message: format!("invalid capacity '{}'", header_parts[1]),
    })?;

    let mut raw_nodes: Vec<(usize, f64, f64, i32, f64, f64, f64, usize, usize)> = Vec::new();
    for (line_no, line) in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 9 {
            continue;
        }
        let parse_f = |s: &str, ln: usize| -> Result<f64> {
            s.parse().map_err(|_| SolverError::Parse {
                line: ln + 1,
                message: format!("invalid number '{s}'"),
            })
        };
        let parse_i = |s: &str, ln: usize| -> Result<i64> {
            s.parse().map_err(|_| SolverError::Parse {
                line: ln + 1,
                message: format!("invalid integer '{s}'"),
            })
        };
        let idx = parse_i(parts[0], line_no)? as usize;
        let x = parse_f(parts[1], line_no)?;
        let y = parse_f(parts[2], line_no)?;
        let demand = parse_i(parts[3], line_no)? as i32;
        let ready = parse_f(parts[4], line_no)?;
        let due = parse_f(parts[5], line_no)?;
        let service = parse_f(parts[6], line_no)?;
        let pickup_ref = parse_i(parts[7], line_no)? as usize;
        let delivery_ref = parse_i(parts[8], line_no)? as usize;
        raw_nodes.push((idx, x, y, demand, ready, due, service, pickup_ref, delivery_ref));
    }

    if raw_nodes.is_empty() {
        return Err(SolverError::Parse {
            line: header_no + 2,
            message: "no node rows found".to_string(),
        });
    }

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    for (idx, x, y, demand, ready, due, service, pickup_ref, delivery_ref) in raw_nodes {
        let pair = if pickup_ref != 0 {
            pickup_ref
        } else if delivery_ref != 0 {
            delivery_ref
        } else {
            0
        };
        let tw = TimeWindow::new(ready, due);
        nodes.push(if idx == 0 {
            Node::depot(x, y, tw)
        } else {
            Node::new(idx, x, y, demand, tw, service, pair)
        });
    }
    nodes.sort_by_key(|n| n.idx());

    Ok(Instance::new(name, capacity, nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = "3 10 1\n0 0.0 0.0 0 0 1000 0 0 0\n1 10.0 0.0 5 0 100 0 0 2\n2 20.0 0.0 -5 0 100 0 1 0\n";

    #[test]
    fn detects_li_lim_header() {
        assert!(looks_like_li_lim("3 10 1"));
        assert!(!looks_like_li_lim("SIZE: 100"));
    }

    #[test]
    fn parses_nodes_and_pairing() {
        let inst = parse(&PathBuf::from("demo.txt"), SAMPLE).unwrap();
        assert_eq!(inst.n(), 3);
        assert_eq!(inst.capacity(), 10);
        assert_eq!(inst.pairs(), vec![(1, 2)]);
    }

    #[test]
    fn rejects_short_header() {
        let err = parse(&PathBuf::from("bad.txt"), "oops\n");
        assert!(err.is_err());
    }
}
