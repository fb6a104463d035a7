//! Solution text format (spec §6): a small header followed by one `Route k`
//! line per non-empty route. Depots are implicit and not written.

use crate::error::{Result, SolverError};
use crate::model::{Route, Solution};

/// Header metadata written alongside the routes.
#[derive(Debug, Clone)]
pub struct SolutionHeader {
    pub authors: String,
    pub date: String,
    pub reference: String,
}

impl Default for SolutionHeader {
    fn default() -> Self {
        Self {
            authors: "pdptw-solver".to_string(),
            date: String::new(),
            reference: "pdptw-solver".to_string(),
        }
    }
}

/// Renders `solution` in the standard text format.
pub fn encode(solution: &Solution, header: &SolutionHeader) -> String {
    let mut out = String::new();
    out.push_str(&format!("Instance name:\t{}\n", solution.instance_name()));
    out.push_str(&format!("Authors:\t\t{}\n", header.authors));
    out.push_str(&format!("Date:\t\t\t{}\n", header.date));
    out.push_str(&format!("Reference:\t\t{}\n", header.reference));
    out.push_str("Solution\n");

    let mut route_idx = 1;
    for route in solution.routes() {
        if route.is_empty() {
            continue;
        }
        let nodes: Vec<String> = route.nodes().iter().map(|n| n.to_string()).collect();
        out.push_str(&format!("Route {route_idx} : {}\n", nodes.join(" ")));
        route_idx += 1;
    }
    out
}

/// Parses a solution previously produced by `encode`. The instance name is
/// read from `Instance name:`; only `Route k : ...` lines are consulted for
/// route content, so re-ordered or missing header lines are tolerated.
pub fn decode(contents: &str) -> Result<Solution> {
    let mut instance_name = String::new();
    let mut routes = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Instance name:") {
            instance_name = rest.trim().to_string();
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("Route") {
            let rest = rest.trim_start();
            let after_colon = rest.split_once(':').map(|(_, b)| b).ok_or_else(|| SolverError::Parse {
                line: line_no + 1,
                message: "expected 'Route k : v1 v2 ...'".to_string(),
            })?;
            let nodes: Result<Vec<usize>> = after_colon
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<usize>().map_err(|_| SolverError::Parse {
                        line: line_no + 1,
                        message: format!("invalid node index '{tok}'"),
                    })
                })
                .collect();
            routes.push(Route::from_nodes(nodes?));
        }
    }

    let mut solution = Solution::new(instance_name);
    solution.set_routes(routes);
    Ok(solution)
}
