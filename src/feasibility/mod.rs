//! The feasibility oracle (C2 of the solver architecture): the single place
//! that decides whether a route or solution respects precedence, capacity,
//! and time windows. Every other module — insertion, local search, LNS —
//! asks this module rather than re-deriving the answer.

mod oracle;

pub use oracle::{
    check_solution, evaluate_and_check, evaluate_solution, is_feasible_route, scan, scan_route,
    RouteScan, Violation,
};
