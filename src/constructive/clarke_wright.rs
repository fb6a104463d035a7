//! Clarke-Wright savings algorithm, adapted to pickup-and-delivery pairs.
//!
//! Starts with one route per pair `[p, d]` instead of one route per node —
//! every starting route already satisfies precedence, so only capacity and
//! time windows need checking as routes merge. Savings are computed between
//! route endpoints rather than between individual customers: merging is a
//! whole-route concatenation, gated by the single-route feasibility check
//! (spec §4.3).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use crate::insertion::is_feasible_route;
use crate::model::{Instance, Route, Solution};

struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Builds a solution by the pair-aware Clarke-Wright savings algorithm.
///
/// Every pair starts in its own route. Routes are merged end-to-end in
/// decreasing order of savings, accepting a merge only if the concatenated
/// route passes the single-route feasibility check. Both concatenation
/// directions (`i` before `j`, `j` before `i`) are attempted.
///
/// # Examples
///
/// ```
/// use pdptw_solver::constructive::clarke_wright_savings;
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let solution = clarke_wright_savings(&instance);
/// assert_eq!(solution.num_served(), 2);
/// ```
pub fn clarke_wright_savings(instance: &Instance) -> Solution {
    let pairs = instance.pairs();
    let mut solution = Solution::new(instance.name());
    if pairs.is_empty() {
        return solution;
    }

    let depot = instance.depot().idx();
    let mut route_of: Vec<usize> = (0..pairs.len()).collect();
    let mut members: Vec<Vec<usize>> = pairs.iter().map(|&(p, d)| vec![p, d]).collect();
    let mut alive = vec![true; pairs.len()];

    let last = |m: &[usize]| *m.last().unwrap();
    let first = |m: &[usize]| m[0];

    let mut savings = Vec::new();
    for i in 0..pairs.len() {
        for j in 0..pairs.len() {
            if i == j {
                continue;
            }
            let tail_i = last(&members[i]);
            let head_j = first(&members[j]);
            let s = instance.travel_time(tail_i, depot) + instance.travel_time(depot, head_j)
                - instance.travel_time(tail_i, head_j);
            if s > 0.0 {
                savings.push(Saving { i, j, value: s });
            }
        }
    }
    savings.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj || !alive[ri] || !alive[rj] {
            continue;
        }

        let mut candidate = members[ri].clone();
        candidate.extend_from_slice(&members[rj]);
        if !is_feasible_route(instance, &candidate) {
            continue;
        }

        members[ri] = candidate;
        members[rj] = Vec::new();
        alive[rj] = false;
        for r in route_of.iter_mut() {
            if *r == rj {
                *r = ri;
            }
        }
    }

    for (idx, alive_flag) in alive.iter().enumerate() {
        if *alive_flag && !members[idx].is_empty() {
            let mut route = Route::from_nodes(members[idx].clone());
            crate::insertion::evaluate_route(instance, &mut route);
            solution.add_route(route);
        }
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    fn line_instance() -> Instance {
        // two pairs on a line, generous windows: should merge into one route
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("line", 10, nodes)
    }

    #[test]
    fn merges_compatible_pairs() {
        let inst = line_instance();
        let sol = clarke_wright_savings(&inst);
        assert_eq!(sol.num_served(), 4);
        assert!(sol.num_routes() <= 2);
    }

    #[test]
    fn respects_capacity() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 8, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -8, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 8, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -8, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        let inst = Instance::new("tight-cap", 10, nodes);
        let sol = clarke_wright_savings(&inst);
        assert_eq!(sol.num_served(), 4);
        for route in sol.routes() {
            assert!(crate::insertion::is_feasible_route(&inst, route.nodes()));
        }
    }

    #[test]
    fn empty_instance_yields_empty_solution() {
        let nodes = vec![Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0))];
        let inst = Instance::new("empty", 10, nodes);
        let sol = clarke_wright_savings(&inst);
        assert_eq!(sol.num_routes(), 0);
    }
}
