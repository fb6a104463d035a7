//! Route cost and insertion kernel (C3).
//!
//! Builds directly on the feasibility oracle: `route_distance` and
//! `is_feasible_route` are thin wrappers over `feasibility::scan_route`, and
//! `insertion_cost` evaluates a candidate insertion by scanning the route
//! that would result, so insertion cost and feasibility can never disagree
//! with the oracle.

use crate::feasibility;
use crate::model::{Instance, Route};

/// Total depot-to-depot travel distance of `route` (oracle-consistent;
/// ignores feasibility).
pub fn route_distance(instance: &Instance, route: &[usize]) -> f64 {
    feasibility::scan_route(instance, route, 0).distance
}

/// `true` iff `route` satisfies precedence, capacity, and time-window
/// constraints — the single-route variant of the feasibility oracle.
pub fn is_feasible_route(instance: &Instance, route: &[usize]) -> bool {
    feasibility::is_feasible_route(instance, route)
}

/// Re-scans `route` and stores the resulting timing/distance/duration on it.
pub fn evaluate_route(instance: &Instance, route: &mut Route) {
    let scan = feasibility::scan_route(instance, route.nodes(), 0);
    route.set_evaluation(scan.visits, scan.distance, scan.duration);
}

/// Cost of inserting pickup `p` at position `i` and delivery `d` at position
/// `j` (`j > i`) into `route`, as the distance delta versus `route`
/// unmodified. Returns `None` if the resulting route is infeasible.
///
/// Positions follow spec §4.2: `i` is the index in `route` before which `p`
/// is inserted (`0..=route.len()`), and `j` is the index, in the
/// *already-p-inserted* sequence, before which `d` is inserted
/// (`i+1..=route.len()+1`).
///
/// # Examples
///
/// ```
/// use pdptw_solver::insertion::insertion_cost;
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 100.0), 0.0, 2),
///     Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 100.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let cost = insertion_cost(&instance, &[], 1, 2, 0, 1);
/// assert!(cost.is_some());
/// ```
pub fn insertion_cost(
    instance: &Instance,
    route: &[usize],
    p: usize,
    d: usize,
    i: usize,
    j: usize,
) -> Option<f64> {
    let before = route_distance(instance, route);
    let candidate = build_candidate(route, p, d, i, j);
    let scan = feasibility::scan_route(instance, &candidate, 0);
    if !scan.is_feasible() {
        return None;
    }
    Some(scan.distance - before)
}

/// Inserts `p` at `i` and `d` at `j` (positions in the two-stage sense
/// described on `insertion_cost`) without checking feasibility.
fn build_candidate(route: &[usize], p: usize, d: usize, i: usize, j: usize) -> Vec<usize> {
    let mut candidate = Vec::with_capacity(route.len() + 2);
    candidate.extend_from_slice(&route[..i]);
    candidate.push(p);
    candidate.extend_from_slice(&route[i..]);
    // `j` indexes into `candidate` (length route.len()+1), inserting d before it.
    candidate.insert(j, d);
    candidate
}

/// The cheapest feasible `(i, j, cost)` to insert pair `(p, d)` into `route`,
/// searched over all `0 <= i <= len` and `i < j <= len+1`, or `None` if no
/// feasible insertion exists. Quadratic in route length; acceptable for the
/// route sizes this solver targets (spec §4.2).
pub fn best_insertion(
    instance: &Instance,
    route: &[usize],
    p: usize,
    d: usize,
) -> Option<(usize, usize, f64)> {
    let len = route.len();
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..=len {
        for j in (i + 1)..=(len + 1) {
            if let Some(cost) = insertion_cost(instance, route, p, d, i, j) {
                if best.map_or(true, |(_, _, best_cost)| cost < best_cost) {
                    best = Some((i, j, cost));
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    fn sample_instance() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 0.0, 5.0, 3, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 0.0, 15.0, -3, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("demo", 10, nodes)
    }

    #[test]
    fn route_distance_matches_oracle() {
        let inst = sample_instance();
        let d1 = route_distance(&inst, &[1, 2]);
        let d2 = feasibility::scan_route(&inst, &[1, 2], 0).distance;
        assert!((d1 - d2).abs() < 1e-10);
    }

    #[test]
    fn insertion_into_empty_route() {
        let inst = sample_instance();
        let cost = insertion_cost(&inst, &[], 1, 2, 0, 1);
        assert!(cost.is_some());
        assert!((cost.unwrap() - 20.0).abs() < 1e-10); // 0->1->2->0 = 10+10+20
    }

    #[test]
    fn insertion_infeasible_returns_none() {
        let inst = sample_instance();
        // delivery before pickup is never feasible
        let cost = insertion_cost(&inst, &[], 2, 1, 0, 1);
        assert!(cost.is_none());
    }

    #[test]
    fn best_insertion_finds_cheapest_slot() {
        let inst = sample_instance();
        let route = vec![3, 4];
        let best = best_insertion(&inst, &route, 1, 2);
        assert!(best.is_some());
        let (i, j, cost) = best.unwrap();
        assert!(i < j);
        assert!(cost >= 0.0);
    }

    #[test]
    fn evaluate_route_sets_state() {
        let inst = sample_instance();
        let mut route = Route::from_nodes(vec![1, 2]);
        evaluate_route(&inst, &mut route);
        assert!(route.distance() > 0.0);
        assert_eq!(route.visits().len(), 2);
    }
}
