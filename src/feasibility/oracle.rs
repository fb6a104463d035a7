//! The feasibility oracle (C2): the single source of truth for whether a
//! route or solution satisfies precedence, capacity, and time-window
//! constraints.
//!
//! Scans a route left to right exactly once, maintaining `time`, `load`, and
//! the set of pickups seen so far — the procedure in spec §4.1. Every other
//! component that needs a feasibility answer (the insertion kernel, local
//! search, LNS acceptance) goes through `scan_route` or `check_solution`
//! rather than reimplementing the scan.

use std::collections::HashSet;

use crate::model::{Instance, Route, Solution, Visit};

/// A single constraint violation, named the way the scan found it.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Arrival at `node` exceeds its time window's `ltw`.
    TimeWindow { node: usize, arrival: f64, ltw: f64 },
    /// `delivery`'s paired pickup had not been visited yet in this route.
    Precedence { delivery: usize, pickup: usize },
    /// Running load in route `route_index` exceeded capacity or went
    /// negative.
    Capacity {
        route_index: usize,
        load: i32,
        capacity: i32,
    },
    /// Return to the depot in route `route_index` arrived after the depot's
    /// closing time.
    DepotReturn {
        route_index: usize,
        time: f64,
        ltw: f64,
    },
    /// `node` appears in more than one route (or twice in the same route).
    Duplicate { node: usize },
    /// `node` appears in no route.
    Missing { node: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::TimeWindow { node, arrival, ltw } => {
                write!(f, "node {node}: arrival {arrival} exceeds time window close {ltw}")
            }
            Violation::Precedence { delivery, pickup } => {
                write!(f, "delivery {delivery} precedes its pickup {pickup}")
            }
            Violation::Capacity {
                route_index,
                load,
                capacity,
            } => write!(
                f,
                "route {route_index}: load {load} exceeds capacity {capacity}"
            ),
            Violation::DepotReturn {
                route_index,
                time,
                ltw,
            } => write!(
                f,
                "route {route_index}: depot return at {time} exceeds depot close {ltw}"
            ),
            Violation::Duplicate { node } => write!(f, "node {node} visited more than once"),
            Violation::Missing { node } => write!(f, "node {node} not visited"),
        }
    }
}

/// The outcome of scanning a single route: per-visit timing/load, aggregate
/// distance/duration, and any violations found along the way.
#[derive(Debug, Clone)]
pub struct RouteScan {
    /// Per-node timing and cumulative load.
    pub visits: Vec<Visit>,
    /// Total travel distance (depot → first, hops, last → depot).
    pub distance: f64,
    /// Time of return to the depot.
    pub duration: f64,
    /// Violations found while scanning.
    pub violations: Vec<Violation>,
}

impl RouteScan {
    /// `true` iff no violations were recorded.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Scans `route` left to right per spec §4.1, producing timing, load, and
/// any violations. `route_index` is only used to tag `Capacity`/`DepotReturn`
/// violations; pass `0` when scanning a route in isolation.
pub fn scan_route(instance: &Instance, route: &[usize], route_index: usize) -> RouteScan {
    let depot = instance.depot().idx();
    let mut visits = Vec::with_capacity(route.len());
    let mut violations = Vec::new();

    let mut time = 0.0;
    let mut load: i32 = 0;
    let mut distance = 0.0;
    let mut visited_pickups: HashSet<usize> = HashSet::new();
    let mut prev = depot;

    for &v in route {
        let travel = instance.travel_time(prev, v);
        distance += travel;
        time += travel;

        let node = instance.node(v);
        let arrival = time.max(node.time_window().etw());
        if node.time_window().is_violated(time) {
            violations.push(Violation::TimeWindow {
                node: v,
                arrival: time,
                ltw: node.time_window().ltw(),
            });
        }

        if node.is_delivery() && !visited_pickups.contains(&node.pair()) {
            violations.push(Violation::Precedence {
                delivery: v,
                pickup: node.pair(),
            });
        }

        load += node.demand();
        if load > instance.capacity() || load < 0 {
            violations.push(Violation::Capacity {
                route_index,
                load,
                capacity: instance.capacity(),
            });
        }

        if node.is_pickup() {
            visited_pickups.insert(v);
        }

        let departure = arrival + node.dur();
        visits.push(Visit {
            node: v,
            arrival_time: time,
            departure_time: departure,
            load_after: load,
        });

        time = departure;
        prev = v;
    }

    let return_travel = instance.travel_time(prev, depot);
    distance += return_travel;
    let duration = time + return_travel;
    if duration > instance.depot().time_window().ltw() {
        violations.push(Violation::DepotReturn {
            route_index,
            time: duration,
            ltw: instance.depot().time_window().ltw(),
        });
    }

    RouteScan {
        visits,
        distance,
        duration,
        violations,
    }
}

/// Checks a single route in isolation (the C3 "single-route variant" of
/// this oracle).
pub fn is_feasible_route(instance: &Instance, route: &[usize]) -> bool {
    scan_route(instance, route, 0).is_feasible()
}

/// Checks an entire solution: every route's within-route constraints, plus
/// the cross-route invariant that every non-depot node appears in exactly
/// one route exactly once.
pub fn check_solution(instance: &Instance, solution: &Solution) -> (bool, Vec<Violation>) {
    let mut violations = Vec::new();
    let mut seen = vec![0u32; instance.n()];

    for (idx, route) in solution.routes().iter().enumerate() {
        let scan = scan_route(instance, route.nodes(), idx);
        violations.extend(scan.violations);
        for &v in route.nodes() {
            seen[v] += 1;
        }
    }

    for v in 1..instance.n() {
        match seen[v] {
            0 => violations.push(Violation::Missing { node: v }),
            1 => {}
            _ => violations.push(Violation::Duplicate { node: v }),
        }
    }

    (violations.is_empty(), violations)
}

/// Re-evaluates and stores timing/distance on every route of `solution`,
/// without checking feasibility. Useful after construction/repair before a
/// feasibility check or cost read.
pub fn evaluate_solution(instance: &Instance, solution: &mut Solution) {
    for route in solution.routes_mut() {
        let scan = scan_route(instance, route.nodes(), 0);
        route.set_evaluation(scan.visits, scan.distance, scan.duration);
    }
}

/// Convenience: checks a solution's routes and refreshes their evaluated
/// state in the same pass. Used wherever a caller needs both an up-to-date
/// `total_distance()` and a feasibility verdict (e.g. the final validation
/// pass of spec §7).
pub fn evaluate_and_check(instance: &Instance, solution: &mut Solution) -> (bool, Vec<Violation>) {
    let mut violations = Vec::new();
    let mut seen = vec![0u32; instance.n()];

    for (idx, route) in solution.routes_mut().iter_mut().enumerate() {
        let scan = scan_route(instance, route.nodes(), idx);
        violations.extend(scan.violations.clone());
        for &v in route.nodes() {
            seen[v] += 1;
        }
        route.set_evaluation(scan.visits, scan.distance, scan.duration);
    }

    for v in 1..instance.n() {
        match seen[v] {
            0 => violations.push(Violation::Missing { node: v }),
            1 => {}
            _ => violations.push(Violation::Duplicate { node: v }),
        }
    }

    (violations.is_empty(), violations)
}

/// `route` dereferenced for scanning only (used by route-building helpers
/// that hand the oracle a freshly assembled `Route` rather than a bare slice).
pub fn scan(instance: &Instance, route: &Route, route_index: usize) -> RouteScan {
    scan_route(instance, route.nodes(), route_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    fn two_pair_instance() -> Instance {
        // depot origin; pickup A (10,0) tight window [0,10]; delivery A' (20,0) [0,60]
        // pickup B (0,10) tight window [0,10]; delivery B' (0,20) [0,60]
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 10.0, 0.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 2),
            Node::new(2, 20.0, 0.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 1),
            Node::new(3, 0.0, 10.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 4),
            Node::new(4, 0.0, 20.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 3),
        ];
        Instance::new("tight", 1, nodes)
    }

    #[test]
    fn feasible_single_pair_route() {
        let inst = two_pair_instance();
        assert!(is_feasible_route(&inst, &[1, 2]));
    }

    #[test]
    fn precedence_violation_detected() {
        let inst = two_pair_instance();
        let scan = scan_route(&inst, &[2, 1], 0);
        assert!(!scan.is_feasible());
        assert!(scan
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Precedence { .. })));
    }

    #[test]
    fn capacity_violation_detected() {
        let inst = two_pair_instance();
        // both pickups before either delivery: load goes to 2 > capacity 1
        let scan = scan_route(&inst, &[1, 3, 2, 4], 0);
        assert!(scan
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Capacity { .. })));
    }

    #[test]
    fn time_window_forces_separate_routes() {
        let inst = two_pair_instance();
        // serving both pairs in one route blows pickup B's window (arrival > 10)
        let scan = scan_route(&inst, &[1, 2, 3, 4], 0);
        assert!(scan
            .violations
            .iter()
            .any(|v| matches!(v, Violation::TimeWindow { .. })));
        assert!(is_feasible_route(&inst, &[1, 2]));
        assert!(is_feasible_route(&inst, &[3, 4]));
    }

    #[test]
    fn solution_duplicate_and_missing_detected() {
        let inst = two_pair_instance();
        let mut sol = Solution::new("tight");
        sol.add_route(crate::model::Route::from_nodes(vec![1, 2]));
        sol.add_route(crate::model::Route::from_nodes(vec![1, 2])); // duplicate, 3/4 missing
        let (feasible, violations) = check_solution(&inst, &sol);
        assert!(!feasible);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::Duplicate { node: 1 })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::Missing { node: 3 })));
    }

    #[test]
    fn solution_two_separate_routes_feasible() {
        let inst = two_pair_instance();
        let mut sol = Solution::new("tight");
        sol.add_route(crate::model::Route::from_nodes(vec![1, 2]));
        sol.add_route(crate::model::Route::from_nodes(vec![3, 4]));
        let (feasible, violations) = check_solution(&inst, &sol);
        assert!(feasible, "{violations:?}");
        assert_eq!(sol.num_routes(), 2);
    }
}
