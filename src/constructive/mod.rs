//! Constructive heuristics (C4): build an initial, ideally feasible,
//! solution for an instance.

mod clarke_wright;
mod greedy;

pub use clarke_wright::clarke_wright_savings;
pub use greedy::greedy_insertion;

use crate::feasibility;
use crate::model::{Instance, Solution};

/// Target number of routes a constructive solution should aim for, per
/// spec §4.3: `max(5, pairs / 5)`.
pub fn target_route_count(instance: &Instance) -> usize {
    (instance.num_pairs() / 5).max(5)
}

/// Runs both constructive heuristics and returns the one closer to
/// feasibility, then closer to the target route count, then shorter.
///
/// If neither produces a feasible solution the caller is expected to run a
/// short repair LNS pass (spec §4.3); this function still returns its best
/// attempt so that pass has something to work from.
///
/// # Examples
///
/// ```
/// use pdptw_solver::constructive::build_initial_solution;
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let solution = build_initial_solution(&instance);
/// assert_eq!(solution.num_served(), 2);
/// ```
pub fn build_initial_solution(instance: &Instance) -> Solution {
    let cw = clarke_wright_savings(instance);
    let gr = greedy_insertion(instance);
    let target = target_route_count(instance);

    let cw_feasible = feasibility::check_solution(instance, &cw).0;
    let gr_feasible = feasibility::check_solution(instance, &gr).0;

    match (cw_feasible, gr_feasible) {
        (true, false) => cw,
        (false, true) => gr,
        _ => {
            let cw_gap = (cw.num_routes() as i64 - target as i64).abs();
            let gr_gap = (gr.num_routes() as i64 - target as i64).abs();
            if cw_gap != gr_gap {
                if cw_gap < gr_gap {
                    cw
                } else {
                    gr
                }
            } else if cw.total_distance() <= gr.total_distance() {
                cw
            } else {
                gr
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    #[test]
    fn builds_feasible_solution_when_possible() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        let inst = Instance::new("demo", 10, nodes);
        let sol = build_initial_solution(&inst);
        assert!(feasibility::check_solution(&inst, &sol).0);
        assert_eq!(sol.num_served(), 4);
    }

    #[test]
    fn target_route_count_has_a_floor() {
        let nodes = vec![Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0))];
        let inst = Instance::new("empty", 10, nodes);
        assert_eq!(target_route_count(&inst), 5);
    }
}
