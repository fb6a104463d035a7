//! Local-search operators (C5): 2-opt, relocate, exchange, each a
//! best-improvement move that must preserve feasibility. The driver loops
//! through all five operators until a full sweep yields no improvement, or a
//! time budget elapses.

mod exchange;
mod relocate;
mod two_opt;

use std::time::{Duration, Instant};

use crate::insertion::evaluate_route;
use crate::model::{Instance, Solution};

/// Runs a full local-search sweep over `solution`, repeating until no
/// operator improves any route pair, or `budget` elapses. Mutates
/// `solution`'s routes in place and re-evaluates their distance/timing
/// before returning.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pdptw_solver::constructive::build_initial_solution;
/// use pdptw_solver::local_search::run;
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let mut solution = build_initial_solution(&instance);
/// run(&instance, &mut solution, Duration::from_millis(50));
/// ```
pub fn run(instance: &Instance, solution: &mut Solution, budget: Duration) {
    let deadline = Instant::now() + budget;

    loop {
        if Instant::now() >= deadline {
            return;
        }
        let mut improved = false;

        for route in solution.routes_mut() {
            let mut nodes = route.nodes().to_vec();
            if two_opt::improve_route(instance, &mut nodes) {
                improved = true;
            }
            if relocate::improve_intra(instance, &mut nodes) {
                improved = true;
            }
            if exchange::improve_intra(instance, &mut nodes) {
                improved = true;
            }
            *route.nodes_mut() = nodes;
            evaluate_route(instance, route);
        }

        if Instant::now() >= deadline {
            solution.remove_empty_routes();
            return;
        }

        let n = solution.routes().len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = solution.routes_mut().split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                let mut a_nodes = a.nodes().to_vec();
                let mut b_nodes = b.nodes().to_vec();

                if relocate::improve_inter(instance, &mut a_nodes, &mut b_nodes) {
                    improved = true;
                }
                if exchange::improve_inter(instance, &mut a_nodes, &mut b_nodes) {
                    improved = true;
                }

                *a.nodes_mut() = a_nodes;
                *b.nodes_mut() = b_nodes;
                evaluate_route(instance, a);
                evaluate_route(instance, b);
            }
        }

        solution.remove_empty_routes();
        if !improved {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility;
    use crate::model::{Node, TimeWindow};

    fn loose_instance() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 1.0, 1.0, 3, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 2.0, 1.0, -3, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("loose", 10, nodes)
    }

    #[test]
    fn sweep_never_worsens_and_stays_feasible() {
        let inst = loose_instance();
        let mut sol = crate::model::Solution::new("loose");
        sol.add_route(crate::model::Route::from_nodes(vec![1, 2]));
        sol.add_route(crate::model::Route::from_nodes(vec![3, 4]));
        feasibility::evaluate_solution(&inst, &mut sol);
        let before = sol.total_distance();

        run(&inst, &mut sol, Duration::from_millis(200));

        assert!(sol.total_distance() <= before + 1e-10);
        assert!(feasibility::check_solution(&inst, &sol).0);
        assert_eq!(sol.num_served(), 4);
    }
}
