//! Greedy insertion construction (fallback to Clarke-Wright).
//!
//! Processes pairs one at a time, ordered by the pickup's earliest time
//! window, and inserts each at the cheapest feasible position across all
//! current routes. Opens a new route when no feasible insertion exists.

use crate::insertion::best_insertion;
use crate::model::{Instance, Route, Solution};

/// Builds a solution by greedy pair insertion.
///
/// # Examples
///
/// ```
/// use pdptw_solver::constructive::greedy_insertion;
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let solution = greedy_insertion(&instance);
/// assert_eq!(solution.num_served(), 2);
/// ```
pub fn greedy_insertion(instance: &Instance) -> Solution {
    let mut pairs = instance.pairs();
    pairs.sort_by(|&(p1, _), &(p2, _)| {
        instance
            .node(p1)
            .time_window()
            .etw()
            .partial_cmp(&instance.node(p2).time_window().etw())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut routes: Vec<Route> = Vec::new();

    for (p, d) in pairs {
        let mut best: Option<(usize, usize, usize, f64)> = None; // (route_idx, i, j, cost)
        for (r_idx, route) in routes.iter().enumerate() {
            if let Some((i, j, cost)) = best_insertion(instance, route.nodes(), p, d) {
                if best.map_or(true, |(_, _, _, best_cost)| cost < best_cost) {
                    best = Some((r_idx, i, j, cost));
                }
            }
        }

        match best {
            Some((r_idx, i, j, _)) => {
                let nodes = routes[r_idx].nodes_mut();
                nodes.insert(i, p);
                nodes.insert(j, d);
                crate::insertion::evaluate_route(instance, &mut routes[r_idx]);
            }
            None => {
                let mut route = Route::from_nodes(vec![p, d]);
                crate::insertion::evaluate_route(instance, &mut route);
                routes.push(route);
            }
        }
    }

    let mut solution = Solution::new(instance.name());
    solution.set_routes(routes);
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    #[test]
    fn opens_new_route_when_no_feasible_slot() {
        // tight windows force two pairs apart
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 10.0, 0.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 2),
            Node::new(2, 20.0, 0.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 1),
            Node::new(3, 0.0, 10.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 4),
            Node::new(4, 0.0, 20.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 3),
        ];
        let inst = Instance::new("tight", 1, nodes);
        let sol = greedy_insertion(&inst);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 4);
    }

    #[test]
    fn merges_when_feasible() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        let inst = Instance::new("loose", 10, nodes);
        let sol = greedy_insertion(&inst);
        assert_eq!(sol.num_served(), 4);
        for route in sol.routes() {
            assert!(crate::insertion::is_feasible_route(&inst, route.nodes()));
        }
    }
}
