//! AGES: vehicle-reduction route merge (spec §4.6).
//!
//! Repeatedly tries to concatenate two routes end-to-end, preferring the two
//! smallest routes first. Accepts a merge only if the concatenation passes
//! the single-route feasibility check and reduces the route count.

use crate::feasibility::is_feasible_route;
use crate::model::Instance;

const MAX_FAILED_ATTEMPTS: usize = 50;
const MAX_NO_IMPROVEMENT: usize = 200;

/// Attempts to merge routes in `routes` (mutated in place) until no more
/// merges succeed within the failed-attempt/no-improvement bounds.
pub fn merge(instance: &Instance, routes: &mut Vec<Vec<usize>>) {
    let mut no_improvement = 0;

    while no_improvement < MAX_NO_IMPROVEMENT && routes.len() > 1 {
        routes.sort_by_key(|r| r.len());

        let mut merged = false;
        let mut failed_attempts = 0;
        'search: for a in 0..routes.len() {
            for b in 0..routes.len() {
                if a == b {
                    continue;
                }
                if try_concat(instance, routes, a, b) {
                    merged = true;
                    break 'search;
                }
                failed_attempts += 1;
                if failed_attempts >= MAX_FAILED_ATTEMPTS {
                    break 'search;
                }
            }
        }

        if merged {
            no_improvement = 0;
        } else {
            no_improvement += 1;
            break;
        }
    }
}

/// Tries both concatenation directions of routes `a` and `b`; if either
/// passes the oracle, replaces `a` with the merged route and drops `b`.
fn try_concat(instance: &Instance, routes: &mut Vec<Vec<usize>>, a: usize, b: usize) -> bool {
    let mut forward = routes[a].clone();
    forward.extend_from_slice(&routes[b]);
    if is_feasible_route(instance, &forward) {
        routes[a] = forward;
        routes.remove(b);
        return true;
    }

    let mut backward = routes[b].clone();
    backward.extend_from_slice(&routes[a]);
    if is_feasible_route(instance, &backward) {
        routes[a] = backward;
        routes.remove(b);
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    #[test]
    fn merges_when_concatenation_feasible() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        let inst = Instance::new("demo", 10, nodes);
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        merge(&inst, &mut routes);
        assert_eq!(routes.len(), 1);
        assert!(is_feasible_route(&inst, &routes[0]));
    }

    #[test]
    fn leaves_incompatible_routes_alone() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 10.0, 0.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 2),
            Node::new(2, 20.0, 0.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 1),
            Node::new(3, 0.0, 10.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 4),
            Node::new(4, 0.0, 20.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 3),
        ];
        let inst = Instance::new("tight", 1, nodes);
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        merge(&inst, &mut routes);
        assert_eq!(routes.len(), 2);
    }
}
