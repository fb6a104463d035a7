//! Direct route elimination (spec §4.6): repeatedly pick the smallest
//! active route, remove its pairs, and try to reinsert them elsewhere with
//! a regret-2 strategy. Reverts on any failure.

use crate::feasibility::is_feasible_route;
use crate::lns::{repair, RepairOperator};
use crate::model::Instance;

/// Eliminates routes from `routes` (mutated in place) until an elimination
/// attempt fails, at which point the pre-attempt state is restored and
/// elimination stops.
pub fn eliminate(instance: &Instance, routes: &mut Vec<Vec<usize>>) {
    loop {
        if routes.len() <= 1 {
            return;
        }
        let before = routes.clone();

        let (smallest_idx, _) = routes
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.len())
            .expect("routes is non-empty");

        let victim = routes.remove(smallest_idx);
        let pairs: Vec<(usize, usize)> = victim
            .iter()
            .copied()
            .filter(|&n| instance.node(n).is_pickup())
            .map(|p| (p, instance.node(p).pair()))
            .collect();

        repair::repair(instance, routes, pairs, RepairOperator::Regret(2));

        let all_feasible = routes.iter().all(|r| is_feasible_route(instance, r));
        let reduced = routes.len() < before.len();
        if !all_feasible || !reduced {
            *routes = before;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};

    #[test]
    fn eliminates_when_reinsertion_succeeds() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        let inst = Instance::new("demo", 10, nodes);
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        eliminate(&inst, &mut routes);
        let placed: usize = routes.iter().map(|r| r.len()).sum();
        assert_eq!(placed, 4);
        for route in &routes {
            assert!(is_feasible_route(&inst, route));
        }
    }

    #[test]
    fn stops_when_reinsertion_infeasible() {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 10.0, 0.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 2),
            Node::new(2, 20.0, 0.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 1),
            Node::new(3, 0.0, 10.0, 1, TimeWindow::new(0.0, 10.0), 0.0, 4),
            Node::new(4, 0.0, 20.0, -1, TimeWindow::new(0.0, 60.0), 0.0, 3),
        ];
        let inst = Instance::new("tight", 1, nodes);
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        eliminate(&inst, &mut routes);
        assert_eq!(routes.len(), 2);
        let placed: usize = routes.iter().map(|r| r.len()).sum();
        assert_eq!(placed, 4);
    }
}
