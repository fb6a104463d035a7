//! Exchange: swap two node positions, within a route or across two routes.

use crate::insertion::{is_feasible_route, route_distance};
use crate::model::Instance;

/// Best-improvement intra-route exchange: swap two positions in the same
/// route. Returns `true` if changed.
pub fn improve_intra(instance: &Instance, nodes: &mut Vec<usize>) -> bool {
    let mut changed = false;
    loop {
        let len = nodes.len();
        if len < 2 {
            return changed;
        }
        let current = route_distance(instance, nodes);
        let mut best: Option<(usize, usize, f64)> = None;

        for i in 0..len {
            for j in (i + 1)..len {
                nodes.swap(i, j);
                if is_feasible_route(instance, nodes) {
                    let delta = route_distance(instance, nodes) - current;
                    if delta < -1e-10 && best.map_or(true, |(_, _, best_delta)| delta < best_delta) {
                        best = Some((i, j, delta));
                    }
                }
                nodes.swap(i, j);
            }
        }

        match best {
            Some((i, j, _)) => {
                nodes.swap(i, j);
                changed = true;
            }
            None => return changed,
        }
    }
}

/// Best-improvement inter-route exchange: swap one node from `a` with one
/// from `b`. Returns `true` if changed.
pub fn improve_inter(instance: &Instance, a: &mut Vec<usize>, b: &mut Vec<usize>) -> bool {
    let mut changed = false;
    loop {
        let current = route_distance(instance, a) + route_distance(instance, b);
        let mut best: Option<(usize, usize, f64)> = None;

        for i in 0..a.len() {
            for j in 0..b.len() {
                let mut cand_a = a.clone();
                let mut cand_b = b.clone();
                std::mem::swap(&mut cand_a[i], &mut cand_b[j]);

                if is_feasible_route(instance, &cand_a) && is_feasible_route(instance, &cand_b) {
                    let delta =
                        route_distance(instance, &cand_a) + route_distance(instance, &cand_b) - current;
                    if delta < -1e-10 && best.map_or(true, |(_, _, best_delta)| delta < best_delta) {
                        best = Some((i, j, delta));
                    }
                }
            }
        }

        match best {
            Some((i, j, _)) => {
                std::mem::swap(&mut a[i], &mut b[j]);
                changed = true;
            }
            None => return changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn intra_never_worsens() {
        let inst = loose_instance();
        let mut route = vec![1, 3, 2, 4];
        let before = route_distance(&inst, &route);
        improve_intra(&inst, &mut route);
        assert!(route_distance(&inst, &route) <= before + 1e-10);
    }

    #[test]
    fn inter_keeps_both_feasible() {
        let inst = loose_instance();
        let mut a = vec![1, 2];
        let mut b = vec![3, 4];
        improve_inter(&inst, &mut a, &mut b);
        assert!(is_feasible_route(&inst, &a));
        assert!(is_feasible_route(&inst, &b));
    }
}
