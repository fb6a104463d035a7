//! Relocate: move one node to another position, within a route or across
//! two routes. Both variants are oracle-gated — an inter-route relocate
//! that moves a pickup without its delivery is simply rejected by the
//! feasibility check on the destination route (the source route becomes
//! infeasible too, but since both routes are rescanned the move is only
//! taken when both came out feasible).

use crate::insertion::{is_feasible_route, route_distance};
use crate::model::Instance;

/// Best-improvement intra-route relocate: move one node to a different
/// position in the same route. Returns `true` if changed.
pub fn improve_intra(instance: &Instance, nodes: &mut Vec<usize>) -> bool {
    let mut changed = false;
    loop {
        let len = nodes.len();
        if len < 2 {
            return changed;
        }
        let current = route_distance(instance, nodes);
        let mut best: Option<(usize, usize, f64)> = None;

        for from in 0..len {
            for to in 0..=len {
                if to == from || to == from + 1 {
                    continue;
                }
                let mut candidate = nodes.clone();
                let node = candidate.remove(from);
                let insert_at = if to > from { to - 1 } else { to };
                candidate.insert(insert_at, node);
                if is_feasible_route(instance, &candidate) {
                    let delta = route_distance(instance, &candidate) - current;
                    if delta < -1e-10 && best.map_or(true, |(_, _, best_delta)| delta < best_delta) {
                        best = Some((from, to, delta));
                    }
                }
            }
        }

        match best {
            Some((from, to, _)) => {
                let node = nodes.remove(from);
                let insert_at = if to > from { to - 1 } else { to };
                nodes.insert(insert_at, node);
                changed = true;
            }
            None => return changed,
        }
    }
}

/// Best-improvement inter-route relocate: move one node from `a` to `b`.
/// Both routes are re-scanned; the move is applied only if both come out
/// feasible and the combined distance strictly improves. Returns `true` if
/// changed.
pub fn improve_inter(instance: &Instance, a: &mut Vec<usize>, b: &mut Vec<usize>) -> bool {
    let mut changed = false;
    loop {
        let current = route_distance(instance, a) + route_distance(instance, b);
        let mut best: Option<(usize, usize, f64)> = None;

        for from in 0..a.len() {
            for to in 0..=b.len() {
                let mut cand_a = a.clone();
                let node = cand_a.remove(from);
                let mut cand_b = b.clone();
                cand_b.insert(to, node);

                if is_feasible_route(instance, &cand_a) && is_feasible_route(instance, &cand_b) {
                    let delta =
                        route_distance(instance, &cand_a) + route_distance(instance, &cand_b) - current;
                    if delta < -1e-10 && best.map_or(true, |(_, _, best_delta)| delta < best_delta) {
                        best = Some((from, to, delta));
                    }
                }
            }
        }

        match best {
            Some((from, to, _)) => {
                let node = a.remove(from);
                b.insert(to, node);
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
        assert!(is_feasible_route(&inst, &route));
    }

    #[test]
    fn inter_keeps_both_routes_feasible() {
        let inst = loose_instance();
        let mut a = vec![1, 2];
        let mut b = vec![3, 4];
        improve_inter(&inst, &mut a, &mut b);
        assert!(is_feasible_route(&inst, &a));
        assert!(is_feasible_route(&inst, &b));
    }
}
