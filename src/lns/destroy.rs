//! Destroy operators (C6): remove pickup-delivery pairs from a working set
//! of routes. Operates on pairs, never isolated nodes, so the set of
//! removed requests can always be fully reinserted.
//!
//! # Reference
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

use rand::Rng;

use crate::insertion::route_distance;
use crate::model::Instance;

/// Which destroy operator to apply this iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOperator {
    Random,
    Shaw,
    Worst,
}

impl DestroyOperator {
    /// The three operators, in round-robin order.
    pub const ALL: [DestroyOperator; 3] =
        [DestroyOperator::Random, DestroyOperator::Shaw, DestroyOperator::Worst];
}

/// Removes `k` pairs from `routes` (mutated in place) using `op`, returning
/// the removed `(pickup, delivery)` pairs. `k` is clamped to the number of
/// pairs currently present.
pub fn destroy<R: Rng>(
    instance: &Instance,
    routes: &mut Vec<Vec<usize>>,
    op: DestroyOperator,
    k: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let present = present_pairs(instance, routes);
    let k = k.min(present.len());
    if k == 0 {
        return Vec::new();
    }

    let chosen = match op {
        DestroyOperator::Random => random_removal(&present, k, rng),
        DestroyOperator::Shaw => shaw_removal(instance, routes, &present, k, rng),
        DestroyOperator::Worst => worst_removal(instance, routes, &present, k),
    };

    for &(p, d) in &chosen {
        remove_from_routes(routes, p, d);
    }
    chosen
}

fn present_pairs(instance: &Instance, routes: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let placed: std::collections::HashSet<usize> = routes.iter().flatten().copied().collect();
    instance
        .pairs()
        .into_iter()
        .filter(|&(p, _)| placed.contains(&p))
        .collect()
}

fn remove_from_routes(routes: &mut Vec<Vec<usize>>, p: usize, d: usize) {
    for route in routes.iter_mut() {
        route.retain(|&n| n != p && n != d);
    }
}

fn random_removal<R: Rng>(present: &[(usize, usize)], k: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let mut pool = present.to_vec();
    let mut chosen = Vec::with_capacity(k);
    for _ in 0..k {
        if pool.is_empty() {
            break;
        }
        let idx = rng.random_range(0..pool.len());
        chosen.push(pool.swap_remove(idx));
    }
    chosen
}

fn route_index_of(routes: &[Vec<usize>], node: usize) -> Option<usize> {
    routes.iter().position(|r| r.contains(&node))
}

/// Relatedness of two pairs: weighted combination of pickup-to-pickup travel
/// time (normalized by the depot's time-window span), time-window overlap
/// ratio, and a same-route indicator. Weights 0.5/0.3/0.2 per spec §4.5;
/// lower is more related.
fn relatedness(instance: &Instance, routes: &[Vec<usize>], a: (usize, usize), b: (usize, usize)) -> f64 {
    let depot_span = (instance.depot().time_window().ltw() - instance.depot().time_window().etw())
        .max(1e-9);
    let travel = instance.travel_time(a.0, b.0) / depot_span;

    let wa = instance.node(a.0).time_window();
    let wb = instance.node(b.0).time_window();
    let overlap = (wa.ltw().min(wb.ltw()) - wa.etw().max(wb.etw())).max(0.0);
    let union = (wa.ltw().max(wb.ltw()) - wa.etw().min(wb.etw())).max(1e-9);
    let overlap_ratio = 1.0 - (overlap / union);

    let same_route = match (route_index_of(routes, a.0), route_index_of(routes, b.0)) {
        (Some(ra), Some(rb)) => {
            if ra == rb {
                0.0
            } else {
                1.0
            }
        }
        _ => 1.0,
    };

    0.5 * travel + 0.3 * overlap_ratio + 0.2 * same_route
}

fn shaw_removal<R: Rng>(
    instance: &Instance,
    routes: &[Vec<usize>],
    present: &[(usize, usize)],
    k: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let mut remaining = present.to_vec();
    if remaining.is_empty() {
        return Vec::new();
    }
    let seed_idx = rng.random_range(0..remaining.len());
    let mut removed = vec![remaining.swap_remove(seed_idx)];

    while removed.len() < k && !remaining.is_empty() {
        let reference = removed[rng.random_range(0..removed.len())];
        let (best_idx, _) = remaining
            .iter()
            .enumerate()
            .map(|(idx, &cand)| (idx, relatedness(instance, routes, reference, cand)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .expect("remaining is non-empty");
        removed.push(remaining.swap_remove(best_idx));
    }

    removed
}

fn worst_removal(
    instance: &Instance,
    routes: &[Vec<usize>],
    present: &[(usize, usize)],
    k: usize,
) -> Vec<(usize, usize)> {
    let mut ranked: Vec<(f64, (usize, usize))> = present
        .iter()
        .map(|&(p, d)| {
            let ri = route_index_of(routes, p);
            let saving = match ri {
                Some(idx) => {
                    let with = route_distance(instance, &routes[idx]);
                    let without: Vec<usize> =
                        routes[idx].iter().copied().filter(|&n| n != p && n != d).collect();
                    let without_dist = route_distance(instance, &without);
                    with - without_dist
                }
                None => 0.0,
            };
            (saving, (p, d))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().take(k).map(|(_, pair)| pair).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};
    use rand::SeedableRng;

    fn instance() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 500.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 500.0), 0.0, 1),
            Node::new(3, 10.0, 10.0, 5, TimeWindow::new(0.0, 500.0), 0.0, 4),
            Node::new(4, 11.0, 10.0, -5, TimeWindow::new(0.0, 500.0), 0.0, 3),
        ];
        Instance::new("demo", 10, nodes)
    }

    #[test]
    fn random_removal_removes_k_pairs() {
        let inst = instance();
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let removed = destroy(&inst, &mut routes, DestroyOperator::Random, 1, &mut rng);
        assert_eq!(removed.len(), 1);
        let remaining: usize = routes.iter().map(|r| r.len()).sum();
        assert_eq!(remaining, 2);
    }

    #[test]
    fn worst_removal_targets_costliest_pair() {
        let inst = instance();
        let mut routes = vec![vec![1, 2, 3, 4]];
        let removed = worst_removal(&inst, &routes.clone(), &present_pairs(&inst, &routes), 1);
        assert_eq!(removed.len(), 1);
        remove_from_routes(&mut routes, removed[0].0, removed[0].1);
        assert_eq!(routes[0].len(), 2);
    }

    #[test]
    fn shaw_removal_returns_k_related_pairs() {
        let inst = instance();
        let routes = vec![vec![1, 2], vec![3, 4]];
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let present = present_pairs(&inst, &routes);
        let removed = shaw_removal(&inst, &routes, &present, 2, &mut rng);
        assert_eq!(removed.len(), 2);
    }
}
