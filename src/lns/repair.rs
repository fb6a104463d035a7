//! Repair operators (C6): reinsert removed pickup-delivery pairs into a
//! working set of routes.

use crate::insertion::{best_insertion, evaluate_route};
use crate::model::Instance;

/// Which repair operator to apply this iteration. Regret carries its `m`,
/// drawn uniformly from `{2,3,4,5}` per iteration (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOperator {
    Greedy,
    Regret(usize),
}

/// Reinserts every pair in `removed` into `routes` (mutated in place),
/// opening a new route when a pair has no feasible slot anywhere.
pub fn repair(instance: &Instance, routes: &mut Vec<Vec<usize>>, removed: Vec<(usize, usize)>, op: RepairOperator) {
    match op {
        RepairOperator::Greedy => greedy_repair(instance, routes, removed),
        RepairOperator::Regret(m) => regret_repair(instance, routes, removed, m),
    }
}

fn insert_or_open(instance: &Instance, routes: &mut Vec<Vec<usize>>, p: usize, d: usize) {
    let mut best: Option<(usize, usize, usize, f64)> = None;
    for (idx, route) in routes.iter().enumerate() {
        if let Some((i, j, cost)) = best_insertion(instance, route, p, d) {
            if best.map_or(true, |(_, _, _, best_cost)| cost < best_cost) {
                best = Some((idx, i, j, cost));
            }
        }
    }
    match best {
        Some((idx, i, j, _)) => {
            routes[idx].insert(i, p);
            routes[idx].insert(j, d);
        }
        None => routes.push(vec![p, d]),
    }
}

fn greedy_repair(instance: &Instance, routes: &mut Vec<Vec<usize>>, mut removed: Vec<(usize, usize)>) {
    removed.sort_by(|&(p1, _), &(p2, _)| {
        instance
            .node(p1)
            .time_window()
            .etw()
            .partial_cmp(&instance.node(p2).time_window().etw())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (p, d) in removed {
        insert_or_open(instance, routes, p, d);
    }
}

/// For each unrouted pair, the regret value `cost_m - cost_1` over its
/// feasible `(route, i, j)` insertions, and the position of its cheapest.
fn regret_value(
    instance: &Instance,
    routes: &[Vec<usize>],
    p: usize,
    d: usize,
    m: usize,
) -> Option<(f64, usize, usize, usize)> {
    let mut costs: Vec<(usize, usize, usize, f64)> = Vec::new();
    for (idx, route) in routes.iter().enumerate() {
        let len = route.len();
        for i in 0..=len {
            for j in (i + 1)..=(len + 1) {
                if let Some(cost) =
                    crate::insertion::insertion_cost(instance, route, p, d, i, j)
                {
                    costs.push((idx, i, j, cost));
                }
            }
        }
    }
    if costs.is_empty() {
        return None;
    }
    costs.sort_by(|a, b| a.3.partial_cmp(&b.3).unwrap_or(std::cmp::Ordering::Equal));
    let best = costs[0];
    let mth = costs.get(m.saturating_sub(1)).unwrap_or(costs.last().unwrap());
    Some((mth.3 - best.3, best.0, best.1, best.2))
}

fn regret_repair(
    instance: &Instance,
    routes: &mut Vec<Vec<usize>>,
    mut removed: Vec<(usize, usize)>,
    m: usize,
) {
    while !removed.is_empty() {
        let mut best: Option<(usize, f64, usize, usize, usize)> = None; // (removed_idx, regret, route, i, j)
        for (ridx, &(p, d)) in removed.iter().enumerate() {
            match regret_value(instance, routes, p, d, m) {
                Some((regret, route_idx, i, j)) => {
                    if best.map_or(true, |(_, best_regret, ..)| regret > best_regret) {
                        best = Some((ridx, regret, route_idx, i, j));
                    }
                }
                None => {
                    // no feasible slot anywhere: open a dedicated route now.
                    let (p, d) = removed.swap_remove(ridx);
                    routes.push(vec![p, d]);
                    best = None;
                    break;
                }
            }
        }

        if removed.is_empty() {
            break;
        }

        if let Some((ridx, _, route_idx, i, j)) = best {
            let (p, d) = removed.remove(ridx);
            routes[route_idx].insert(i, p);
            routes[route_idx].insert(j, d);
        }
    }
}

/// Re-evaluates timing/distance for every route in `routes`, producing the
/// `Route` objects the rest of the solver expects.
pub fn rebuild_routes(instance: &Instance, routes: Vec<Vec<usize>>) -> Vec<crate::model::Route> {
    routes
        .into_iter()
        .filter(|r| !r.is_empty())
        .map(|nodes| {
            let mut route = crate::model::Route::from_nodes(nodes);
            evaluate_route(instance, &mut route);
            route
        })
        .collect()
}
