//! Perturbation operators (spec §4.7 step 7): kick a solution out of a
//! local optimum between ILS iterations. Applied to a bare `Vec<Vec<usize>>`
//! working representation; callers re-check feasibility and revert on
//! failure.

use rand::Rng;

use crate::model::Instance;

/// Perturbs `routes` in place with one of two moves, chosen uniformly:
/// relocating a random pair to a different random route, or swapping
/// segments of length ≤ 2 between two routes. `intensity` scales how many
/// individual perturbation moves are applied.
pub fn perturb<R: Rng>(instance: &Instance, routes: &mut Vec<Vec<usize>>, intensity: usize, rng: &mut R) {
    for _ in 0..intensity.max(1) {
        if routes.len() < 2 {
            return;
        }
        if rng.random_bool(0.5) {
            relocate_random_pair(instance, routes, rng);
        } else {
            swap_segments(routes, rng);
        }
    }
}

fn relocate_random_pair<R: Rng>(instance: &Instance, routes: &mut Vec<Vec<usize>>, rng: &mut R) {
    let source_candidates: Vec<usize> = (0..routes.len()).filter(|&i| !routes[i].is_empty()).collect();
    if source_candidates.is_empty() {
        return;
    }
    let from = source_candidates[rng.random_range(0..source_candidates.len())];

    let pickup_positions: Vec<usize> = (0..routes[from].len())
        .filter(|&pos| instance.node(routes[from][pos]).is_pickup())
        .collect();
    if pickup_positions.is_empty() {
        return;
    }
    let p_pos = pickup_positions[rng.random_range(0..pickup_positions.len())];
    let p = routes[from][p_pos];
    let d = instance.node(p).pair();
    let Some(d_pos) = routes[from].iter().position(|&n| n == d) else {
        return;
    };

    let mut to_candidates: Vec<usize> = (0..routes.len()).filter(|&i| i != from).collect();
    if to_candidates.is_empty() {
        return;
    }
    let to = to_candidates.remove(rng.random_range(0..to_candidates.len()));

    let (first, second) = if p_pos < d_pos { (p_pos, d_pos) } else { (d_pos, p_pos) };
    let second_node = routes[from].remove(second);
    let first_node = routes[from].remove(first);

    let insert_at = rng.random_range(0..=routes[to].len());
    routes[to].insert(insert_at, first_node);
    let insert_at2 = rng.random_range(insert_at + 1..=routes[to].len());
    routes[to].insert(insert_at2, second_node);
}

fn swap_segments<R: Rng>(routes: &mut Vec<Vec<usize>>, rng: &mut R) {
    let candidates: Vec<usize> = (0..routes.len()).filter(|&i| !routes[i].is_empty()).collect();
    if candidates.len() < 2 {
        return;
    }
    let a = candidates[rng.random_range(0..candidates.len())];
    let mut rest: Vec<usize> = candidates.into_iter().filter(|&i| i != a).collect();
    let b = rest.remove(rng.random_range(0..rest.len()));

    let seg_len_a = routes[a].len().min(2);
    let seg_len_b = routes[b].len().min(2);
    let start_a = rng.random_range(0..=(routes[a].len() - seg_len_a));
    let start_b = rng.random_range(0..=(routes[b].len() - seg_len_b));

    let seg_a: Vec<usize> = routes[a][start_a..start_a + seg_len_a].to_vec();
    let seg_b: Vec<usize> = routes[b][start_b..start_b + seg_len_b].to_vec();

    routes[a].splice(start_a..start_a + seg_len_a, seg_b);
    routes[b].splice(start_b..start_b + seg_len_b, seg_a);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, TimeWindow};
    use rand::SeedableRng;

    fn instance() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("demo", 10, nodes)
    }

    #[test]
    fn perturb_preserves_total_node_count() {
        let inst = instance();
        let mut routes = vec![vec![1, 2], vec![3, 4]];
        let total_before: usize = routes.iter().map(|r| r.len()).sum();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        perturb(&inst, &mut routes, 3, &mut rng);
        let total_after: usize = routes.iter().map(|r| r.len()).sum();
        assert_eq!(total_before, total_after);
    }
}
