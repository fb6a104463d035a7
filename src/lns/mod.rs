//! The LNS engine (C6): a destroy-repair loop over pickup-delivery pairs,
//! gated by the feasibility oracle and filtered by an acceptance criterion.

mod acceptance;
mod destroy;
pub(crate) mod repair;

pub use acceptance::{Lahc, SimulatedAnnealing};
pub use destroy::DestroyOperator;
pub use repair::{rebuild_routes, RepairOperator};

use std::time::{Duration, Instant};

use rand::Rng;

use crate::feasibility;
use crate::local_search;
use crate::model::{Instance, Solution};

/// Acceptance strategy, chosen once per run (spec §4.5 permits either).
pub enum Acceptance {
    Lahc(Lahc),
    SimulatedAnnealing(SimulatedAnnealing),
}

/// Tunable knobs for an LNS run. Defaults follow spec §4.5.
#[derive(Debug, Clone, Copy)]
pub struct LnsConfig {
    pub k_min: usize,
    pub k_max: usize,
    pub lahc_length: usize,
    pub sa_alpha: f64,
    pub sa_t_min: f64,
    pub sa_cooling_rate: f64,
    pub local_search_every: usize,
    pub local_search_budget: Duration,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            k_min: 10,
            k_max: 60,
            lahc_length: 1000,
            sa_alpha: 0.01,
            sa_t_min: 1e-4,
            sa_cooling_rate: 0.9995,
            local_search_every: 25,
            local_search_budget: Duration::from_millis(100),
        }
    }
}

/// Runs the destroy-repair loop against `solution` for `budget` wall-clock
/// time, returning the best solution found. `use_sa` selects SA
/// vehicles-first acceptance; otherwise LAHC is used.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pdptw_solver::constructive::build_initial_solution;
/// use pdptw_solver::lns::{run, LnsConfig};
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let initial = build_initial_solution(&instance);
/// # use rand::SeedableRng;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let best = run(&instance, initial, Duration::from_millis(50), &LnsConfig::default(), false, &mut rng);
/// assert_eq!(best.num_served(), 2);
/// ```
pub fn run<R: Rng>(
    instance: &Instance,
    initial: Solution,
    budget: Duration,
    config: &LnsConfig,
    use_sa: bool,
    rng: &mut R,
) -> Solution {
    let deadline = Instant::now() + budget;
    let mut current = initial;
    feasibility::evaluate_solution(instance, &mut current);
    let mut best = current.clone();

    let mut acceptance = if use_sa {
        Acceptance::SimulatedAnnealing(SimulatedAnnealing::new(
            config.sa_alpha,
            current.total_distance().max(1.0),
            config.sa_t_min,
            config.sa_cooling_rate,
        ))
    } else {
        Acceptance::Lahc(Lahc::new(config.lahc_length, current.score()))
    };

    let mut iteration = 0usize;
    while Instant::now() < deadline {
        iteration += 1;

        let k = rng.random_range(config.k_min..=config.k_max);
        let destroy_op = DestroyOperator::ALL[iteration % DestroyOperator::ALL.len()];
        let repair_op = if iteration % 2 == 0 {
            RepairOperator::Greedy
        } else {
            let m = rng.random_range(2..=5);
            RepairOperator::Regret(m)
        };

        let mut routes: Vec<Vec<usize>> =
            current.routes().iter().map(|r| r.nodes().to_vec()).collect();
        let removed = destroy::destroy(instance, &mut routes, destroy_op, k, rng);
        repair::repair(instance, &mut routes, removed, repair_op);

        let mut candidate = Solution::new(instance.name());
        candidate.set_routes(repair::rebuild_routes(instance, routes));
        let (feasible, _) = feasibility::check_solution(instance, &candidate);
        if !feasible {
            continue;
        }

        let accept = match &mut acceptance {
            Acceptance::Lahc(lahc) => lahc.accept(candidate.score(), current.score()),
            Acceptance::SimulatedAnnealing(sa) => {
                let accept = sa.accept(candidate.score(), current.score(), rng);
                sa.cool();
                accept
            }
        };

        if accept {
            current = candidate;
            if current.score() < best.score() {
                best = current.clone();
            }
        }

        if iteration % config.local_search_every == 0 {
            local_search::run(instance, &mut current, config.local_search_budget);
            if current.score() < best.score() {
                best = current.clone();
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::build_initial_solution;
    use crate::model::{Node, TimeWindow};
    use rand::SeedableRng;

    fn instance() -> Instance {
        let nodes = vec![
            Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
            Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
            Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
            Node::new(3, 10.0, 10.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 11.0, 10.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("demo", 10, nodes)
    }

    #[test]
    fn lahc_run_stays_feasible_and_never_loses_requests() {
        let inst = instance();
        let initial = build_initial_solution(&inst);
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let best = run(
            &inst,
            initial,
            Duration::from_millis(100),
            &LnsConfig::default(),
            false,
            &mut rng,
        );
        assert_eq!(best.num_served(), 4);
        assert!(feasibility::check_solution(&inst, &best).0);
    }

    #[test]
    fn sa_run_stays_feasible_and_never_loses_requests() {
        let inst = instance();
        let initial = build_initial_solution(&inst);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let best = run(
            &inst,
            initial,
            Duration::from_millis(100),
            &LnsConfig::default(),
            true,
            &mut rng,
        );
        assert_eq!(best.num_served(), 4);
        assert!(feasibility::check_solution(&inst, &best).0);
    }
}
