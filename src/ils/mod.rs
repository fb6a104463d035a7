//! The ILS shell (C7): wraps AGES merge, route elimination, the LNS engine,
//! and the local-search driver into one outer iteration, per spec §4.7.

mod ages;
mod elimination;
mod perturb;

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::feasibility;
use crate::local_search;
use crate::lns::{self, LnsConfig};
use crate::model::{Instance, Route, Score, Solution};

/// Tunable knobs for an ILS run.
#[derive(Debug, Clone)]
pub struct IlsConfig {
    pub max_iterations: usize,
    pub no_improvement_limit: usize,
    pub time_budget: Duration,
    /// Fraction of `time_budget` given to the inner LNS call each iteration.
    pub lns_time_fraction: f64,
    pub perturb_intensity: usize,
    pub use_sa_acceptance: bool,
    pub lns: LnsConfig,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            no_improvement_limit: 100,
            time_budget: Duration::from_secs(10),
            lns_time_fraction: 0.3,
            perturb_intensity: 2,
            use_sa_acceptance: false,
            lns: LnsConfig::default(),
        }
    }
}

/// The outcome of one ILS run: the best feasible solution found, its score,
/// runtime, and iteration count.
#[derive(Debug, Clone)]
pub struct IlsOutcome {
    pub best: Solution,
    pub iterations: usize,
    pub runtime: Duration,
}

/// Runs the ILS shell starting from `initial`, until `config.max_iterations`,
/// `config.time_budget`, or `config.no_improvement_limit` is reached.
///
/// # Examples
///
/// ```
/// use pdptw_solver::constructive::build_initial_solution;
/// use pdptw_solver::ils::{run, IlsConfig};
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 1.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 2),
///     Node::new(2, 2.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// let initial = build_initial_solution(&instance);
/// let mut config = IlsConfig::default();
/// config.max_iterations = 3;
/// config.time_budget = std::time::Duration::from_millis(200);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// # use rand::SeedableRng;
/// let outcome = run(&instance, initial, &config, &mut rng);
/// assert_eq!(outcome.best.num_served(), 2);
/// ```
pub fn run<R: Rng>(instance: &Instance, initial: Solution, config: &IlsConfig, rng: &mut R) -> IlsOutcome {
    let start = Instant::now();
    let deadline = start + config.time_budget;

    let mut current = initial;
    feasibility::evaluate_solution(instance, &mut current);
    let mut best = current.clone();
    let mut no_improvement = 0usize;
    let mut iterations = 0usize;

    let lns_budget = Duration::from_secs_f64(config.time_budget.as_secs_f64() * config.lns_time_fraction);

    while iterations < config.max_iterations
        && Instant::now() < deadline
        && no_improvement < config.no_improvement_limit
    {
        iterations += 1;
        let pre_iteration = current.clone();

        let mut routes: Vec<Vec<usize>> =
            current.routes().iter().map(|r| r.nodes().to_vec()).collect();

        ages::merge(instance, &mut routes);
        elimination::eliminate(instance, &mut routes);

        let mut working = Solution::new(instance.name());
        working.set_routes(rebuild(instance, routes));

        working = lns::run(instance, working, lns_budget, &config.lns, config.use_sa_acceptance, rng);
        local_search::run(instance, &mut working, Duration::from_millis(100));

        let (feasible, violations) = feasibility::check_solution(instance, &working);
        if !feasible {
            debug!("ILS iteration {iterations}: candidate infeasible ({violations:?}), reverting");
            current = pre_iteration;
            continue;
        }
        current = working;

        if current.score() < best.score() {
            info!(
                "ILS iteration {iterations}: improved to {} vehicles, {:.2} distance",
                current.score().vehicles,
                current.score().distance
            );
            best = current.clone();
            no_improvement = 0;
        } else {
            no_improvement += 1;
        }

        let mut perturbed: Vec<Vec<usize>> =
            current.routes().iter().map(|r| r.nodes().to_vec()).collect();
        let before_perturb = perturbed.clone();
        perturb::perturb(instance, &mut perturbed, config.perturb_intensity, rng);

        let all_feasible = perturbed.iter().all(|r| feasibility::is_feasible_route(instance, r));
        if all_feasible {
            let mut candidate = Solution::new(instance.name());
            candidate.set_routes(rebuild(instance, perturbed));
            if feasibility::check_solution(instance, &candidate).0 {
                current = candidate;
            } else {
                current.set_routes(rebuild(instance, before_perturb));
            }
        }
    }

    info!(
        "ILS finished after {iterations} iterations: best score = ({}, {:.2})",
        best.score().vehicles,
        best.score().distance
    );

    IlsOutcome {
        best,
        iterations,
        runtime: start.elapsed(),
    }
}

fn rebuild(instance: &Instance, routes: Vec<Vec<usize>>) -> Vec<Route> {
    lns::rebuild_routes(instance, routes)
}

/// The gap between a score and a best-known-solution reference, per
/// component: `(vehicles_gap_pct, distance_gap_pct)`. `None` fields when
/// no BKS is known for that dimension.
pub fn gap_vs_bks(score: Score, bks_vehicles: Option<usize>, bks_distance: Option<f64>) -> (Option<f64>, Option<f64>) {
    let vehicles_gap = bks_vehicles.map(|bks| {
        if bks == 0 {
            0.0
        } else {
            100.0 * (score.vehicles as f64 - bks as f64) / bks as f64
        }
    });
    let distance_gap = bks_distance.map(|bks| {
        if bks <= 0.0 {
            0.0
        } else {
            100.0 * (score.distance - bks) / bks
        }
    });
    (vehicles_gap, distance_gap)
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
            Node::new(3, 3.0, 0.0, 5, TimeWindow::new(0.0, 1000.0), 0.0, 4),
            Node::new(4, 4.0, 0.0, -5, TimeWindow::new(0.0, 1000.0), 0.0, 3),
        ];
        Instance::new("demo", 10, nodes)
    }

    #[test]
    fn run_never_loses_requests_and_stays_feasible() {
        let inst = instance();
        let initial = build_initial_solution(&inst);
        let mut config = IlsConfig::default();
        config.max_iterations = 5;
        config.time_budget = Duration::from_millis(300);
        config.lns.k_min = 1;
        config.lns.k_max = 2;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);

        let outcome = run(&inst, initial, &config, &mut rng);
        assert_eq!(outcome.best.num_served(), 4);
        assert!(feasibility::check_solution(&inst, &outcome.best).0);
    }

    #[test]
    fn gap_vs_bks_zero_when_matching() {
        let score = Score::new(3, 100.0);
        let (vg, dg) = gap_vs_bks(score, Some(3), Some(100.0));
        assert!((vg.unwrap()).abs() < 1e-9);
        assert!((dg.unwrap()).abs() < 1e-9);
    }
}
