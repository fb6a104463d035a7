//! Solution type and lexicographic score.

use super::Route;

/// The lexicographic objective: fewer vehicles first, then shorter total
/// distance. `Score` implements `Ord` so two solutions can be compared
/// directly with `<`.
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::Score;
///
/// let a = Score::new(5, 800.0);
/// let b = Score::new(4, 2000.0);
/// assert!(b < a); // fewer vehicles always wins, regardless of distance
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Number of non-empty routes (vehicles used).
    pub vehicles: usize,
    /// Sum of each route's depot-to-depot travel distance.
    pub distance: f64,
}

impl Score {
    /// Creates a score.
    pub fn new(vehicles: usize, distance: f64) -> Self {
        Self { vehicles, distance }
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.vehicles.cmp(&other.vehicles).then_with(|| {
            self.distance
                .partial_cmp(&other.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// A complete (or partial, mid-search) assignment of requests to routes.
///
/// Global invariants (enforced by the feasibility oracle, not by this type):
/// every non-depot node appears in exactly one route exactly once; empty
/// routes are removed; `#vehicles == #routes`.
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::{Solution, Route};
///
/// let mut sol = Solution::new("demo");
/// sol.add_route(Route::from_nodes(vec![1, 2]));
/// assert_eq!(sol.num_routes(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    instance_name: String,
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution for the named instance.
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            routes: Vec::new(),
        }
    }

    /// The instance this solution was built for.
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Appends a route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// All routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to the route list (for in-place local search/LNS).
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Replaces the route list wholesale.
    pub fn set_routes(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    /// Drops routes with no visits. Call after any operator that may leave a
    /// route empty (AGES merges, route elimination, destroy operators).
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }

    /// Number of non-empty routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total distance across all routes (assumes each route's `distance()`
    /// is current — see `insertion::evaluate_route`).
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Number of non-depot nodes served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// This solution's lexicographic score.
    pub fn score(&self) -> Score {
        Score::new(self.num_routes(), self.total_distance())
    }
}
