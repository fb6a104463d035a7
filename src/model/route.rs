//! Route and visit types.

/// A single visit to a node within a route, with its computed timing and
/// load state (filled in by the feasibility oracle / insertion kernel).
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Node index being visited.
    pub node: usize,
    /// Arrival time (before waiting for the time window to open).
    pub arrival_time: f64,
    /// Departure time (service start + service duration).
    pub departure_time: f64,
    /// Cumulative load after this visit.
    pub load_after: i32,
}

/// An ordered sequence of node visits served by a single vehicle.
///
/// The depot is implicit at both ends and not stored in `visits`. A route is
/// a logical container: it does not itself validate precedence, capacity, or
/// time windows — that is the feasibility oracle's job (`feasibility`
/// module). `Route::from_nodes` is the cheap, non-validating constructor used
/// by operators that only need to manipulate node order.
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::Route;
///
/// let route = Route::from_nodes(vec![3, 4, 5, 6]);
/// assert_eq!(route.len(), 4);
/// assert_eq!(route.nodes(), &[3, 4, 5, 6]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Route {
    nodes: Vec<usize>,
    visits: Vec<Visit>,
    distance: f64,
    duration: f64,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a route from a bare node sequence, with no timing/load info.
    pub fn from_nodes(nodes: Vec<usize>) -> Self {
        Self {
            nodes,
            visits: Vec::new(),
            distance: 0.0,
            duration: 0.0,
        }
    }

    /// Node indices in visit order (excludes the depot).
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Mutable access to the node sequence, for operators that reorder it in
    /// place. Callers must re-evaluate (`insertion::evaluate_route`) before
    /// relying on `visits()`/`distance()`/`duration()` again.
    pub fn nodes_mut(&mut self) -> &mut Vec<usize> {
        &mut self.nodes
    }

    /// Number of node visits (excludes the depot).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if this route visits no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Per-visit timing and load, set by `insertion::evaluate_route`.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Total travel distance, set by `insertion::evaluate_route`.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total route duration (service start to final depot return).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Final load at the end of the route (should be zero for a complete
    /// PDPTW route — every pickup's delivery is in the same route).
    pub fn final_load(&self) -> i32 {
        self.visits.last().map(|v| v.load_after).unwrap_or(0)
    }

    /// Replaces the evaluated state (visits, distance, duration). Used by the
    /// insertion kernel after (re)computing timing for this node sequence.
    pub fn set_evaluation(&mut self, visits: Vec<Visit>, distance: f64, duration: f64) {
        self.visits = visits;
        self.distance = distance;
        self.duration = duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_route() {
        let r = Route::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.distance(), 0.0);
    }

    #[test]
    fn from_nodes() {
        let r = Route::from_nodes(vec![1, 2, 3]);
        assert_eq!(r.len(), 3);
        assert_eq!(r.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn set_evaluation_updates_metrics() {
        let mut r = Route::from_nodes(vec![1]);
        let visits = vec![Visit {
            node: 1,
            arrival_time: 5.0,
            departure_time: 10.0,
            load_after: 3,
        }];
        r.set_evaluation(visits, 10.0, 15.0);
        assert_eq!(r.distance(), 10.0);
        assert_eq!(r.duration(), 15.0);
        assert_eq!(r.final_load(), 3);
    }
}
