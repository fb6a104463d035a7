//! PDPTW problem instance.

use super::Node;
use crate::distance::DistanceMatrix;

/// A pickup-and-delivery problem with time windows instance: a depot, a
/// homogeneous fleet of vehicles of capacity `capacity`, and a set of
/// pickup/delivery requests.
///
/// Immutable once built: parsed once at startup and shared by reference
/// through the rest of the solver (spec §3 "Lifecycle").
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::{Instance, Node, TimeWindow};
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0, TimeWindow::new(0.0, 1000.0)),
///     Node::new(1, 10.0, 0.0, 5, TimeWindow::new(0.0, 100.0), 0.0, 2),
///     Node::new(2, 20.0, 0.0, -5, TimeWindow::new(0.0, 100.0), 0.0, 1),
/// ];
/// let instance = Instance::new("demo", 10, nodes);
/// assert_eq!(instance.num_pairs(), 1);
/// assert_eq!(instance.pairs(), vec![(1, 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    capacity: i32,
    nodes: Vec<Node>,
    times: DistanceMatrix,
}

impl Instance {
    /// Builds an instance, computing its travel-time matrix from node
    /// coordinates (Euclidean, rounded — the Li & Lim convention).
    pub fn new(name: impl Into<String>, capacity: i32, nodes: Vec<Node>) -> Self {
        let times = DistanceMatrix::from_nodes(&nodes);
        Self::with_matrix(name, capacity, nodes, times)
    }

    /// Builds an instance from nodes and an already-computed travel-time
    /// matrix (the Sartori–Buriol `EDGES` section supplies one directly).
    pub fn with_matrix(
        name: impl Into<String>,
        capacity: i32,
        nodes: Vec<Node>,
        times: DistanceMatrix,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            nodes,
            times,
        }
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vehicle capacity (homogeneous fleet).
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// All nodes, indexed 0..N (index 0 is the depot).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// A single node by index.
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// The depot node (index 0).
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes including the depot.
    pub fn n(&self) -> usize {
        self.nodes.len()
    }

    /// Travel time from `from` to `to`.
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.times.get(from, to)
    }

    /// The travel-time matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.times
    }

    /// All pickup nodes, ordered by index.
    pub fn pickups(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .filter(|n| n.is_pickup())
            .map(|n| n.idx())
            .collect()
    }

    /// All `(pickup, delivery)` pairs, ordered by pickup index.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.pickups().into_iter().map(|p| (p, self.node(p).pair())).collect()
    }

    /// Number of pickup-delivery requests.
    pub fn num_pairs(&self) -> usize {
        self.pickups().len()
    }
}
