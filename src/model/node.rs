//! Node and time-window types.

/// A hard time window: a node must be serviced no later than `ltw`, and no
/// earlier than `etw` (the vehicle waits if it arrives early).
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0);
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    etw: f64,
    ltw: f64,
}

impl TimeWindow {
    /// Creates a time window. `etw` is clamped to be no later than `ltw`.
    pub fn new(etw: f64, ltw: f64) -> Self {
        debug_assert!(etw.is_finite() && ltw.is_finite());
        debug_assert!(etw <= ltw, "etw {etw} must be <= ltw {ltw}");
        Self { etw, ltw }
    }

    /// Earliest allowable service start.
    pub fn etw(&self) -> f64 {
        self.etw
    }

    /// Latest allowable service start.
    pub fn ltw(&self) -> f64 {
        self.ltw
    }

    /// `true` if `time` falls within `[etw, ltw]`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.etw && time <= self.ltw
    }

    /// `true` if arriving at `arrival` would violate this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.ltw
    }

    /// Service start given an arrival time (waits if arriving early).
    pub fn service_start(&self, arrival: f64) -> f64 {
        arrival.max(self.etw)
    }
}

/// A node in a PDPTW instance: the depot (index 0), a pickup, or a delivery.
///
/// For every pickup `p`, `demand(p) == -demand(pair(p))` and
/// `pair(pair(p)) == p`. The depot has `demand == 0` and `pair == 0`.
///
/// # Examples
///
/// ```
/// use pdptw_solver::model::{Node, TimeWindow};
///
/// let depot = Node::depot(35.0, 35.0, TimeWindow::new(0.0, 1000.0));
/// assert!(depot.is_depot());
///
/// let pickup = Node::new(1, 10.0, 0.0, 10, TimeWindow::new(0.0, 100.0), 10.0, 2);
/// assert!(pickup.is_pickup());
/// assert_eq!(pickup.pair(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    idx: usize,
    x: f64,
    y: f64,
    demand: i32,
    time_window: TimeWindow,
    dur: f64,
    pair: usize,
}

impl Node {
    /// Creates a node. `demand > 0` marks a pickup, `demand < 0` a delivery.
    pub fn new(
        idx: usize,
        x: f64,
        y: f64,
        demand: i32,
        time_window: TimeWindow,
        dur: f64,
        pair: usize,
    ) -> Self {
        Self {
            idx,
            x,
            y,
            demand,
            time_window,
            dur,
            pair,
        }
    }

    /// Creates the depot (index 0, zero demand, no pair).
    pub fn depot(x: f64, y: f64, time_window: TimeWindow) -> Self {
        Self::new(0, x, y, 0, time_window, 0.0, 0)
    }

    /// Node index (0 = depot).
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Signed demand: positive for a pickup, negative for a delivery.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// This node's time window.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Service duration at this node.
    pub fn dur(&self) -> f64 {
        self.dur
    }

    /// Index of the paired pickup (if this is a delivery) or delivery (if
    /// this is a pickup). Zero for the depot.
    pub fn pair(&self) -> usize {
        self.pair
    }

    /// `true` if this node is the depot.
    pub fn is_depot(&self) -> bool {
        self.idx == 0
    }

    /// `true` if this node is a pickup.
    pub fn is_pickup(&self) -> bool {
        self.demand > 0
    }

    /// `true` if this node is a delivery.
    pub fn is_delivery(&self) -> bool {
        self.demand < 0
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
