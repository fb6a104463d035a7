//! Core domain types for the PDPTW solver.
//!
//! Nodes carry demand, a time window, and a pickup/delivery pairing; an
//! instance bundles them with the travel-time matrix; a route is an ordered
//! node sequence; a solution is a set of routes scored lexicographically by
//! `(vehicles, distance)`.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::Instance;
pub use node::{Node, TimeWindow};
pub use route::{Route, Visit};
pub use solution::{Score, Solution};
