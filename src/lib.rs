//! Pickup-and-delivery problem with time windows (PDPTW): constructive
//! heuristics, local search, large neighborhood search, and an iterated
//! local search shell built around a single feasibility oracle.
//!
//! Module map:
//! - [`model`]: instance, node, route, and solution types.
//! - [`distance`]: the travel-time matrix (Euclidean or explicit).
//! - [`feasibility`]: the oracle every other module defers to (C2).
//! - [`insertion`]: route cost evaluation and best-insertion search (C3).
//! - [`constructive`]: Clarke-Wright and greedy-insertion initial solutions (C4).
//! - [`local_search`]: 2-opt, relocate, exchange (C5).
//! - [`lns`]: destroy/repair operators and acceptance criteria (C6).
//! - [`ils`]: the outer iterated local search shell (C7).
//! - [`io`]: instance parsing, solution text format, BKS lookup, result records.
//! - [`cli`]: the `pdptw` command-line surface.

pub mod cli;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod feasibility;
pub mod ils;
pub mod insertion;
pub mod io;
pub mod lns;
pub mod local_search;
pub mod model;
