//! Distance and travel-time matrices.
//!
//! Provides a dense travel-time matrix over instance nodes (§3, §4.1 of the
//! instance model: `T[i][i] = 0`, not assumed symmetric).

mod matrix;

pub use matrix::DistanceMatrix;
