//! Acquisition building and run disambiguation
//!
//! Turns a [`MatchGraph`](crate::MatchGraph) into acquisitions, then numbers
//! acquisitions that would otherwise receive the same output label.

mod acquisitions;
mod assign;

pub use acquisitions::build_acquisitions;
pub use assign::{assign_runs, assign_runs_by};
