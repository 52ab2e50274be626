//! Sidecar to description matching
//!
//! Descriptions are flattened into per-pattern rules, compiled once, and
//! evaluated against every sidecar to build a [`MatchGraph`].

mod glob;
mod graph;
mod matcher;

pub use glob::GlobPattern;
pub use graph::{MatchEntry, MatchGraph};
pub use matcher::{respects, CompiledDescription};
