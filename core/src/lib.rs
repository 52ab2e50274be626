pub mod api;
#[cfg(feature = "json")]
pub mod config;
pub mod error;
pub mod events;
pub mod matching;
pub mod runs;
pub mod types;

pub use api::{Classification, SidecarParser};
#[cfg(feature = "json")]
pub use config::DescriptionConfig;
pub use error::{BidsMatchError, Result};
pub use events::{ClassificationEvent, EventSink, FnSink, LogSink};
pub use matching::{respects, CompiledDescription, GlobPattern, MatchEntry, MatchGraph};
pub use runs::{assign_runs, assign_runs_by, build_acquisitions};
pub use types::*;
