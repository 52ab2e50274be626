//! Core type definitions for sidecar classification
//!
//! This module provides the fundamental types used throughout the bidsmatch library:
//! - [`TagValue`]: A scalar or list metadata value, in string form
//! - [`Sidecar`]: A metadata file path and its parsed tags
//! - [`Description`]: A rule mapping tag patterns to an output label
//! - [`Acquisition`]: A sidecar matched by exactly one description

mod acquisition;
mod description;
mod sidecar;
mod value;

pub use acquisition::{base_path, Acquisition};
pub use description::{Criteria, Description};
pub use sidecar::{Sidecar, SIDECAR_FILENAME};
pub use value::{TagValue, NULL_VALUE};
