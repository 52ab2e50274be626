//! Classification events and the sinks that receive them
//!
//! The pipeline reports every per-sidecar outcome and every run group as an
//! event instead of logging directly. Callers choose how events are
//! rendered: [`LogSink`] writes them through the `log` facade, a
//! `Vec<ClassificationEvent>` collects them, and [`FnSink`] forwards them to
//! a closure.

use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Display names longer than this are abbreviated
const MAX_DISPLAY_NAME: usize = 48;

/// Characters kept on each side of an abbreviated name
const ABBREVIATED_SIDE: usize = 22;

/// Outcome reported while classifying sidecars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationEvent {
    /// Sidecar matched exactly one description
    Match { sidecar: PathBuf, description: usize },

    /// Sidecar matched no description
    NoMatch { sidecar: PathBuf },

    /// Sidecar matched several descriptions and was left unclassified
    SeveralMatches {
        sidecar: PathBuf,
        descriptions: Vec<usize>,
    },

    /// Several acquisitions share a suffix and received run labels
    DuplicateRuns { suffix: String, count: usize },
}

impl ClassificationEvent {
    /// Path of the sidecar the event is about, if any
    pub fn sidecar(&self) -> Option<&Path> {
        match self {
            ClassificationEvent::Match { sidecar, .. }
            | ClassificationEvent::NoMatch { sidecar }
            | ClassificationEvent::SeveralMatches { sidecar, .. } => Some(sidecar),
            ClassificationEvent::DuplicateRuns { .. } => None,
        }
    }
}

impl fmt::Display for ClassificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationEvent::Match { sidecar, .. } => {
                write!(f, "MATCH           {}", display_name(sidecar))
            }
            ClassificationEvent::NoMatch { sidecar } => {
                write!(f, "NO MATCH        {}", display_name(sidecar))
            }
            ClassificationEvent::SeveralMatches { sidecar, .. } => {
                write!(f, "SEVERAL MATCHES {}", display_name(sidecar))
            }
            ClassificationEvent::DuplicateRuns { suffix, .. } => {
                write!(f, "'{}' has several runs", suffix)
            }
        }
    }
}

/// File name of a sidecar, abbreviated in the middle when too long
pub fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= MAX_DISPLAY_NAME {
        return name;
    }

    let head: String = chars[..ABBREVIATED_SIDE].iter().collect();
    let tail: String = chars[chars.len() - ABBREVIATED_SIDE..].iter().collect();
    format!("{}..{}", head, tail)
}

/// Receiver of classification events
pub trait EventSink {
    fn emit(&mut self, event: ClassificationEvent);
}

/// Writes events at `info` level through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: ClassificationEvent) {
        info!("{}", event);
    }
}

impl EventSink for Vec<ClassificationEvent> {
    fn emit(&mut self, event: ClassificationEvent) {
        self.push(event);
    }
}

/// Forwards events to a closure
///
/// # Example
///
/// ```
/// use bidsmatch_core::{ClassificationEvent, EventSink, FnSink};
///
/// let mut seen = 0;
/// let mut sink = FnSink(|_: &ClassificationEvent| seen += 1);
/// sink.emit(ClassificationEvent::NoMatch { sidecar: "a.json".into() });
/// drop(sink);
/// assert_eq!(seen, 1);
/// ```
pub struct FnSink<F>(pub F);

impl<F: FnMut(&ClassificationEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: ClassificationEvent) {
        (self.0)(&event);
    }
}
