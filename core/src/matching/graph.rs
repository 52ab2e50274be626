use super::matcher::CompiledDescription;
use crate::types::{Description, Sidecar};
use log::debug;
use std::path::{Path, PathBuf};

/// Descriptions matched by one sidecar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    /// Path of the sidecar
    pub path: PathBuf,

    /// Indices into the description list, ascending
    pub descriptions: Vec<usize>,
}

/// Sidecar → matching descriptions, for every input sidecar
///
/// Entries follow the sidecar input order and every sidecar has an entry,
/// including those that matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchGraph {
    entries: Vec<MatchEntry>,
}

impl MatchGraph {
    /// Evaluates every sidecar against every description
    ///
    /// # Example
    ///
    /// ```
    /// use bidsmatch_core::{Description, MatchGraph, Sidecar, TagValue};
    /// use std::collections::HashMap;
    /// use std::path::Path;
    ///
    /// let sidecar = |name: &str, series: &str| {
    ///     let mut metadata = HashMap::new();
    ///     metadata.insert("SeriesDescription".to_string(), TagValue::from(series));
    ///     Sidecar::new(name, metadata)
    /// };
    /// let sidecars = vec![sidecar("a.json", "T1w_mprage"), sidecar("b.json", "localizer")];
    /// let descriptions = vec![Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1*")];
    ///
    /// let graph = MatchGraph::build(&sidecars, &descriptions);
    /// assert_eq!(graph.matches_for(Path::new("a.json")), Some(&[0][..]));
    /// assert_eq!(graph.matches_for(Path::new("b.json")), Some(&[][..]));
    /// ```
    pub fn build(sidecars: &[Sidecar], descriptions: &[Description]) -> Self {
        let compiled: Vec<CompiledDescription> =
            descriptions.iter().map(CompiledDescription::compile).collect();

        let entries = sidecars
            .iter()
            .map(|sidecar| {
                let matched: Vec<usize> = compiled
                    .iter()
                    .enumerate()
                    .filter(|(_, description)| description.is_matched_by(sidecar))
                    .map(|(index, _)| index)
                    .collect();
                debug!(
                    "{} matches descriptions {:?}",
                    sidecar.path().display(),
                    matched
                );
                MatchEntry {
                    path: sidecar.path().to_path_buf(),
                    descriptions: matched,
                }
            })
            .collect();

        Self { entries }
    }

    /// Number of sidecars in the graph
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sidecar order
    pub fn iter(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.iter()
    }

    /// Entry for the sidecar at `index` in the input list
    pub fn get(&self, index: usize) -> Option<&MatchEntry> {
        self.entries.get(index)
    }

    /// Matching description indices for the first sidecar with this path
    pub fn matches_for(&self, path: &Path) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.descriptions.as_slice())
    }
}

impl<'a> IntoIterator for &'a MatchGraph {
    type Item = &'a MatchEntry;
    type IntoIter = std::slice::Iter<'a, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
