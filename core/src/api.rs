use crate::events::{EventSink, LogSink};
use crate::matching::MatchGraph;
use crate::runs::{assign_runs, build_acquisitions};
use crate::types::{Acquisition, Description, Sidecar};
use log::info;

/// Main entry point for sidecar classification
///
/// Holds the ordered description list and runs the whole pipeline: match
/// every sidecar against every description, build an acquisition for each
/// sidecar with exactly one match, then number acquisitions sharing a
/// suffix.
///
/// # Example
///
/// ```
/// use bidsmatch_core::{Description, Sidecar, SidecarParser, TagValue};
/// use std::collections::HashMap;
/// use std::path::Path;
///
/// let sidecar = |name: &str, series: &str| {
///     let mut metadata = HashMap::new();
///     metadata.insert("SeriesDescription".to_string(), TagValue::from(series));
///     Sidecar::new(name, metadata)
/// };
/// let sidecars = vec![
///     sidecar("002_T1w.json", "T1w_mprage"),
///     sidecar("003_T1w.json", "T1w_mprage"),
///     sidecar("001_loc.json", "localizer"),
/// ];
///
/// let parser = SidecarParser::new(vec![
///     Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1*"),
/// ]);
/// let classification = parser.classify(&sidecars);
///
/// assert_eq!(classification.acquisitions.len(), 2);
/// assert_eq!(classification.acquisitions[0].base, Path::new("002_T1w"));
/// assert_eq!(classification.acquisitions[0].custom_labels.as_deref(), Some("run-01"));
/// assert_eq!(classification.acquisitions[1].custom_labels.as_deref(), Some("run-02"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SidecarParser {
    descriptions: Vec<Description>,
}

impl SidecarParser {
    /// Creates a parser for an ordered description list
    pub fn new(descriptions: Vec<Description>) -> Self {
        Self { descriptions }
    }

    /// The descriptions, in configuration order
    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    /// Classifies sidecars, reporting events through the `log` facade
    pub fn classify(&self, sidecars: &[Sidecar]) -> Classification {
        self.classify_with_sink(sidecars, &mut LogSink)
    }

    /// Classifies sidecars, reporting events to `sink`
    ///
    /// Run assignment starts only once every acquisition is built, since
    /// duplicates are detected across the complete set.
    pub fn classify_with_sink<S: EventSink + ?Sized>(
        &self,
        sidecars: &[Sidecar],
        sink: &mut S,
    ) -> Classification {
        info!(
            "Matching {} sidecars against {} descriptions",
            sidecars.len(),
            self.descriptions.len()
        );
        let graph = MatchGraph::build(sidecars, &self.descriptions);

        let mut acquisitions = build_acquisitions(sidecars, &self.descriptions, &graph, sink);

        info!("Checking if a description matches several sidecars");
        assign_runs(&mut acquisitions, sink);

        Classification {
            graph,
            acquisitions,
        }
    }
}

#[cfg(feature = "json")]
impl From<crate::config::DescriptionConfig> for SidecarParser {
    fn from(config: crate::config::DescriptionConfig) -> Self {
        Self::new(config.descriptions)
    }
}

/// Result of classifying a batch of sidecars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Matching descriptions for every input sidecar
    pub graph: MatchGraph,

    /// Acquisitions for sidecars with exactly one match, in sidecar order
    pub acquisitions: Vec<Acquisition>,
}

impl Classification {
    /// Input positions of sidecars that matched no description
    pub fn unmatched(&self) -> Vec<usize> {
        self.positions_where(|count| count == 0)
    }

    /// Input positions of sidecars that matched several descriptions
    pub fn ambiguous(&self) -> Vec<usize> {
        self.positions_where(|count| count > 1)
    }

    fn positions_where(&self, keep: impl Fn(usize) -> bool) -> Vec<usize> {
        self.graph
            .iter()
            .enumerate()
            .filter(|(_, entry)| keep(entry.descriptions.len()))
            .map(|(index, _)| index)
            .collect()
    }
}
