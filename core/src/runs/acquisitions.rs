use crate::events::{ClassificationEvent, EventSink};
use crate::matching::MatchGraph;
use crate::types::{Acquisition, Description, Sidecar};

/// Creates one acquisition per sidecar that matched exactly one description
///
/// `graph` must have been built from `sidecars`; entries are paired with
/// sidecars by position. Every sidecar produces one event: `Match`,
/// `NoMatch`, or `SeveralMatches`. Ambiguous sidecars are reported and
/// skipped so that one overlapping description does not block the batch.
pub fn build_acquisitions<S: EventSink + ?Sized>(
    sidecars: &[Sidecar],
    descriptions: &[Description],
    graph: &MatchGraph,
    sink: &mut S,
) -> Vec<Acquisition> {
    let mut acquisitions = Vec::new();

    for (sidecar, entry) in sidecars.iter().zip(graph) {
        let path = sidecar.path().to_path_buf();
        match entry.descriptions.as_slice() {
            [index] => {
                sink.emit(ClassificationEvent::Match {
                    sidecar: path,
                    description: *index,
                });
                acquisitions.push(Acquisition::from_match(sidecar, &descriptions[*index]));
            }
            [] => sink.emit(ClassificationEvent::NoMatch { sidecar: path }),
            several => sink.emit(ClassificationEvent::SeveralMatches {
                sidecar: path,
                descriptions: several.to_vec(),
            }),
        }
    }

    acquisitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TagValue;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn sidecar(path: &str, series: &str) -> Sidecar {
        let mut metadata = HashMap::new();
        metadata.insert("SeriesDescription".to_string(), TagValue::from(series));
        Sidecar::new(path, metadata)
    }

    fn classify(
        sidecars: &[Sidecar],
        descriptions: &[Description],
    ) -> (Vec<Acquisition>, Vec<ClassificationEvent>) {
        let graph = MatchGraph::build(sidecars, descriptions);
        let mut events = Vec::new();
        let acquisitions = build_acquisitions(sidecars, descriptions, &graph, &mut events);
        (acquisitions, events)
    }

    #[test]
    fn test_single_match_builds_acquisition() {
        let sidecars = vec![sidecar("a.json", "T1w_mprage"), sidecar("b.json", "localizer")];
        let descriptions =
            vec![Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1*")];

        let (acquisitions, events) = classify(&sidecars, &descriptions);

        assert_eq!(acquisitions, vec![Acquisition::new("a", "anat", "T1w")]);
        assert_eq!(
            events,
            vec![
                ClassificationEvent::Match {
                    sidecar: PathBuf::from("a.json"),
                    description: 0
                },
                ClassificationEvent::NoMatch {
                    sidecar: PathBuf::from("b.json")
                },
            ]
        );
    }

    #[test]
    fn test_several_matches_builds_nothing() {
        let sidecars = vec![sidecar("a.json", "T1w_mprage")];
        let descriptions = vec![
            Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1*"),
            Description::new("anat", "T1w")
                .with_criterion("SeriesDescription", "*mprage")
                .with_custom_labels("acq-mprage"),
        ];

        let (acquisitions, events) = classify(&sidecars, &descriptions);

        assert!(acquisitions.is_empty());
        assert_eq!(
            events,
            vec![ClassificationEvent::SeveralMatches {
                sidecar: PathBuf::from("a.json"),
                descriptions: vec![0, 1]
            }]
        );
    }

    #[test]
    fn test_custom_labels_copied_from_description() {
        let sidecars = vec![sidecar("rest.json", "rest_bold")];
        let descriptions = vec![Description::new("func", "bold")
            .with_criterion("SeriesDescription", "*bold")
            .with_custom_labels("task-rest")];

        let (acquisitions, _) = classify(&sidecars, &descriptions);
        assert_eq!(acquisitions[0].custom_labels.as_deref(), Some("task-rest"));
        assert_eq!(acquisitions[0].base, PathBuf::from("rest"));
    }
}
