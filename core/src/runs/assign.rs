use crate::events::{ClassificationEvent, EventSink};
use crate::types::Acquisition;
use log::debug;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Numbers acquisitions that share a suffix
///
/// Uses [`Acquisition::suffix`] as the grouping key. See [`assign_runs_by`].
///
/// # Example
///
/// ```
/// use bidsmatch_core::{assign_runs, Acquisition, LogSink};
///
/// let mut acquisitions = vec![
///     Acquisition::new("a", "anat", "T1w"),
///     Acquisition::new("b", "anat", "T2w"),
///     Acquisition::new("c", "anat", "T1w"),
/// ];
/// assign_runs(&mut acquisitions, &mut LogSink);
///
/// assert_eq!(acquisitions[0].custom_labels.as_deref(), Some("run-01"));
/// assert_eq!(acquisitions[1].custom_labels, None);
/// assert_eq!(acquisitions[2].custom_labels.as_deref(), Some("run-02"));
/// ```
pub fn assign_runs<S: EventSink + ?Sized>(acquisitions: &mut [Acquisition], sink: &mut S) {
    assign_runs_by(acquisitions, Acquisition::suffix, sink);
}

/// Numbers acquisitions that share a grouping key
///
/// Groups with two or more members are processed in ascending key order,
/// each emitting a `DuplicateRuns` event. Members are numbered from
/// `run-01` in their order within `acquisitions`. The run label is
/// appended to existing custom labels with a `_` separator, or becomes the
/// custom labels when none are set. Acquisitions with a unique key are left
/// untouched.
pub fn assign_runs_by<K, F, S>(acquisitions: &mut [Acquisition], key: F, sink: &mut S)
where
    K: Ord + Display,
    F: Fn(&Acquisition) -> K,
    S: EventSink + ?Sized,
{
    let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (index, acquisition) in acquisitions.iter().enumerate() {
        groups.entry(key(acquisition)).or_default().push(index);
    }

    for (suffix, members) in groups.into_iter().filter(|(_, members)| members.len() > 1) {
        debug!("{} acquisitions share '{}'", members.len(), suffix);
        sink.emit(ClassificationEvent::DuplicateRuns {
            suffix: suffix.to_string(),
            count: members.len(),
        });

        for (run, index) in members.into_iter().enumerate() {
            acquisitions[index].append_run(run + 1);
        }
    }
}
