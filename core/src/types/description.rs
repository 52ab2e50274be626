use super::TagValue;
use std::collections::BTreeMap;

/// Tag → pattern(s) mapping used for `criteria` and `exclude`
pub type Criteria = BTreeMap<String, TagValue>;

/// User-authored rule mapping sidecar metadata to an output naming scheme
///
/// A sidecar satisfies a description when every `criteria` tag glob-matches
/// one of its patterns and no `exclude` pattern matches a tag the sidecar
/// carries. A description without criteria never matches.
///
/// # Example
///
/// ```
/// use bidsmatch_core::Description;
///
/// let description = Description::new("anat", "T1w")
///     .with_criterion("SeriesDescription", "T1*")
///     .with_exclude("ImageType", vec!["DERIVED*", "*MOCO*"])
///     .with_custom_labels("acq-mprage");
///
/// assert_eq!(description.data_type, "anat");
/// assert_eq!(description.criteria.len(), 1);
/// assert_eq!(description.custom_labels.as_deref(), Some("acq-mprage"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct Description {
    /// Output data type folder (`anat`, `func`, `dwi`, ...)
    pub data_type: String,

    /// Output modality label (`T1w`, `bold`, ...)
    pub modality_label: String,

    /// Extra entity labels placed before the modality label
    #[cfg_attr(feature = "json", serde(default))]
    pub custom_labels: Option<String>,

    /// Patterns that must all hold
    pub criteria: Criteria,

    /// Patterns that must not hold, checked only for tags the sidecar carries
    #[cfg_attr(feature = "json", serde(default))]
    pub exclude: Criteria,
}

impl Description {
    /// Creates a description with no criteria
    pub fn new(data_type: impl Into<String>, modality_label: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            modality_label: modality_label.into(),
            custom_labels: None,
            criteria: Criteria::new(),
            exclude: Criteria::new(),
        }
    }

    /// Builder: Require a tag to match a pattern, or one of a list of patterns
    pub fn with_criterion(mut self, tag: impl Into<String>, pattern: impl Into<TagValue>) -> Self {
        self.criteria.insert(tag.into(), pattern.into());
        self
    }

    /// Builder: Reject sidecars whose tag matches a pattern
    pub fn with_exclude(mut self, tag: impl Into<String>, pattern: impl Into<TagValue>) -> Self {
        self.exclude.insert(tag.into(), pattern.into());
        self
    }

    /// Builder: Set custom labels
    pub fn with_custom_labels(mut self, labels: impl Into<String>) -> Self {
        self.custom_labels = Some(labels.into());
        self
    }
}
