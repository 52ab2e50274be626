use super::{Description, Sidecar};
use std::path::{Path, PathBuf};

/// Extensions stripped as a unit when deriving a base path
const COMPOUND_EXTENSIONS: [&str; 1] = [".nii.gz"];

/// A sidecar classified under exactly one description
///
/// Downstream tooling builds output file names from these fields; this crate
/// only fills them in and appends run labels to `custom_labels`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct Acquisition {
    /// Sidecar path without its extension
    pub base: PathBuf,
    pub data_type: String,
    pub modality_label: String,
    pub custom_labels: Option<String>,
}

impl Acquisition {
    /// Creates an acquisition with no custom labels
    pub fn new(
        base: impl Into<PathBuf>,
        data_type: impl Into<String>,
        modality_label: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            data_type: data_type.into(),
            modality_label: modality_label.into(),
            custom_labels: None,
        }
    }

    /// Creates the acquisition for a sidecar matched by a description
    ///
    /// # Example
    ///
    /// ```
    /// use bidsmatch_core::{Acquisition, Description, Sidecar};
    /// use std::collections::HashMap;
    /// use std::path::Path;
    ///
    /// let sidecar = Sidecar::new("sub-01/002_T1w.json", HashMap::new());
    /// let description = Description::new("anat", "T1w");
    ///
    /// let acq = Acquisition::from_match(&sidecar, &description);
    /// assert_eq!(acq.base, Path::new("sub-01/002_T1w"));
    /// assert_eq!(acq.suffix(), "anat/T1w");
    /// ```
    pub fn from_match(sidecar: &Sidecar, description: &Description) -> Self {
        Self {
            base: base_path(sidecar.path()),
            data_type: description.data_type.clone(),
            modality_label: description.modality_label.clone(),
            custom_labels: description.custom_labels.clone(),
        }
    }

    /// Returns whether custom labels are set to something other than blanks
    pub fn has_custom_labels(&self) -> bool {
        self.custom_labels
            .as_deref()
            .map(|labels| !labels.trim().is_empty())
            .unwrap_or(false)
    }

    /// Grouping key for run detection
    ///
    /// `<dataType>/<customLabels>_<modalityLabel>`, or
    /// `<dataType>/<modalityLabel>` when no custom labels are set.
    pub fn suffix(&self) -> String {
        match self.custom_labels.as_deref() {
            Some(labels) if !labels.trim().is_empty() => {
                format!("{}/{}_{}", self.data_type, labels, self.modality_label)
            }
            _ => format!("{}/{}", self.data_type, self.modality_label),
        }
    }

    /// Appends a run entity to the custom labels
    ///
    /// Run numbers are zero-padded to two digits.
    pub fn append_run(&mut self, run: usize) {
        let run_label = format!("run-{:02}", run);
        self.custom_labels = Some(match self.custom_labels.take() {
            Some(labels) if !labels.trim().is_empty() => format!("{}_{}", labels, run_label),
            _ => run_label,
        });
    }
}

/// Strips the extension of a metadata file path
///
/// Compound extensions such as `.nii.gz` are removed as a unit.
pub fn base_path(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    for ext in COMPOUND_EXTENSIONS {
        if let Some(stripped) = text.strip_suffix(ext) {
            return PathBuf::from(stripped);
        }
    }
    path.with_extension("")
}
