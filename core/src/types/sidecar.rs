use super::TagValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Metadata key holding the sidecar's file name
pub const SIDECAR_FILENAME: &str = "SidecarFilename";

/// Per-image metadata record
///
/// Pairs the path of a metadata file with its parsed tags. The
/// [`SIDECAR_FILENAME`] tag is always present and holds the file name
/// component of the path, so descriptions may match on it.
///
/// # Example
///
/// ```
/// use bidsmatch_core::{Sidecar, TagValue};
/// use std::collections::HashMap;
///
/// let mut metadata = HashMap::new();
/// metadata.insert("SeriesDescription".to_string(), TagValue::from("T1w_mprage"));
///
/// let sidecar = Sidecar::new("sub-01/004_T1w.json", metadata);
/// assert_eq!(sidecar.get("SidecarFilename"), Some(&TagValue::from("004_T1w.json")));
/// assert!(sidecar.contains_tag("SeriesDescription"));
/// assert!(!sidecar.contains_tag("EchoTime"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sidecar {
    path: PathBuf,
    metadata: HashMap<String, TagValue>,
}

impl Sidecar {
    /// Creates a sidecar from its path and parsed metadata
    pub fn new(path: impl Into<PathBuf>, mut metadata: HashMap<String, TagValue>) -> Self {
        let path = path.into();
        metadata.insert(
            SIDECAR_FILENAME.to_string(),
            TagValue::Scalar(file_name(&path)),
        );
        Self { path, metadata }
    }

    /// Parses sidecar metadata from JSON text
    ///
    /// The document must be a JSON object. Values that are neither scalars
    /// nor lists of scalars are dropped with a warning; a description
    /// referring to such a tag sees it as absent.
    #[cfg(feature = "json")]
    pub fn from_json_str(path: impl Into<PathBuf>, text: &str) -> crate::error::Result<Self> {
        let path = path.into();
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

        let mut metadata = HashMap::with_capacity(document.len());
        for (tag, value) in document {
            match TagValue::try_from(value) {
                Ok(value) => {
                    metadata.insert(tag, value);
                }
                Err(e) => log::warn!("Ignoring tag {} in {}: {}", tag, path.display(), e),
            }
        }

        Ok(Self::new(path, metadata))
    }

    /// Path of the metadata file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the path
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }

    /// All parsed tags
    pub fn metadata(&self) -> &HashMap<String, TagValue> {
        &self.metadata
    }

    /// Looks up a tag
    pub fn get(&self, tag: &str) -> Option<&TagValue> {
        self.metadata.get(tag)
    }

    /// Returns whether the tag is present, whatever its value
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.metadata.contains_key(tag)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
