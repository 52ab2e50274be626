//! Description configuration documents
//!
//! A configuration document is a JSON object whose `descriptions` key holds
//! the ordered description list:
//!
//! ```json
//! {
//!   "descriptions": [
//!     {
//!       "dataType": "anat",
//!       "modalityLabel": "T1w",
//!       "criteria": {"SeriesDescription": "*T1*"},
//!       "exclude": {"ImageType": ["DERIVED*"]}
//!     }
//!   ]
//! }
//! ```
//!
//! Other top-level keys are ignored. Callers read the document themselves;
//! this module only parses text.

use crate::error::{BidsMatchError, Result};
use crate::types::Description;
use log::debug;
use serde::Deserialize;

/// Parsed description configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DescriptionConfig {
    pub descriptions: Vec<Description>,
}

impl DescriptionConfig {
    /// Parses a configuration document
    ///
    /// # Errors
    ///
    /// Returns [`BidsMatchError::Json`] when the text is not valid JSON or a
    /// description lacks a required field, and
    /// [`BidsMatchError::InvalidValue`] (wrapped in the JSON error) when a
    /// criteria value is neither a scalar nor a list of scalars.
    ///
    /// # Example
    ///
    /// ```
    /// use bidsmatch_core::DescriptionConfig;
    ///
    /// let config = DescriptionConfig::from_json_str(r#"{
    ///     "searchMethod": "fnmatch",
    ///     "descriptions": [
    ///         {"dataType": "anat", "modalityLabel": "T1w",
    ///          "criteria": {"SeriesDescription": "T1*"}}
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(config.descriptions.len(), 1);
    /// assert_eq!(config.descriptions[0].modality_label, "T1w");
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DescriptionConfig = serde_json::from_str(text)?;
        config.validate()?;
        debug!("Loaded {} descriptions", config.descriptions.len());
        Ok(config)
    }

    /// Checks fields the JSON schema cannot express
    fn validate(&self) -> Result<()> {
        for (index, description) in self.descriptions.iter().enumerate() {
            if description.data_type.trim().is_empty() {
                return Err(BidsMatchError::Config(format!(
                    "description {} has an empty dataType",
                    index
                )));
            }
            if description.modality_label.trim().is_empty() {
                return Err(BidsMatchError::Config(format!(
                    "description {} has an empty modalityLabel",
                    index
                )));
            }
        }
        Ok(())
    }
}
