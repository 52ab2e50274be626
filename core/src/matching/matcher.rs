use super::glob::GlobPattern;
use crate::types::{Criteria, Description, Sidecar, NULL_VALUE};
use log::warn;

/// One (tag, pattern, expected outcome) check flattened out of a description
#[derive(Debug, Clone)]
struct Rule {
    tag: String,
    /// `None` when the pattern failed to compile; it then matches nothing
    pattern: Option<GlobPattern>,
    expect_match: bool,
}

impl Rule {
    fn compile(tag: &str, pattern: &str, expect_match: bool) -> Self {
        let pattern = match GlobPattern::new(pattern) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("{} (tag {}): pattern will never match", e, tag);
                None
            }
        };
        Self {
            tag: tag.to_string(),
            pattern,
            expect_match,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.matches(text))
    }

    /// A list value matches when any of its elements does
    fn holds_for(&self, sidecar: &Sidecar) -> bool {
        let found = match sidecar.get(&self.tag) {
            Some(value) => value.as_slice().iter().any(|item| self.matches(item)),
            None => self.matches(NULL_VALUE),
        };
        found == self.expect_match
    }
}

fn flatten(criteria: &Criteria, expect_match: bool) -> Vec<Rule> {
    criteria
        .iter()
        .flat_map(|(tag, patterns)| {
            patterns
                .as_slice()
                .iter()
                .map(move |pattern| Rule::compile(tag, pattern, expect_match))
        })
        .collect()
}

/// A description with its patterns compiled once
///
/// Criteria rules always apply. Exclude rules apply only when the sidecar
/// carries the tag; a missing tag cannot be excluded on.
#[derive(Debug, Clone)]
pub struct CompiledDescription {
    criteria: Vec<Rule>,
    exclude: Vec<Rule>,
}

impl CompiledDescription {
    /// Compiles the criteria and exclude patterns of a description
    ///
    /// Patterns that fail to compile are logged and treated as matching
    /// nothing: such a criterion rejects every sidecar and such an exclude
    /// pattern rejects none.
    pub fn compile(description: &Description) -> Self {
        Self {
            criteria: flatten(&description.criteria, true),
            exclude: flatten(&description.exclude, false),
        }
    }

    /// Returns whether the sidecar satisfies every applicable rule
    pub fn is_matched_by(&self, sidecar: &Sidecar) -> bool {
        if self.criteria.is_empty() {
            return false;
        }

        self.criteria.iter().all(|rule| rule.holds_for(sidecar))
            && self
                .exclude
                .iter()
                .filter(|rule| sidecar.contains_tag(&rule.tag))
                .all(|rule| rule.holds_for(sidecar))
    }
}

/// Tests one sidecar against one description
///
/// Compiles the description on every call; use [`CompiledDescription`] when
/// checking many sidecars.
///
/// # Example
///
/// ```
/// use bidsmatch_core::{respects, Description, Sidecar, TagValue};
/// use std::collections::HashMap;
///
/// let mut metadata = HashMap::new();
/// metadata.insert("ImageType".to_string(), TagValue::from(vec!["ORIGINAL", "NORM"]));
/// let sidecar = Sidecar::new("a.json", metadata);
///
/// let wanted = Description::new("anat", "T1w").with_criterion("ImageType", "NORM");
/// let unwanted = wanted.clone().with_exclude("ImageType", "NORM");
///
/// assert!(respects(&sidecar, &wanted));
/// assert!(!respects(&sidecar, &unwanted));
/// ```
pub fn respects(sidecar: &Sidecar, description: &Description) -> bool {
    CompiledDescription::compile(description).is_matched_by(sidecar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TagValue;
    use std::collections::HashMap;

    fn sidecar(tags: &[(&str, TagValue)]) -> Sidecar {
        let metadata: HashMap<String, TagValue> = tags
            .iter()
            .map(|(tag, value)| (tag.to_string(), value.clone()))
            .collect();
        Sidecar::new("sub-01/a.json", metadata)
    }

    #[test]
    fn test_empty_criteria_never_matches() {
        let s = sidecar(&[("SeriesDescription", "T1w".into())]);
        assert!(!respects(&s, &Description::new("anat", "T1w")));

        let only_exclude = Description::new("anat", "T1w").with_exclude("SeriesDescription", "x");
        assert!(!respects(&s, &only_exclude));
    }

    #[test]
    fn test_all_criteria_must_hold() {
        let s = sidecar(&[
            ("SeriesDescription", "T1w_mprage".into()),
            ("EchoNumber", "1".into()),
        ]);

        let both = Description::new("anat", "T1w")
            .with_criterion("SeriesDescription", "T1*")
            .with_criterion("EchoNumber", "1");
        assert!(respects(&s, &both));

        let one_fails = both.clone().with_criterion("EchoNumber", "2");
        assert!(!respects(&s, &one_fails));
    }

    #[test]
    fn test_pattern_list_requires_every_pattern() {
        let s = sidecar(&[("ImageType", vec!["ORIGINAL", "PRIMARY", "M"].into())]);

        let all_present = Description::new("anat", "T1w")
            .with_criterion("ImageType", vec!["ORIGINAL", "PRIMARY"]);
        assert!(respects(&s, &all_present));

        let one_missing = Description::new("anat", "T1w")
            .with_criterion("ImageType", vec!["ORIGINAL", "DERIVED"]);
        assert!(!respects(&s, &one_missing));
    }

    #[test]
    fn test_list_value_is_existential() {
        let s = sidecar(&[("ImageType", vec!["a", "b"].into())]);

        let include = Description::new("anat", "T1w").with_criterion("ImageType", "b");
        assert!(respects(&s, &include));

        let exclude = Description::new("anat", "T1w")
            .with_criterion("SidecarFilename", "*.json")
            .with_exclude("ImageType", "b");
        assert!(!respects(&s, &exclude));
    }

    #[test]
    fn test_empty_list_value_matches_nothing() {
        let s = sidecar(&[("ImageType", TagValue::List(vec![]))]);
        let description = Description::new("anat", "T1w").with_criterion("ImageType", "*");
        assert!(!respects(&s, &description));
    }

    #[test]
    fn test_exclude_on_absent_tag_is_skipped() {
        let s = sidecar(&[("SeriesDescription", "T1w".into())]);
        let base = Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1w");

        // "*" would match the null placeholder if the rule were evaluated
        let with_absent_exclude = base.clone().with_exclude("ProtocolName", "*");
        assert_eq!(respects(&s, &base), respects(&s, &with_absent_exclude));
        assert!(respects(&s, &with_absent_exclude));
    }

    #[test]
    fn test_exclude_on_present_tag() {
        let s = sidecar(&[
            ("SeriesDescription", "T1w".into()),
            ("ImageType", vec!["DERIVED", "MOCO"].into()),
        ]);
        let base = Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1w");

        assert!(!respects(&s, &base.clone().with_exclude("ImageType", vec!["ORIGINAL", "*MOCO*"])));
        assert!(respects(&s, &base.with_exclude("ImageType", vec!["ORIGINAL", "NORM"])));
    }

    #[test]
    fn test_absent_criteria_tag_compares_as_null() {
        let s = sidecar(&[]);

        let needs_value = Description::new("anat", "T1w").with_criterion("SeriesDescription", "T1*");
        assert!(!respects(&s, &needs_value));

        let wildcard = Description::new("anat", "T1w").with_criterion("SeriesDescription", "*");
        assert!(respects(&s, &wildcard));
    }

    #[test]
    fn test_contradictory_criteria_and_exclude() {
        let s = sidecar(&[("SeriesDescription", "T1w".into())]);
        let description = Description::new("anat", "T1w")
            .with_criterion("SeriesDescription", "T1*")
            .with_exclude("SeriesDescription", "*w");
        assert!(!respects(&s, &description));
    }

    #[test]
    fn test_invalid_pattern_degrades() {
        let s = sidecar(&[("SeriesDescription", "T1w".into())]);

        let bad_criterion = Description::new("anat", "T1w").with_criterion("SeriesDescription", "[z-a]");
        assert!(!respects(&s, &bad_criterion));

        let bad_exclude = Description::new("anat", "T1w")
            .with_criterion("SeriesDescription", "T1w")
            .with_exclude("SeriesDescription", "[z-a]");
        assert!(respects(&s, &bad_exclude));
    }

    #[test]
    fn test_match_on_sidecar_filename() {
        let s = sidecar(&[]);
        let description = Description::new("anat", "T1w").with_criterion("SidecarFilename", "a.*");
        assert!(respects(&s, &description));
    }

    #[test]
    fn test_compiled_description_reuse() {
        let compiled = CompiledDescription::compile(
            &Description::new("func", "bold").with_criterion("TaskName", "rest"),
        );

        assert!(compiled.is_matched_by(&sidecar(&[("TaskName", "rest".into())])));
        assert!(!compiled.is_matched_by(&sidecar(&[("TaskName", "motor".into())])));
    }
}
