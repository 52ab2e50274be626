use std::fmt;

/// String form given to a tag that is missing from a sidecar, and to JSON `null`
pub const NULL_VALUE: &str = "None";

/// A metadata value or a criteria pattern, in string form
///
/// Sidecar values and description patterns are either a single scalar or an
/// ordered list of scalars. Scalars are kept as the string they compare as,
/// so numbers and booleans are coerced once at the parsing boundary.
///
/// # Example
///
/// ```
/// use bidsmatch_core::TagValue;
///
/// let scalar = TagValue::from("T1w");
/// assert_eq!(scalar.as_slice(), ["T1w"]);
///
/// let list = TagValue::from(vec!["ORIGINAL", "PRIMARY"]);
/// assert!(list.is_list());
/// assert_eq!(list.as_slice().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(try_from = "serde_json::Value"))]
pub enum TagValue {
    Scalar(String),
    List(Vec<String>),
}

impl TagValue {
    /// Returns whether this is a list value
    pub fn is_list(&self) -> bool {
        matches!(self, TagValue::List(_))
    }

    /// Returns the scalars held by this value
    ///
    /// A scalar is viewed as a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            TagValue::Scalar(s) => std::slice::from_ref(s),
            TagValue::List(items) => items,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Scalar(s) => write!(f, "{}", s),
            TagValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Scalar(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Scalar(s)
    }
}

impl<S: Into<String>> From<Vec<S>> for TagValue {
    fn from(items: Vec<S>) -> Self {
        TagValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "json")]
mod coercion {
    use super::{TagValue, NULL_VALUE};
    use crate::error::BidsMatchError;
    use serde_json::Value;

    /// Coerces a JSON scalar to the string it compares as
    ///
    /// Booleans and null take their capitalised spellings (`True`, `False`,
    /// `None`) so that existing descriptions written against them keep working.
    fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("True".to_string()),
            Value::Bool(false) => Some("False".to_string()),
            Value::Null => Some(NULL_VALUE.to_string()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    impl TryFrom<Value> for TagValue {
        type Error = BidsMatchError;

        fn try_from(value: Value) -> Result<Self, Self::Error> {
            match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        scalar_to_string(item).ok_or_else(|| {
                            BidsMatchError::InvalidValue(format!(
                                "list elements must be scalars, got {}",
                                item
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(TagValue::List),
                Value::Object(_) => Err(BidsMatchError::InvalidValue(format!(
                    "expected a scalar or a list of scalars, got {}",
                    value
                ))),
                scalar => scalar_to_string(&scalar)
                    .map(TagValue::Scalar)
                    .ok_or_else(|| BidsMatchError::InvalidValue(scalar.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_slice() {
        let value = TagValue::from("localizer");
        assert!(!value.is_list());
        assert_eq!(value.as_slice(), ["localizer".to_string()]);
    }

    #[test]
    fn test_display() {
        assert_eq!(TagValue::from("T1w").to_string(), "T1w");
        assert_eq!(TagValue::from(vec!["a", "b"]).to_string(), "[a, b]");
    }

    #[cfg(feature = "json")]
    mod json {
        use super::super::*;
        use rstest::rstest;
        use serde_json::json;

        #[rstest]
        #[case(json!("T1w"), TagValue::from("T1w"))]
        #[case(json!(3), TagValue::from("3"))]
        #[case(json!(2.0), TagValue::from("2.0"))]
        #[case(json!(0.5), TagValue::from("0.5"))]
        #[case(json!(true), TagValue::from("True"))]
        #[case(json!(false), TagValue::from("False"))]
        #[case(json!(null), TagValue::from("None"))]
        #[case(json!(["ORIGINAL", 1, null]), TagValue::from(vec!["ORIGINAL", "1", "None"]))]
        fn test_json_coercion(#[case] input: serde_json::Value, #[case] expected: TagValue) {
            assert_eq!(TagValue::try_from(input).unwrap(), expected);
        }

        #[test]
        fn test_json_rejects_objects() {
            assert!(TagValue::try_from(json!({"a": 1})).is_err());
            assert!(TagValue::try_from(json!([["nested"]])).is_err());
            assert!(TagValue::try_from(json!([{"a": 1}])).is_err());
        }

        #[test]
        fn test_deserialize() {
            let value: TagValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
            assert_eq!(value, TagValue::from(vec!["a", "b"]));
        }
    }
}
