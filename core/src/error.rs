use thiserror::Error;

/// Result type for bidsmatch operations
pub type Result<T> = std::result::Result<T, BidsMatchError>;

/// Error types for bidsmatch operations
///
/// Matching, acquisition building and run assignment never fail; these
/// errors only surface while parsing configuration or compiling patterns.
#[derive(Error, Debug)]
pub enum BidsMatchError {
    /// Glob pattern that cannot be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Metadata or criteria value of an unsupported shape
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Malformed description configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<String> for BidsMatchError {
    fn from(s: String) -> Self {
        BidsMatchError::Config(s)
    }
}

impl From<&str> for BidsMatchError {
    fn from(s: &str) -> Self {
        BidsMatchError::Config(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BidsMatchError::InvalidPattern {
            pattern: "[z-a]".to_string(),
            reason: "invalid range".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid pattern '[z-a]': invalid range");

        let err: BidsMatchError = "missing descriptions".into();
        assert!(matches!(err, BidsMatchError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: missing descriptions");
    }
}
