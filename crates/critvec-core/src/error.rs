//! Error taxonomy for criterion loading, validation and vector generation.

/// Errors produced while loading criteria or building test vectors.
#[derive(Debug, thiserror::Error)]
pub enum CriterionError {
    #[error("malformed criterion definition at line {line}: {reason} ({content:?})")]
    MalformedDefinition {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("invalid value {value:?} for criterion {criterion}")]
    InvalidCriterionValue { criterion: String, value: String },

    #[error("value {value:?} is not set on criterion {criterion}")]
    ValueNotSet { criterion: String, value: String },

    #[error("test case {case}: {source}")]
    TestCase {
        case: String,
        #[source]
        source: Box<CriterionError>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CriterionError {
    pub(crate) fn invalid_value(criterion: &str, value: &str) -> Self {
        CriterionError::InvalidCriterionValue {
            criterion: criterion.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        CriterionError::MalformedDefinition {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// Strip any `TestCase` wrappers and return the underlying error.
    pub fn root(&self) -> &CriterionError {
        match self {
            CriterionError::TestCase { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for critvec operations.
pub type Result<T> = std::result::Result<T, CriterionError>;
