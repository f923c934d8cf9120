//! Error handling module

use thiserror::Error;

/// Result type alias for operations that can fail with `PolicyStudioError`
pub type Result<T> = std::result::Result<T, PolicyStudioError>;

/// Error type for policy synthesis and explanation.
///
/// Synthesis itself never fails: every structurally-typed access request is
/// reflected into a policy document verbatim, and validation of user input
/// is a separate boundary operation. The variants here cover explanation of
/// untrusted policy text and boundary validation.
#[derive(Error, Debug)]
pub enum PolicyStudioError {
    /// JSON parsing and serialization errors with context
    #[error("JSON parsing error in {context}: {source}")]
    JsonParsing {
        /// Context where the JSON error occurred (e.g., "policy document")
        context: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON whose shape is not a supported policy document
    #[error("Unsupported policy shape: {message}")]
    UnsupportedShape {
        /// Which required field was missing or of an unexpected shape
        message: String,
    },

    /// Input validation errors for user-provided data
    #[error("Validation error: {message}")]
    Validation {
        /// Detailed validation error message
        message: String,
        /// Optional field name that failed validation
        field: Option<String>,
    },
}

impl PolicyStudioError {
    /// Create a JSON parsing error with context
    pub(crate) fn json_parsing(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParsing {
            context: context.into(),
            source,
        }
    }

    /// Create an unsupported shape error
    pub(crate) fn unsupported_shape(message: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            message: message.into(),
        }
    }

    /// Create a validation error tied to a specific request field
    pub(crate) fn validation_for_field(
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Convert stray JSON errors to `PolicyStudioError`
impl From<serde_json::Error> for PolicyStudioError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonParsing {
            context: "unknown context".to_string(),
            source: error,
        }
    }
}
