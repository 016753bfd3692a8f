//! Error types for the capabilities pipelines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using CapabilitiesError.
pub type CapabilitiesResult<T> = Result<T, CapabilitiesError>;

/// Failure modes of a single parse attempt.
///
/// Everything here is returned as data from the pipeline entry points;
/// nothing in the library path panics on bad input.
#[derive(Debug, Error)]
pub enum CapabilitiesError {
    /// The input text is not well-formed XML. Fatal; no partial result.
    #[error("XML parsing error: {0}")]
    MalformedXml(String),

    /// The document parsed but is an error payload from the remote service.
    /// The message is pre-rendered in the dialect of the calling pipeline.
    #[error("{0}")]
    ServiceException(String),

    /// The WFS pipeline was handed a document without a `WFS_Capabilities`
    /// root.
    #[error("This does not appear to be a valid WFS GetCapabilities document")]
    NotWfsCapabilities,

    /// The document contained capabilities content but failed the
    /// required-field or compatibility checks. The partial model is
    /// discarded.
    #[error("{0}")]
    Validation(String),
}

/// Diagnostic entry carried in the output model's `errors` array.
///
/// Non-fatal by definition; never raised as a control-flow error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ParsedError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CapabilitiesError::Validation("No layers with EPSG:3857 projection found".into());
        assert_eq!(err.to_string(), "No layers with EPSG:3857 projection found");

        let err = CapabilitiesError::NotWfsCapabilities;
        assert_eq!(
            err.to_string(),
            "This does not appear to be a valid WFS GetCapabilities document"
        );
    }

    #[test]
    fn test_parsed_error_hint_skipped_when_absent() {
        let err = ParsedError::new("MissingServiceTitle", "Service title not found");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("hint").is_none());

        let err = err.with_hint("Using default title");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["hint"], "Using default title");
    }
}
