//! Error types for document resolution and template building.
//! Error handling types and result definitions shared across the crate.

use thiserror::Error;

/// Result type for resolution and template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Error taxonomy for converting documents into certificate templates
#[derive(Error, Debug, miette::Diagnostic)]
pub enum TemplateError {
    #[error("segment '{0}' referenced in merge but not defined")]
    #[diagnostic(help("add the segment under `segments:` or remove it from `merge:`"))]
    MissingSegment(String),

    #[error("Document error: {0}")]
    DocumentError(String),

    #[error("ASN.1 encoding/decoding error: {0}")]
    Asn1Error(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TemplateError {
    /// Name of the missing segment, if this is a resolution failure
    #[must_use]
    pub fn missing_segment(&self) -> Option<&str> {
        match self {
            TemplateError::MissingSegment(name) => Some(name),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for TemplateError {
    fn from(error: serde_yaml::Error) -> Self {
        TemplateError::DocumentError(error.to_string())
    }
}

impl From<der::Error> for TemplateError {
    fn from(error: der::Error) -> Self {
        TemplateError::Asn1Error(error.to_string())
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(error: std::io::Error) -> Self {
        TemplateError::IoError(error.to_string())
    }
}
