//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
///
/// The Markdown conversion itself never fails; these cover format lookup,
/// parsing input documents, and writing exports.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// A rule panicked while converting
    #[error("Conversion panicked: {0}")]
    ConversionPanicked(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
