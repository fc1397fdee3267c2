//! Error types for presentation conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a presentation or writing its output.
///
/// Classification and rendering never fail; every variant here belongs to
/// the I/O boundary around them.
#[derive(Error, Debug)]
pub enum Error {
    /// The source presentation does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The source is not a presentation format we can read.
    #[error("Unsupported or unrecognized file format: {0}")]
    InputFormatInvalid(String),

    /// Failed to parse the PPTX package structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to serialize the template record.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The destination could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_write_failure_keeps_cause() {
        let err = Error::OutputWriteFailure {
            path: PathBuf::from("out/deck.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.to_string(), "Failed to write out/deck.html: denied");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("denied"));
    }

    #[test]
    fn test_input_not_found_message() {
        let err = Error::InputNotFound(PathBuf::from("missing.pptx"));
        assert_eq!(err.to_string(), "Input file not found: missing.pptx");
    }
}
