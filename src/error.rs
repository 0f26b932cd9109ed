//! Error types for undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering a document body.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XML tokenizer rejected the input.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Markup that the permissive parser would recover from, rejected in strict mode.
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// The source has no `w:body` element.
    #[error("No body element found")]
    NoBodyElement,

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoBodyElement;
        assert_eq!(err.to_string(), "No body element found");

        let err = Error::InvalidFormat("pdf".to_string());
        assert_eq!(err.to_string(), "Invalid output format: pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
