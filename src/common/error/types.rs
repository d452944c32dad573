//! Crate-level error type.
use crate::ooxml::opc::error::OpcError;
use thiserror::Error;

/// Main error type for Longan operations.
///
/// Every variant is fatal: when one of these is returned nothing partial is
/// handed back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading the container
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container itself could not be opened
    #[error("Package error: {0}")]
    Opc(#[from] OpcError),

    /// The main document part is absent
    #[error("Main document part not found: {0}")]
    MissingMainDocument(String),

    /// The main document part exists but cannot be parsed
    #[error("Main document part '{part}' is malformed: {message}")]
    MalformedMainDocument { part: String, message: String },
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingMainDocument("/word/document.xml".to_string());
        assert_eq!(
            err.to_string(),
            "Main document part not found: /word/document.xml"
        );

        let err = Error::MalformedMainDocument {
            part: "/word/document.xml".to_string(),
            message: "unexpected end".to_string(),
        };
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_from_opc_error() {
        let err: Error = OpcError::MissingPart("/word/styles.xml".to_string()).into();
        assert!(matches!(err, Error::Opc(OpcError::MissingPart(_))));
    }
}
