use thiserror::Error;

/// Failures of the container layer: the archive itself, a part's XML, or
/// a part name.
#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Invalid part name: {0}")]
    InvalidPartName(String),

    #[error("Part not found: {0}")]
    MissingPart(String),

    #[error("Relationship {0} targets an external resource")]
    ExternalTarget(String),

    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
