/// Open Packaging Conventions: the container archive, part names and
/// relationships.
///
/// This is the ingestion layer. It knows nothing about WordprocessingML; it
/// hands out parsed part trees and relationship maps.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod rel;

pub use error::{OpcError, Result};
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
