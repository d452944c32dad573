/// Part loading and content-tree building for Word documents.
///
/// [`DocumentPart`] loads the main document part; [`DocumentBuilder`] turns
/// any part's element tree (body, header, footer, note, comment) into
/// [`Block`](crate::ooxml::docx::Block)s in one forward pass.
mod bookmarks;
pub mod builder;
pub mod document_part;
mod inline;

pub use builder::{DocumentBuilder, MAX_NESTING};
pub use document_part::DocumentPart;
pub(crate) use document_part::{core_properties_uri, optional_part, part_relationships};
