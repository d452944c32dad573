/// Footnote and endnote support for Word documents.
///
/// Footnotes appear at the bottom of pages, endnotes at the end of the
/// document. Both are rendered out-of-flow after the page content.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::document::{Block, blocks_text};
use crate::ooxml::docx::parts::DocumentBuilder;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which note part a note or note reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NoteKind {
    Footnote,
    Endnote,
}

impl NoteKind {
    /// Local name of one note element (`footnote`/`endnote`).
    #[inline]
    pub fn element(&self) -> &'static str {
        match self {
            Self::Footnote => "footnote",
            Self::Endnote => "endnote",
        }
    }

    /// Local name of the part's root element.
    #[inline]
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::Footnote => "footnotes",
            Self::Endnote => "endnotes",
        }
    }
}

/// A footnote or endnote.
///
/// Represents a `<w:footnote>` or `<w:endnote>` element. Notes can contain
/// paragraphs and tables, just like the main document body.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// for note in parsed.footnotes().iter() {
///     println!("Footnote {}: {}", note.id(), note.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: i64,
    kind: NoteKind,
    content: Vec<Block>,
}

impl Note {
    pub fn new(id: i64, kind: NoteKind, content: Vec<Block>) -> Self {
        Self { id, kind, content }
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    #[inline]
    pub fn content(&self) -> &[Block] {
        &self.content
    }

    pub fn text(&self) -> String {
        blocks_text(&self.content)
    }
}

/// Whether a `w:type` value marks a separator artifact rather than a note.
fn is_separator(note_type: Option<&str>) -> bool {
    matches!(
        note_type,
        Some("separator" | "continuationSeparator" | "continuationNotice")
    )
}

/// The notes of one part, ordered by numeric id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notes {
    kind: NoteKind,
    notes: BTreeMap<i64, Note>,
}

impl Notes {
    pub fn new(kind: NoteKind) -> Self {
        Self {
            kind,
            notes: BTreeMap::new(),
        }
    }

    /// Build the notes of a `w:footnotes`/`w:endnotes` root.
    ///
    /// Separator and continuation entries are skipped, as are notes whose
    /// id is missing or not numeric.
    pub fn from_xml(root: &XmlElement, kind: NoteKind, builder: &mut DocumentBuilder<'_>) -> Self {
        let mut notes = Self::new(kind);
        for el in root.children_named(kind.element()) {
            if is_separator(el.attr("type")) {
                continue;
            }
            let Some(id) = el.attr_i64("id") else {
                tracing::debug!(kind = kind.element(), "note without a numeric id");
                continue;
            };
            notes.insert(Note::new(id, kind, builder.build_blocks(el)));
        }
        notes
    }

    pub fn insert(&mut self, note: Note) {
        self.notes.insert(note.id, note);
    }

    #[inline]
    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Notes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Diagnostics;
    use crate::ooxml::opc::Relationships;
    use crate::testing::wrap_part;

    fn parse(root: &str, kind: NoteKind, inner: &str) -> Notes {
        let root = XmlElement::parse(wrap_part(root, inner).as_bytes()).unwrap();
        let rels = Relationships::new("/word");
        let diagnostics = Diagnostics::new();
        let mut builder = DocumentBuilder::new("/word/footnotes.xml", &rels, &diagnostics);
        Notes::from_xml(&root, kind, &mut builder)
    }

    #[test]
    fn test_separators_are_skipped() {
        let notes = parse(
            "footnotes",
            NoteKind::Footnote,
            r#"<w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>
<w:footnote w:id="1"><w:p><w:r><w:t>A note.</w:t></w:r></w:p></w:footnote>"#,
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get(1).map(Note::text).as_deref(), Some("A note."));
    }

    #[test]
    fn test_endnotes_in_id_order() {
        let notes = parse(
            "endnotes",
            NoteKind::Endnote,
            r#"<w:endnote w:type="continuationSeparator" w:id="0"/><w:endnote w:id="10"><w:p/></w:endnote><w:endnote w:id="2"><w:p/></w:endnote><w:endnote><w:p/></w:endnote>"#,
        );
        assert_eq!(notes.iter().map(Note::id).collect::<Vec<_>>(), vec![2, 10]);
        assert!(notes.iter().all(|n| n.kind() == NoteKind::Endnote));
    }
}
