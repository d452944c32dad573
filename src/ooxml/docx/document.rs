/// Document - the built content tree of the main document part.
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::section::SectionProperties;
use crate::ooxml::docx::table::Table;
use serde::Serialize;

/// A block-level element: the only kinds of direct children of the body,
/// a table cell, a header/footer, a note or a comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn text(&self) -> String {
        match self {
            Self::Paragraph(p) => p.text(),
            Self::Table(t) => t
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| cell.text())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    #[inline]
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Self::Paragraph(p) => Some(p),
            Self::Table(_) => None,
        }
    }

    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            Self::Paragraph(_) => None,
        }
    }
}

/// Plain text of a block list, one line per block.
pub fn blocks_text(blocks: &[Block]) -> String {
    blocks.iter().map(Block::text).collect::<Vec<_>>().join("\n")
}

/// A Word document's content.
///
/// Holds the body blocks in reading order and the sections collected while
/// building them. There is always at least one section.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// let doc = parsed.document();
///
/// println!("Document text: {}", doc.text());
/// println!("Number of paragraphs: {}", doc.paragraphs().count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    blocks: Vec<Block>,
    sections: Vec<SectionProperties>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Document {
    /// Create a document. An empty section list is replaced by one default
    /// section.
    pub fn new(blocks: Vec<Block>, mut sections: Vec<SectionProperties>) -> Self {
        if sections.is_empty() {
            sections.push(SectionProperties::default());
        }
        Self { blocks, sections }
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn sections(&self) -> &[SectionProperties] {
        &self.sections
    }

    /// Top-level paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Top-level tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Get all text content from the document, blocks joined by newlines.
    pub fn text(&self) -> String {
        blocks_text(&self.blocks)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
