/// Word (.docx) document support.
///
/// Parsing turns a WordprocessingML package into a [`ParsedDocument`]: the
/// typed content tree of the main document plus every resource the
/// renderer needs (styles, numbering, fonts, theme, notes, comments,
/// headers and footers, media and core properties).
///
/// # Architecture
///
/// - [`Package`]: the opened container and the parse entry point
/// - [`parts`]: part loading and the single-pass tree builder
/// - [`Document`], [`Block`], [`Paragraph`], [`Run`], [`Table`]: the tree
/// - [`styles`], [`numbering`]: style resolution and list counters
///
/// # Example
///
/// ```rust,no_run
/// use longan::ooxml::docx::{Block, Package};
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// for block in parsed.document().blocks() {
///     match block {
///         Block::Paragraph(para) => println!("Paragraph: {}", para.text()),
///         Block::Table(table) => println!("Table with {} rows", table.row_count()),
///     }
/// }
/// for diagnostic in parsed.diagnostics() {
///     eprintln!("{diagnostic}");
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod bookmark;
pub mod comment;
pub mod document;
pub mod drawing;
pub mod enums;
pub mod field;
pub mod font;
pub mod footnote;
pub mod format;
pub mod header_footer;
pub mod hyperlink;
pub mod media;
pub mod numbering;
pub mod options;
pub mod package;
pub mod paragraph;
pub mod parts;
pub mod section;
pub mod styles;
pub mod table;
pub mod theme;

pub use bookmark::Bookmark;
pub use comment::{Comment, Comments};
pub use document::{Block, Document};
pub use drawing::{Drawing, DrawingKind};
pub use field::Field;
pub use font::{Font, FontTable};
pub use footnote::{Note, NoteKind, Notes};
pub use format::{ParagraphProperties, RunProperties};
pub use header_footer::{HeaderFooter, HeaderFooterKind, HeaderFooters};
pub use hyperlink::Hyperlink;
pub use media::{Media, MediaPart};
pub use numbering::{Numbering, NumberingEngine};
pub use options::ParseOptions;
pub use package::{Package, ParsedDocument};
pub use paragraph::{Inline, Paragraph, Run, RunContent};
pub use parts::DocumentPart;
pub use section::SectionProperties;
pub use styles::{Style, StyleRegistry};
pub use table::{Table, TableCell, TableRow};
pub use theme::Theme;
