/// Paragraph and Run structures for Word documents.
use crate::ooxml::docx::bookmark::Bookmark;
use crate::ooxml::docx::drawing::Drawing;
use crate::ooxml::docx::enums::BreakType;
use crate::ooxml::docx::field::Field;
use crate::ooxml::docx::footnote::NoteKind;
use crate::ooxml::docx::format::{ParagraphProperties, RunProperties};
use crate::ooxml::docx::hyperlink::Hyperlink;
use serde::Serialize;

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element: its own paragraph formatting and the
/// inline content in reading order.
///
/// # Example
///
/// ```rust,no_run
/// use longan::ooxml::docx::{Block, Package};
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// for block in parsed.document().blocks() {
///     if let Block::Paragraph(para) = block {
///         println!("Paragraph text: {}", para.text());
///         for run in para.runs() {
///             println!("  Run: {} (bold: {})", run.text(), run.properties.bold());
///         }
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub properties: ParagraphProperties,
    pub content: Vec<Inline>,
    /// Index of the section this paragraph closes, if its `w:pPr` carries a
    /// `w:sectPr`
    pub section: Option<usize>,
}

impl Paragraph {
    pub fn new(properties: ParagraphProperties, content: Vec<Inline>) -> Self {
        Self {
            properties,
            content,
            section: None,
        }
    }

    /// Get the text content of this paragraph.
    pub fn text(&self) -> String {
        inlines_text(&self.content)
    }

    /// Top-level runs (runs inside hyperlinks and fields are not included).
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Whether the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|inline| match inline {
            Inline::Run(run) => run.content.is_empty(),
            Inline::Bookmark(_) => true,
            _ => false,
        })
    }

    /// Whether a page break occurs anywhere in the paragraph.
    pub fn has_page_break(&self) -> bool {
        self.content.iter().any(Inline::has_page_break)
    }

    /// Merge adjacent top-level runs that share identical formatting.
    pub fn merge_runs(&mut self) {
        merge_adjacent_runs(&mut self.content);
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    Run(Run),
    Hyperlink(Hyperlink),
    Field(Field),
    /// Zero-width bookmark start marker
    Bookmark(Bookmark),
}

impl Inline {
    pub fn text(&self) -> String {
        match self {
            Self::Run(run) => run.text(),
            Self::Hyperlink(link) => link.text(),
            Self::Field(field) => field.text(),
            Self::Bookmark(_) => String::new(),
        }
    }

    pub fn has_page_break(&self) -> bool {
        match self {
            Self::Run(run) => run.has_page_break(),
            Self::Hyperlink(link) => link.content().iter().any(Self::has_page_break),
            Self::Field(field) => field.result().iter().any(Self::has_page_break),
            Self::Bookmark(_) => false,
        }
    }
}

/// Concatenated text of inline content.
pub fn inlines_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        match inline {
            Inline::Run(run) => run.push_text(&mut out),
            other => out.push_str(&other.text()),
        }
    }
    out
}

/// Merge adjacent [`Inline::Run`]s with equal properties in place.
pub fn merge_adjacent_runs(content: &mut Vec<Inline>) {
    let mut merged: Vec<Inline> = Vec::with_capacity(content.len());
    for inline in content.drain(..) {
        let Inline::Run(next) = inline else {
            merged.push(inline);
            continue;
        };
        let same_format = matches!(
            merged.last(),
            Some(Inline::Run(prev)) if prev.properties == next.properties
        );
        if !same_format {
            merged.push(Inline::Run(next));
        } else if let Some(Inline::Run(prev)) = merged.last_mut() {
            prev.extend(next.content);
        }
    }
    *content = merged;
}

/// A run of content sharing one character formatting (`w:r`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Run {
    pub properties: RunProperties,
    pub content: Vec<RunContent>,
}

impl Run {
    pub fn new(properties: RunProperties) -> Self {
        Self {
            properties,
            content: Vec::new(),
        }
    }

    /// Plain text; tabs and line breaks become `\t` and `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                RunContent::Text(text) => out.push_str(text),
                RunContent::Tab => out.push('\t'),
                RunContent::Break(BreakType::Line) => out.push('\n'),
                RunContent::Symbol { ch, .. } => out.push(*ch),
                _ => {},
            }
        }
    }

    /// Append content, joining adjacent text.
    pub fn push(&mut self, item: RunContent) {
        if let RunContent::Text(text) = &item
            && let Some(RunContent::Text(prev)) = self.content.last_mut()
        {
            prev.push_str(text);
            return;
        }
        self.content.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = RunContent>) {
        for item in items {
            self.push(item);
        }
    }

    pub fn has_page_break(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, RunContent::Break(BreakType::Page)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// One item inside a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunContent {
    Text(String),
    Tab,
    Break(BreakType),
    /// A `w:sym` character
    Symbol { font: Option<String>, ch: char },
    /// Footnote or endnote reference mark
    NoteReference { kind: NoteKind, id: String },
    CommentReference(String),
    Drawing(Drawing),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::format::RunToggles;

    fn run(text: &str, bold: bool) -> Inline {
        let mut properties = RunProperties::default();
        if bold {
            properties.set_toggle(RunToggles::BOLD, true);
        }
        let mut run = Run::new(properties);
        run.push(RunContent::Text(text.to_string()));
        Inline::Run(run)
    }

    #[test]
    fn test_text() {
        let mut r = Run::default();
        r.push(RunContent::Text("a".into()));
        r.push(RunContent::Tab);
        r.push(RunContent::Text("b".into()));
        r.push(RunContent::Break(BreakType::Line));
        r.push(RunContent::Symbol { font: None, ch: '\u{2022}' });
        assert_eq!(r.text(), "a\tb\n\u{2022}");

        let para = Paragraph::new(
            ParagraphProperties::default(),
            vec![run("x", false), Inline::Bookmark(Bookmark::new("0", "m")), run("y", true)],
        );
        assert_eq!(para.text(), "xy");
        assert_eq!(para.runs().count(), 2);
    }

    #[test]
    fn test_merge_runs() {
        let mut para = Paragraph::new(
            ParagraphProperties::default(),
            vec![run("He", false), run("llo", false), run(" world", true), run("!", true), run(".", false)],
        );
        para.merge_runs();
        assert_eq!(para.content.len(), 3);
        match &para.content[0] {
            Inline::Run(r) => assert_eq!(r.content, vec![RunContent::Text("Hello".into())]),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(para.text(), "Hello world!.");
    }

    #[test]
    fn test_merge_stops_at_markers() {
        let mut content = vec![run("a", false), Inline::Bookmark(Bookmark::new("1", "b")), run("c", false)];
        merge_adjacent_runs(&mut content);
        assert_eq!(content.len(), 3);
    }

    #[test]
    fn test_empty_and_page_break() {
        let para = Paragraph::new(ParagraphProperties::default(), vec![Inline::Bookmark(Bookmark::new("1", "b"))]);
        assert!(para.is_empty());

        let mut r = Run::default();
        r.push(RunContent::Break(BreakType::Page));
        let para = Paragraph::new(ParagraphProperties::default(), vec![Inline::Run(r)]);
        assert!(!para.is_empty());
        assert!(para.has_page_break());
    }
}
