//! Block-level tree building: body, tables and any other container of
//! paragraphs (cells, headers, footers, notes, comments).
use crate::common::error::{DiagnosticKind, Diagnostics, Error, Result};
use crate::common::xml::XmlElement;
use crate::ooxml::docx::bookmark::Bookmark;
use crate::ooxml::docx::document::{Block, Document};
use crate::ooxml::docx::format::ParagraphProperties;
use crate::ooxml::docx::paragraph::{Inline, Paragraph};
use crate::ooxml::docx::parts::bookmarks::{BookmarkScan, Captured, Step};
use crate::ooxml::docx::section::SectionProperties;
use crate::ooxml::docx::table::{
    CellProperties, RowProperties, Table, TableCell, TableProperties, TableRow,
};
use crate::ooxml::opc::Relationships;

/// Deepest element nesting (tables in tables, wrappers in wrappers) that is
/// built; anything deeper is skipped with a diagnostic.
pub const MAX_NESTING: usize = 32;

/// Kinds of block-level children, in handler priority order.
#[derive(Debug, Clone, Copy)]
enum BlockElement<'x> {
    Table(&'x XmlElement),
    Paragraph(&'x XmlElement),
    /// A run or other inline element directly in a block container
    StrayInline(&'x XmlElement),
    /// A wrapper whose children are content of the enclosing container
    Transparent(&'x XmlElement),
    SectionBreak(&'x XmlElement),
    Dropped,
    Unknown(&'x XmlElement),
}

fn classify(el: &XmlElement) -> BlockElement<'_> {
    match el.local_name() {
        "tbl" => BlockElement::Table(el),
        "p" => BlockElement::Paragraph(el),
        "r" | "hyperlink" | "fldSimple" => BlockElement::StrayInline(el),
        "ins" | "customXml" | "smartTag" | "moveTo" => BlockElement::Transparent(el),
        "sdt" => match el.child("sdtContent") {
            Some(content) => BlockElement::Transparent(content),
            None => BlockElement::Dropped,
        },
        "sectPr" => BlockElement::SectionBreak(el),
        "del" | "moveFrom" | "proofErr" | "permStart" | "permEnd" | "commentRangeStart"
        | "commentRangeEnd" => BlockElement::Dropped,
        _ => BlockElement::Unknown(el),
    }
}

/// Collect `local` children of `parent`, looking through wrapper elements.
fn collect_wrapped<'x>(parent: &'x XmlElement, local: &str, out: &mut Vec<&'x XmlElement>) {
    for child in parent.elements() {
        if child.is(local) {
            out.push(child);
        } else if matches!(child.local_name(), "ins" | "customXml" | "smartTag" | "moveTo") {
            collect_wrapped(child, local, out);
        } else if child.is("sdt")
            && let Some(content) = child.child("sdtContent")
        {
            collect_wrapped(content, local, out);
        }
    }
}

fn block_has_page_break(block: &Block) -> bool {
    match block {
        Block::Paragraph(p) => p.has_page_break(),
        Block::Table(t) => t.properties.page_break_after,
    }
}

/// Place pending bookmark markers at the start of a paragraph.
fn attach_bookmarks(paragraph: &mut Paragraph, pending: &mut Vec<Bookmark>) {
    if !pending.is_empty() {
        paragraph
            .content
            .splice(0..0, pending.drain(..).map(Inline::Bookmark));
    }
}

/// Markers still pending when a container ends go to its last paragraph.
fn attach_leftover(blocks: &mut [Block], pending: &mut Vec<Bookmark>) {
    if pending.is_empty() {
        return;
    }
    match blocks.iter_mut().rev().find_map(|b| match b {
        Block::Paragraph(p) => Some(p),
        Block::Table(_) => None,
    }) {
        Some(paragraph) => paragraph.content.extend(pending.drain(..).map(Inline::Bookmark)),
        None => {
            tracing::debug!(count = pending.len(), "dropping bookmarks without a paragraph");
            pending.clear();
        },
    }
}

/// Builds the content tree of one part.
///
/// The builder walks every container once, left to right. It owns the
/// section list collected from the main document body.
pub struct DocumentBuilder<'a> {
    pub(crate) part: &'a str,
    pub(crate) rels: &'a Relationships,
    diagnostics: &'a Diagnostics,
    collect_sections: bool,
    sections: Vec<SectionProperties>,
    depth: usize,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder for the part named `part`, resolving relationship
    /// ids through `rels`.
    pub fn new(part: &'a str, rels: &'a Relationships, diagnostics: &'a Diagnostics) -> Self {
        Self {
            part,
            rels,
            diagnostics,
            collect_sections: false,
            sections: Vec::new(),
            depth: 0,
        }
    }

    /// Build the main document from its `w:document` root.
    ///
    /// A root that is not a `w:document` with a `w:body` is a fatal error.
    pub fn build_document(mut self, root: &XmlElement) -> Result<Document> {
        if !root.is("document") {
            return Err(Error::MalformedMainDocument {
                part: self.part.to_string(),
                message: format!("unexpected root element <{}>", root.name()),
            });
        }
        let Some(body) = root.child("body") else {
            return Err(Error::MalformedMainDocument {
                part: self.part.to_string(),
                message: "missing <w:body>".to_string(),
            });
        };

        self.collect_sections = true;
        let blocks = self.build_blocks(body);
        tracing::debug!(
            part = self.part,
            blocks = blocks.len(),
            sections = self.sections.len(),
            "built document body"
        );
        Ok(Document::new(blocks, self.sections))
    }

    /// Build the block content of any container element.
    pub fn build_blocks(&mut self, container: &XmlElement) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut pending = Vec::new();
        self.scan_blocks(container.elements(), &mut blocks, &mut pending);
        attach_leftover(&mut blocks, &mut pending);
        blocks
    }

    fn scan_blocks<'x>(
        &mut self,
        siblings: impl Iterator<Item = &'x XmlElement>,
        out: &mut Vec<Block>,
        pending: &mut Vec<Bookmark>,
    ) {
        let mut scanner = BookmarkScan::default();
        for el in siblings {
            if let Some(step) = scanner.feed(el) {
                self.apply(step, out, pending);
            }
        }
        if let Some(step) = scanner.finish() {
            self.apply(step, out, pending);
        }
    }

    fn apply(&mut self, step: Step<'_>, out: &mut Vec<Block>, pending: &mut Vec<Bookmark>) {
        match step {
            Step::Emit(el) => self.handle_block(el, out, pending),
            Step::Splice { bookmark, buffer } => {
                pending.push(bookmark);
                for item in buffer {
                    match item {
                        Captured::Element(el) => self.handle_block(el, out, pending),
                        Captured::Marker(inner) => pending.push(inner),
                    }
                }
            },
        }
    }

    fn handle_block(&mut self, el: &XmlElement, out: &mut Vec<Block>, pending: &mut Vec<Bookmark>) {
        match classify(el) {
            BlockElement::Table(tbl) => {
                if let Some(table) = self.build_table(tbl) {
                    out.push(Block::Table(table));
                }
            },
            BlockElement::Paragraph(p) => {
                let mut paragraph = self.build_paragraph(p);
                attach_bookmarks(&mut paragraph, pending);
                out.push(Block::Paragraph(paragraph));
            },
            BlockElement::StrayInline(inline) => {
                let mut paragraph =
                    Paragraph::new(ParagraphProperties::default(), self.build_inlines(std::iter::once(inline)));
                attach_bookmarks(&mut paragraph, pending);
                out.push(Block::Paragraph(paragraph));
            },
            BlockElement::Transparent(wrapper) => {
                if self.enter(wrapper) {
                    self.scan_blocks(wrapper.elements(), out, pending);
                    self.leave();
                }
            },
            BlockElement::SectionBreak(sect_pr) => {
                if self.collect_sections {
                    self.sections.push(SectionProperties::from_xml(sect_pr, self.rels));
                }
            },
            BlockElement::Dropped => {},
            BlockElement::Unknown(other) => {
                tracing::debug!(element = other.name(), part = self.part, "skipping block element");
            },
        }
    }

    /// Build a `w:p`. A `w:sectPr` inside its properties closes a section.
    pub fn build_paragraph(&mut self, p: &XmlElement) -> Paragraph {
        let ppr = p.child("pPr");
        let properties = ppr.map(ParagraphProperties::from_xml).unwrap_or_default();
        let content = self.build_inlines(p.elements().filter(|e| !e.is("pPr")));

        let mut paragraph = Paragraph::new(properties, content);
        paragraph.merge_runs();

        if self.collect_sections
            && let Some(sect_pr) = ppr.and_then(|ppr| ppr.child("sectPr"))
        {
            self.sections.push(SectionProperties::from_xml(sect_pr, self.rels));
            paragraph.section = Some(self.sections.len() - 1);
        }
        paragraph
    }

    /// Build a `w:tbl`. Returns `None` when nested too deeply.
    pub fn build_table(&mut self, tbl: &XmlElement) -> Option<Table> {
        if !self.enter(tbl) {
            return None;
        }

        let properties = tbl
            .child("tblPr")
            .map(TableProperties::from_xml)
            .unwrap_or_default();
        let grid = tbl
            .child("tblGrid")
            .map(|grid| {
                grid.children_named("gridCol")
                    .map(|col| col.attr_i64("w").unwrap_or(0))
                    .collect()
            })
            .unwrap_or_default();

        let mut row_elements = Vec::new();
        collect_wrapped(tbl, "tr", &mut row_elements);
        let rows = row_elements.into_iter().map(|tr| self.build_row(tr)).collect();
        self.leave();

        let mut table = Table {
            properties,
            grid,
            rows,
        };
        if let Some(style_id) = table.properties.style_id.clone() {
            for row in &mut table.rows {
                row.properties.style_id = Some(style_id.clone());
                for cell in &mut row.cells {
                    cell.properties.style_id = Some(style_id.clone());
                }
            }
        }
        table.properties.page_break_before = table
            .rows
            .first()
            .and_then(|row| row.cells.first())
            .and_then(|cell| cell.content.first())
            .and_then(Block::as_paragraph)
            .is_some_and(|p| p.properties.page_break_before == Some(true));
        table.properties.page_break_after = table.rows.last().is_some_and(|row| {
            row.cells
                .iter()
                .any(|cell| cell.content.iter().any(block_has_page_break))
        });
        Some(table)
    }

    fn build_row(&mut self, tr: &XmlElement) -> TableRow {
        let mut cell_elements = Vec::new();
        collect_wrapped(tr, "tc", &mut cell_elements);
        TableRow {
            properties: tr
                .child("trPr")
                .map(RowProperties::from_xml)
                .unwrap_or_default(),
            cells: cell_elements.into_iter().map(|tc| self.build_cell(tc)).collect(),
        }
    }

    fn build_cell(&mut self, tc: &XmlElement) -> TableCell {
        let mut content = Vec::new();
        let mut pending = Vec::new();
        self.scan_blocks(tc.elements().filter(|e| !e.is("tcPr")), &mut content, &mut pending);
        attach_leftover(&mut content, &mut pending);
        TableCell {
            properties: tc
                .child("tcPr")
                .map(CellProperties::from_xml)
                .unwrap_or_default(),
            content,
        }
    }

    /// Descend one nesting level; `false` (with a diagnostic) when too deep.
    pub(crate) fn enter(&mut self, el: &XmlElement) -> bool {
        if self.depth >= MAX_NESTING {
            self.diagnostics.record(
                self.part,
                DiagnosticKind::SkippedElement,
                format!("<{}> nested deeper than {MAX_NESTING} levels", el.name()),
            );
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::{BreakType, WdOrientation, WdSectionStart};
    use crate::ooxml::docx::paragraph::RunContent;
    use crate::ooxml::docx::table::VMergeState;
    use crate::testing::wrap_document;

    fn build(body: &str) -> (Document, Diagnostics) {
        let root = XmlElement::parse(wrap_document(body).as_bytes()).unwrap();
        let rels = Relationships::new("/word");
        let diagnostics = Diagnostics::new();
        let doc = DocumentBuilder::new("/word/document.xml", &rels, &diagnostics)
            .build_document(&root)
            .unwrap();
        (doc, diagnostics)
    }

    fn paragraph(block: &Block) -> &Paragraph {
        block.as_paragraph().expect("paragraph")
    }

    #[test]
    fn test_plain_paragraph() {
        let (doc, _) = build(r#"<w:p><w:r><w:t>Hello &amp; welcome</w:t></w:r></w:p>"#);
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.text(), "Hello & welcome");
        assert_eq!(doc.sections().len(), 1);
    }

    #[test]
    fn test_table() {
        let (doc, _) = build(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="Grid"/></w:tblPr><w:tblGrid><w:gridCol w:w="4000"/><w:gridCol w:w="5000"/></w:tblGrid>
<w:tr><w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr>
<w:sdt><w:sdtContent><w:tr><w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc><w:tc><w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc></w:tr></w:sdtContent></w:sdt>
</w:tbl>"#,
        );
        let table = doc.blocks()[0].as_table().unwrap();
        assert_eq!(table.grid, vec![4000, 5000]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.properties.style_id.as_deref(), Some("Grid"));
        assert_eq!(table.rows[1].properties.style_id.as_deref(), Some("Grid"));
        assert_eq!(
            table.cell(0, 1).and_then(|c| c.properties.style_id.as_deref()),
            Some("Grid")
        );
        assert_eq!(table.cell(0, 1).map(|c| c.text()).as_deref(), Some("B"));
        assert_eq!(table.row_span(0, 0), 2);
        assert_eq!(
            table.cell(1, 0).and_then(|c| c.properties.vertical_merge),
            Some(VMergeState::Continue)
        );
        let nested = table.cell(1, 1).unwrap();
        assert!(matches!(nested.content[0], Block::Table(_)));
        assert_eq!(nested.text(), "inner\n");
    }

    #[test]
    fn test_sections() {
        let (doc, _) = build(
            r#"<w:p><w:pPr><w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:pPr><w:r><w:t>one</w:t></w:r></w:p>
<w:p><w:r><w:t>two</w:t></w:r></w:p>
<w:sectPr><w:type w:val="continuous"/><w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/></w:sectPr>"#,
        );
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(paragraph(&doc.blocks()[0]).section, Some(0));
        assert_eq!(paragraph(&doc.blocks()[1]).section, None);
        assert_eq!(doc.sections()[1].orientation(), WdOrientation::Landscape);
        assert_eq!(doc.sections()[1].start, WdSectionStart::Continuous);
    }

    #[test]
    fn test_body_bookmark_span() {
        let (doc, _) = build(
            r#"<w:bookmarkStart w:id="4" w:name="chapter"/><w:p><w:r><w:t>Title</w:t></w:r></w:p><w:p/><w:bookmarkEnd w:id="4"/>
<w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        assert_eq!(doc.blocks().len(), 3);
        let first = paragraph(&doc.blocks()[0]);
        assert!(matches!(&first.content[0], Inline::Bookmark(b) if b.name() == "chapter"));
        assert_eq!(first.text(), "Title");
        assert_eq!(doc.blocks()[2].text(), "after");
    }

    #[test]
    fn test_unclosed_bookmarks_mark_next_paragraph() {
        let mut body = String::new();
        for i in 0..3000 {
            body.push_str(&format!(r#"<w:bookmarkStart w:id="{i}" w:name="b{i}"/>"#));
        }
        body.push_str(r#"<w:p><w:r><w:t>end</w:t></w:r></w:p><w:bookmarkEnd w:id="7"/>"#);
        let (doc, diagnostics) = build(&body);
        assert_eq!(doc.blocks().len(), 1);
        let para = paragraph(&doc.blocks()[0]);
        assert_eq!(para.text(), "end");
        let marks: Vec<_> = para
            .content
            .iter()
            .filter_map(|i| match i {
                Inline::Bookmark(b) => Some(b.name()),
                _ => None,
            })
            .collect();
        assert_eq!(marks.len(), 3000);
        assert_eq!(marks[0], "b0");
        assert_eq!(marks[2999], "b2999");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_wrappers_and_unknown_elements() {
        let (doc, _) = build(
            r#"<w:customXml><w:p><w:r><w:t>a</w:t></w:r></w:p></w:customXml><w:sdt><w:sdtPr/><w:sdtContent><w:p><w:r><w:t>b</w:t></w:r></w:p></w:sdtContent></w:sdt>
<w:del><w:p/></w:del><w:altChunk/><w:r><w:t>stray</w:t></w:r>"#,
        );
        assert_eq!(doc.text(), "a\nb\nstray");
    }

    #[test]
    fn test_table_page_breaks() {
        let (doc, _) = build(
            r#"<w:tbl><w:tr><w:tc><w:p><w:pPr><w:pageBreakBefore/></w:pPr></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:br w:type="page"/></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let table = doc.blocks()[0].as_table().unwrap();
        assert!(table.properties.page_break_before);
        assert!(table.properties.page_break_after);
        let Some(Block::Paragraph(p)) = table.cell(1, 0).and_then(|c| c.content.first()) else {
            panic!("expected paragraph");
        };
        assert!(matches!(
            p.runs().next().map(|r| &r.content[0]),
            Some(RunContent::Break(BreakType::Page))
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let mut body = String::new();
        for _ in 0..MAX_NESTING + 2 {
            body.push_str("<w:tbl><w:tr><w:tc>");
        }
        body.push_str("<w:p/>");
        for _ in 0..MAX_NESTING + 2 {
            body.push_str("</w:tc></w:tr></w:tbl>");
        }
        let (doc, diagnostics) = build(&body);
        assert_eq!(doc.tables().count(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.snapshot()[0].kind(), DiagnosticKind::SkippedElement);
    }

    #[test]
    fn test_malformed_root() {
        let root = XmlElement::parse(br#"<w:styles xmlns:w="w"/>"#).unwrap();
        let rels = Relationships::new("/word");
        let diagnostics = Diagnostics::new();
        let err = DocumentBuilder::new("/word/document.xml", &rels, &diagnostics)
            .build_document(&root)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedMainDocument { .. }));
    }
}
