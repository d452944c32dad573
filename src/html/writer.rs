/// Low-level writer for HTML generation.
///
/// `HtmlWriter` owns the mutable state of one render pass: the output
/// buffer, the numbering counters and the page-break signal raised by
/// paragraph content.
use super::config::HtmlOptions;
use super::error::{RenderError, RenderResult};
use super::style::{
    Declarations, align_class, cell_declarations, indent_class, paragraph_declarations, run_declarations,
    table_declarations,
};
use crate::common::unit::css_pt;
use crate::common::xml::{escape_html, escape_html_preserving_spaces};
use crate::ooxml::docx::document::Block;
use crate::ooxml::docx::drawing::{Drawing, DrawingKind};
use crate::ooxml::docx::enums::{BreakType, WdStyleType};
use crate::ooxml::docx::field::Field;
use crate::ooxml::docx::footnote::NoteKind;
use crate::ooxml::docx::format::{Borders, Indentation, ParagraphProperties, RunProperties};
use crate::ooxml::docx::hyperlink::Hyperlink;
use crate::ooxml::docx::numbering::{LevelSuffix, NumberingEngine};
use crate::ooxml::docx::package::ParsedDocument;
use crate::ooxml::docx::paragraph::{Inline, Paragraph, Run, RunContent};
use crate::ooxml::docx::parts::MAX_NESTING;
use crate::ooxml::docx::styles::ResolvedStyle;
use crate::ooxml::docx::table::{Table, TableCell, VMergeState};
use std::fmt::Write as FmtWrite;
use std::sync::Arc;

/// One rendered top-level block with its pagination signals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RenderedBlock {
    pub html: String,
    /// Start a new page before this block
    pub break_before: bool,
    /// Start a new page after this block
    pub break_after: bool,
}

pub(crate) struct HtmlWriter<'a> {
    doc: &'a ParsedDocument,
    options: &'a HtmlOptions,
    numbering: NumberingEngine<'a>,
    buffer: String,
    depth: usize,
    page_break: bool,
}

impl<'a> HtmlWriter<'a> {
    pub fn new(doc: &'a ParsedDocument, options: &'a HtmlOptions) -> Self {
        Self {
            doc,
            options,
            numbering: NumberingEngine::new(doc.numbering()),
            buffer: String::with_capacity(4096),
            depth: 0,
            page_break: false,
        }
    }

    #[inline]
    pub fn options(&self) -> &'a HtmlOptions {
        self.options
    }

    /// Start a new pass: list counters restart and buffered output is
    /// discarded.
    pub fn reset(&mut self) {
        self.numbering.reset();
        self.reset_output();
    }

    /// Render one body block.
    pub fn render_block(&mut self, block: &Block) -> RenderResult<RenderedBlock> {
        self.reset_output();

        let (break_before, break_after) = match block {
            Block::Paragraph(para) => {
                let before = self.write_paragraph(para)?;
                (before, self.page_break || self.ends_page_section(para))
            },
            Block::Table(table) => {
                self.write_table(table)?;
                (table.properties.page_break_before, table.properties.page_break_after)
            },
        };

        Ok(RenderedBlock {
            html: std::mem::take(&mut self.buffer),
            break_before,
            break_after,
        })
    }

    /// Discard buffered output and per-block state, keeping list counters.
    pub fn reset_output(&mut self) {
        self.buffer.clear();
        self.depth = 0;
        self.page_break = false;
    }

    /// Take the buffered output.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    #[inline]
    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn write_blocks(&mut self, blocks: &[Block]) -> RenderResult<()> {
        for block in blocks {
            match block {
                Block::Paragraph(para) => {
                    self.write_paragraph(para)?;
                },
                Block::Table(table) => self.write_table(table)?,
            }
        }
        Ok(())
    }

    /// Whether `para` closes a section followed by one that starts on a new
    /// page.
    fn ends_page_section(&self, para: &Paragraph) -> bool {
        let Some(index) = para.section else {
            return false;
        };
        self.doc
            .document()
            .sections()
            .get(index + 1)
            .is_some_and(|next| next.start.starts_new_page())
    }

    fn paragraph_style(&self, id: Option<&str>) -> Option<Arc<ResolvedStyle>> {
        let styles = self.doc.styles();
        id.and_then(|id| styles.resolve(id)).or_else(|| {
            styles
                .default_style(WdStyleType::Paragraph)
                .and_then(|style| styles.resolve(style.id()))
        })
    }

    /// Effective paragraph formatting: direct, then the paragraph style (or
    /// the default paragraph style), then document defaults. A numbered
    /// paragraph without direct indentation takes its level's indentation.
    fn paragraph_properties(&self, para: &Paragraph, style: Option<&ResolvedStyle>) -> ParagraphProperties {
        let mut props = para.properties.clone();
        if let Some(style) = style {
            props.inherit_from(&style.paragraph);
        }
        props.inherit_from(&self.doc.styles().defaults().paragraph);

        if para.properties.indentation == Indentation::default()
            && let Some((num_id, level)) = props.numbering_target()
            && let Some(level) = self.doc.numbering().level(num_id, level)
            && let Some(level_props) = level.paragraph.as_ref()
            && level_props.indentation != Indentation::default()
        {
            props.indentation = level_props.indentation.clone();
        }
        props
    }

    /// Run formatting every run of a paragraph starts from.
    fn base_run_properties(&self, style: Option<&ResolvedStyle>) -> RunProperties {
        let mut base = style.map(|s| s.run.clone()).unwrap_or_default();
        base.inherit_from(&self.doc.styles().defaults().run);
        base
    }

    fn run_properties(&self, run: &Run, base: &RunProperties) -> RunProperties {
        let mut props = run.properties.clone();
        if let Some(character) = run.properties.style_id.as_deref().and_then(|id| self.doc.styles().resolve(id)) {
            props.inherit_from(&character.run);
        }
        props.inherit_from(base);
        props
    }

    fn push_style_attr(&mut self, decls: &Declarations) {
        if !decls.is_empty() {
            self.buffer.push_str(" style=\"");
            self.buffer.push_str(&escape_html(decls.as_str()));
            self.buffer.push('"');
        }
    }

    /// Write a paragraph. Returns whether it asks for a page break before
    /// itself.
    fn write_paragraph(&mut self, para: &Paragraph) -> RenderResult<bool> {
        let style = self.paragraph_style(para.properties.style_id.as_deref());
        let props = self.paragraph_properties(para, style.as_deref());
        let base = self.base_run_properties(style.as_deref());

        self.buffer.push_str("<p class=\"paragraph");
        if let Some(id) = style.as_deref().map(|s| s.id.as_str()).or(para.properties.style_id.as_deref()) {
            write!(self.buffer, " style-{}", escape_html(id))?;
        }
        for class in [align_class(props.justification), indent_class(props.indentation.left)]
            .into_iter()
            .flatten()
        {
            self.buffer.push(' ');
            self.buffer.push_str(class);
        }
        self.buffer.push('"');
        self.push_style_attr(&paragraph_declarations(&props));
        self.buffer.push('>');

        let start = self.buffer.len();
        self.write_numbering_label(&props, &base)?;
        self.write_inlines(&para.content, &base)?;
        if self.buffer.len() == start {
            // keep empty paragraphs one line tall
            self.buffer.push_str("<br>");
        }
        self.buffer.push_str("</p>");
        Ok(props.page_break_before == Some(true))
    }

    fn write_numbering_label(&mut self, props: &ParagraphProperties, base: &RunProperties) -> RenderResult<()> {
        let Some((num_id, level)) = props.numbering_target() else {
            return Ok(());
        };
        let Some(label) = self.numbering.label(num_id, level) else {
            tracing::debug!(num_id, level, "numbering level not defined");
            return Ok(());
        };

        let mut run = self
            .doc
            .numbering()
            .level(num_id, level)
            .and_then(|l| l.run.clone())
            .unwrap_or_default();
        run.inherit_from(base);

        self.buffer.push_str("<span class=\"numbering\"");
        self.push_style_attr(&run_declarations(&run, self.doc.fonts()));
        write!(self.buffer, ">{}</span>", escape_html(&label.text))?;
        match label.suffix {
            LevelSuffix::Tab | LevelSuffix::Space => self.buffer.push_str("&nbsp;"),
            LevelSuffix::Nothing => {},
        }
        Ok(())
    }

    fn write_inlines(&mut self, content: &[Inline], base: &RunProperties) -> RenderResult<()> {
        for inline in content {
            match inline {
                Inline::Run(run) => self.write_run(run, base)?,
                Inline::Hyperlink(link) => self.write_hyperlink(link, base)?,
                Inline::Field(field) => self.write_field(field, base)?,
                Inline::Bookmark(bookmark) => {
                    if self.options.preserve_bookmarks {
                        write!(self.buffer, "<a id=\"{}\"></a>", escape_html(bookmark.name()))?;
                    }
                },
            }
        }
        Ok(())
    }

    fn write_hyperlink(&mut self, link: &Hyperlink, base: &RunProperties) -> RenderResult<()> {
        self.buffer.push_str("<a");
        if let Some(href) = link.href() {
            write!(self.buffer, " href=\"{}\"", escape_html(&href))?;
        }
        self.buffer.push_str(" class=\"docx-link\"");
        if let Some(tooltip) = link.tooltip() {
            write!(self.buffer, " title=\"{}\"", escape_html(tooltip))?;
        }
        self.buffer.push('>');
        self.write_inlines(link.content(), base)?;
        self.buffer.push_str("</a>");
        Ok(())
    }

    fn write_field(&mut self, field: &Field, base: &RunProperties) -> RenderResult<()> {
        let target = field.hyperlink_target();
        if let Some(href) = &target {
            write!(self.buffer, "<a href=\"{}\" class=\"docx-link\">", escape_html(href))?;
        }
        write!(
            self.buffer,
            "<span class=\"field\" data-field-type=\"{}\">",
            escape_html(field.field_type())
        )?;
        self.write_inlines(field.result(), base)?;
        self.buffer.push_str("</span>");
        if target.is_some() {
            self.buffer.push_str("</a>");
        }
        Ok(())
    }

    fn write_run(&mut self, run: &Run, base: &RunProperties) -> RenderResult<()> {
        if run.is_empty() {
            return Ok(());
        }
        let props = self.run_properties(run, base);
        let decls = run_declarations(&props, self.doc.fonts());
        let wrapped = !decls.is_empty();
        if wrapped {
            self.buffer.push_str("<span");
            self.push_style_attr(&decls);
            self.buffer.push('>');
        }

        for item in &run.content {
            match item {
                RunContent::Text(text) => self.buffer.push_str(&escape_html_preserving_spaces(text)),
                RunContent::Tab => self.buffer.push_str("<span class=\"tab\">&emsp;</span>"),
                RunContent::Break(BreakType::Line) => self.buffer.push_str("<br>"),
                RunContent::Break(BreakType::Column) => self.buffer.push_str("<span class=\"column-break\"></span>"),
                RunContent::Break(BreakType::Page) => {
                    self.buffer.push_str("<span class=\"page-break\"></span>");
                    self.page_break = true;
                },
                RunContent::Symbol { ch, .. } => {
                    let mut utf8 = [0u8; 4];
                    self.buffer.push_str(&escape_html(ch.encode_utf8(&mut utf8)));
                },
                RunContent::NoteReference { kind, id } => {
                    let prefix = note_prefix(*kind);
                    let id = escape_html(id);
                    write!(
                        self.buffer,
                        "<sup><a href=\"#{prefix}-{id}\" class=\"{prefix}-ref\" id=\"{prefix}-ref-{id}\">{id}</a></sup>"
                    )?;
                },
                RunContent::CommentReference(id) => {
                    write!(
                        self.buffer,
                        "<span class=\"comment-ref\" data-comment-id=\"{}\"></span>",
                        escape_html(id)
                    )?;
                },
                RunContent::Drawing(drawing) => self.write_drawing(drawing)?,
            }
        }

        if wrapped {
            self.buffer.push_str("</span>");
        }
        Ok(())
    }

    fn write_drawing(&mut self, drawing: &Drawing) -> RenderResult<()> {
        let mut size = Declarations::new();
        if drawing.width_emu() > 0 {
            size.push("width", &css_pt(drawing.width_pt()));
        }
        if drawing.height_emu() > 0 {
            size.push("height", &css_pt(drawing.height_pt()));
        }

        if drawing.kind() == DrawingKind::Chart {
            self.buffer.push_str("<div class=\"drawing chart\"");
            self.push_style_attr(&size);
            self.buffer.push_str("></div>");
            return Ok(());
        }

        let Some(src) = self.image_source(drawing) else {
            tracing::debug!(name = drawing.name(), "drawing without an image source");
            return Ok(());
        };
        write!(self.buffer, "<img class=\"drawing\" src=\"{}\"", escape_html(&src))?;
        let alt = drawing.description().or(drawing.name()).unwrap_or_default();
        write!(self.buffer, " alt=\"{}\"", escape_html(alt))?;
        self.push_style_attr(&size);
        self.buffer.push('>');
        Ok(())
    }

    fn image_source(&self, drawing: &Drawing) -> Option<String> {
        let target = drawing.target()?;
        if drawing.is_external() || !self.options.embed_images {
            return Some(target.to_string());
        }
        match self.doc.media().get(target) {
            Some(part) => Some(part.data_url()),
            None => Some(target.to_string()),
        }
    }

    fn write_table(&mut self, table: &Table) -> RenderResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(RenderError::NestingTooDeep { depth: self.depth });
        }

        let mut props = table.properties.clone();
        let style = props.style_id.as_deref().and_then(|id| self.doc.styles().resolve(id));
        if let Some(inherited) = style.as_ref().and_then(|s| s.table.as_ref()) {
            props.borders.inherit_from(&inherited.borders);
            props.width = props.width.or(inherited.width);
            props.justification = props.justification.or(inherited.justification);
            if props.shading.is_none() {
                props.shading.clone_from(&inherited.shading);
            }
        }

        self.buffer.push_str("<table class=\"table");
        if let Some(id) = props.style_id.as_deref() {
            write!(self.buffer, " style-{}", escape_html(id))?;
        }
        self.buffer.push('"');
        self.push_style_attr(&table_declarations(&props));
        self.buffer.push('>');

        for (r, row) in table.rows.iter().enumerate() {
            self.buffer.push_str("<tr class=\"row");
            if let Some(id) = row.properties.style_id.as_deref() {
                write!(self.buffer, " style-{}", escape_html(id))?;
            }
            self.buffer.push_str("\">");
            let mut grid_col = 0;
            for cell in &row.cells {
                let span = cell.properties.grid_span.max(1) as usize;
                if !(self.options.merge_cells && cell.properties.vertical_merge == Some(VMergeState::Continue)) {
                    let rows = table.row_span(r, grid_col);
                    self.write_cell(cell, span, rows, &props.borders)?;
                }
                grid_col += span;
            }
            self.buffer.push_str("</tr>");
        }

        self.buffer.push_str("</table>");
        self.depth -= 1;
        Ok(())
    }

    fn write_cell(
        &mut self,
        cell: &TableCell,
        span: usize,
        rows: usize,
        table_borders: &Borders,
    ) -> RenderResult<()> {
        self.buffer.push_str("<td class=\"cell");
        if let Some(id) = cell.properties.style_id.as_deref() {
            write!(self.buffer, " style-{}", escape_html(id))?;
        }
        self.buffer.push('"');
        let merge = cell.properties.vertical_merge;
        if self.options.merge_cells {
            if span > 1 {
                write!(self.buffer, " colspan=\"{span}\"")?;
            }
            if merge == Some(VMergeState::Restart) && rows > 1 {
                write!(self.buffer, " rowspan=\"{rows}\"")?;
            }
        } else {
            if span > 1 {
                write!(self.buffer, " data-grid-span=\"{span}\"")?;
            }
            match merge {
                Some(VMergeState::Restart) => self.buffer.push_str(" data-v-merge=\"restart\""),
                Some(VMergeState::Continue) => self.buffer.push_str(" data-v-merge=\"continue\""),
                None => {},
            }
        }
        self.push_style_attr(&cell_declarations(&cell.properties, table_borders));
        self.buffer.push('>');
        self.write_blocks(&cell.content)?;
        self.buffer.push_str("</td>");
        Ok(())
    }
}

/// Anchor prefix for note links and note blocks.
pub(crate) fn note_prefix(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Footnote => "footnote",
        NoteKind::Endnote => "endnote",
    }
}
