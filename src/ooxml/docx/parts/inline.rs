//! Inline content of paragraphs, hyperlinks and simple fields.
//!
//! Children are first flattened into [`InlineEvent`]s (runs are split at
//! `w:fldChar`/`w:instrText`), then a [`FieldScan`] folds complex-field
//! sequences into [`Field`] nodes in a single forward pass.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::bookmark::Bookmark;
use crate::ooxml::docx::drawing::Drawing;
use crate::ooxml::docx::enums::BreakType;
use crate::ooxml::docx::field::{Field, FieldKind};
use crate::ooxml::docx::footnote::NoteKind;
use crate::ooxml::docx::format::RunProperties;
use crate::ooxml::docx::hyperlink::Hyperlink;
use crate::ooxml::docx::paragraph::{Inline, Run, RunContent, merge_adjacent_runs};
use crate::ooxml::docx::parts::builder::DocumentBuilder;

#[derive(Debug)]
pub(crate) enum InlineEvent {
    Node(Inline),
    FieldBegin,
    FieldInstruction(String),
    FieldSeparate,
    FieldEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldPhase {
    Instruction,
    Result,
}

#[derive(Debug)]
pub(crate) struct FieldFrame {
    instruction: String,
    result: Vec<Inline>,
    phase: FieldPhase,
}

impl FieldFrame {
    fn new() -> Self {
        Self {
            instruction: String::new(),
            result: Vec::new(),
            phase: FieldPhase::Instruction,
        }
    }

    fn accept(&mut self, node: Inline) {
        match (self.phase, node) {
            (FieldPhase::Result, node) => self.result.push(node),
            // a field nested in the instruction contributes its result text
            (FieldPhase::Instruction, Inline::Field(field)) => self.instruction.push_str(&field.text()),
            (FieldPhase::Instruction, _) => {},
        }
    }
}

/// Complex-field scanner.
///
/// `Idle` passes nodes through. `Capturing` holds the stack of open fields;
/// nested fields push a frame and, once closed, become content of the frame
/// below them.
#[derive(Debug, Default)]
pub(crate) enum FieldScan {
    #[default]
    Idle,
    Capturing(Vec<FieldFrame>),
}

impl FieldScan {
    pub(crate) fn feed(&mut self, event: InlineEvent, out: &mut Vec<Inline>) {
        let Self::Capturing(stack) = self else {
            match event {
                InlineEvent::Node(node) => out.push(node),
                InlineEvent::FieldBegin => *self = Self::Capturing(vec![FieldFrame::new()]),
                _ => tracing::debug!("field marker outside a field"),
            }
            return;
        };

        match event {
            InlineEvent::Node(node) => {
                if let Some(top) = stack.last_mut() {
                    top.accept(node);
                }
            },
            InlineEvent::FieldBegin => stack.push(FieldFrame::new()),
            InlineEvent::FieldInstruction(text) => {
                if let Some(top) = stack.last_mut()
                    && top.phase == FieldPhase::Instruction
                {
                    top.instruction.push_str(&text);
                }
            },
            InlineEvent::FieldSeparate => {
                if let Some(top) = stack.last_mut() {
                    top.phase = FieldPhase::Result;
                }
            },
            InlineEvent::FieldEnd => {
                let Some(frame) = stack.pop() else {
                    return;
                };
                let field = Inline::Field(Field::new(frame.instruction, frame.result, FieldKind::Complex));
                if let Some(parent) = stack.last_mut() {
                    parent.accept(field);
                    return;
                }
                *self = Self::Idle;
                out.push(field);
            },
        }
    }

    /// Flush fields left open at the end of the content as plain content.
    pub(crate) fn finish(self, out: &mut Vec<Inline>) {
        if let Self::Capturing(stack) = self {
            tracing::debug!(open = stack.len(), "unterminated complex field");
            for frame in stack {
                out.extend(frame.result);
            }
        }
    }
}

/// Decode a `w:sym`. Symbol fonts address glyphs in the private-use range
/// `F000..F0FF`, which maps onto Latin-1.
fn symbol(el: &XmlElement) -> Option<RunContent> {
    let code = u32::from_str_radix(el.attr("char")?.trim(), 16).ok()?;
    let code = if (0xF000..=0xF0FF).contains(&code) {
        code - 0xF000
    } else {
        code
    };
    Some(RunContent::Symbol {
        font: el.attr("font").map(str::to_string),
        ch: char::from_u32(code)?,
    })
}

impl DocumentBuilder<'_> {
    /// Build inline content from the children of a paragraph-like element.
    pub(crate) fn build_inlines<'x>(
        &mut self,
        children: impl Iterator<Item = &'x XmlElement>,
    ) -> Vec<Inline> {
        let mut events = Vec::new();
        for child in children {
            self.inline_events(child, &mut events);
        }

        let mut out = Vec::with_capacity(events.len());
        let mut scan = FieldScan::default();
        for event in events {
            scan.feed(event, &mut out);
        }
        scan.finish(&mut out);
        merge_adjacent_runs(&mut out);
        out
    }

    fn inline_events(&mut self, el: &XmlElement, events: &mut Vec<InlineEvent>) {
        match el.local_name() {
            "r" => self.run_events(el, events),
            "hyperlink" => {
                if !self.enter(el) {
                    return;
                }
                let content = self.build_inlines(el.elements());
                self.leave();
                events.push(InlineEvent::Node(Inline::Hyperlink(Hyperlink::from_xml(
                    el, self.rels, content,
                ))));
            },
            "fldSimple" => {
                if !self.enter(el) {
                    return;
                }
                let result = self.build_inlines(el.elements());
                self.leave();
                let instruction = el.attr("instr").unwrap_or_default();
                events.push(InlineEvent::Node(Inline::Field(Field::new(
                    instruction,
                    result,
                    FieldKind::Simple,
                ))));
            },
            "bookmarkStart" => {
                if let Some(bookmark) = Bookmark::from_start(el) {
                    events.push(InlineEvent::Node(Inline::Bookmark(bookmark)));
                }
            },
            "ins" | "smartTag" | "customXml" | "moveTo" | "dir" | "bdo" => {
                if self.enter(el) {
                    for child in el.elements() {
                        self.inline_events(child, events);
                    }
                    self.leave();
                }
            },
            "sdt" => {
                if let Some(content) = el.child("sdtContent")
                    && self.enter(el)
                {
                    for child in content.elements() {
                        self.inline_events(child, events);
                    }
                    self.leave();
                }
            },
            "pPr" | "del" | "moveFrom" | "bookmarkEnd" | "proofErr" | "permStart" | "permEnd"
            | "commentRangeStart" | "commentRangeEnd" | "moveFromRangeStart" | "moveFromRangeEnd"
            | "moveToRangeStart" | "moveToRangeEnd" => {},
            other => tracing::debug!(element = other, part = self.part, "skipping inline element"),
        }
    }

    fn run_events(&mut self, r: &XmlElement, events: &mut Vec<InlineEvent>) {
        let properties = r.child("rPr").map(RunProperties::from_xml).unwrap_or_default();
        let mut current = Run::new(properties.clone());

        let flush = |current: &mut Run, events: &mut Vec<InlineEvent>| {
            if !current.is_empty() {
                let run = std::mem::replace(current, Run::new(properties.clone()));
                events.push(InlineEvent::Node(Inline::Run(run)));
            }
        };

        for child in r.elements() {
            match child.local_name() {
                "t" => current.push(RunContent::Text(child.text())),
                "tab" | "ptab" => current.push(RunContent::Tab),
                "br" => current.push(RunContent::Break(BreakType::from_xml(child.attr("type")))),
                "cr" => current.push(RunContent::Break(BreakType::Line)),
                "sym" => {
                    if let Some(sym) = symbol(child) {
                        current.push(sym);
                    }
                },
                "noBreakHyphen" => current.push(RunContent::Text("\u{2011}".to_string())),
                "softHyphen" => current.push(RunContent::Text("\u{00AD}".to_string())),
                "footnoteReference" | "endnoteReference" => {
                    let kind = if child.is("footnoteReference") {
                        NoteKind::Footnote
                    } else {
                        NoteKind::Endnote
                    };
                    if let Some(id) = child.attr("id") {
                        current.push(RunContent::NoteReference {
                            kind,
                            id: id.to_string(),
                        });
                    }
                },
                "commentReference" => {
                    if let Some(id) = child.attr("id") {
                        current.push(RunContent::CommentReference(id.to_string()));
                    }
                },
                "drawing" => match Drawing::from_xml(child, self.rels) {
                    Some(drawing) => current.push(RunContent::Drawing(drawing)),
                    None => tracing::debug!(part = self.part, "drawing without inline or anchor frame"),
                },
                "fldChar" => {
                    flush(&mut current, events);
                    match child.attr("fldCharType") {
                        Some("begin") => events.push(InlineEvent::FieldBegin),
                        Some("separate") => events.push(InlineEvent::FieldSeparate),
                        Some("end") => events.push(InlineEvent::FieldEnd),
                        _ => {},
                    }
                },
                "instrText" => {
                    flush(&mut current, events);
                    events.push(InlineEvent::FieldInstruction(child.text()));
                },
                "rPr" | "delText" | "delInstrText" | "lastRenderedPageBreak" | "annotationRef"
                | "footnoteRef" | "endnoteRef" | "separator" | "continuationSeparator" => {},
                other => tracing::debug!(element = other, part = self.part, "skipping run content"),
            }
        }
        flush(&mut current, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Diagnostics;
    use crate::ooxml::opc::Relationships;

    fn inlines(paragraph: &str) -> Vec<Inline> {
        let xml = format!(r#"<w:p xmlns:w="w" xmlns:r="r">{paragraph}</w:p>"#);
        let p = XmlElement::parse(xml.as_bytes()).unwrap();
        let rels = Relationships::new("/word");
        let diagnostics = Diagnostics::new();
        let mut builder = DocumentBuilder::new("/word/document.xml", &rels, &diagnostics);
        builder.build_inlines(p.elements())
    }

    fn field(inline: &Inline) -> &Field {
        match inline {
            Inline::Field(f) => f,
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_complex_field() {
        let content = inlines(
            r#"<w:r><w:t xml:space="preserve">Page </w:t></w:r>
<w:r><w:fldChar w:fldCharType="begin"/></w:r>
<w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r>
<w:r><w:fldChar w:fldCharType="separate"/></w:r>
<w:r><w:t>3</w:t></w:r>
<w:r><w:fldChar w:fldCharType="end"/></w:r>"#,
        );
        assert_eq!(content.len(), 2);
        let f = field(&content[1]);
        assert_eq!(f.field_type(), "PAGE");
        assert_eq!(f.instruction(), " PAGE ");
        assert_eq!(f.text(), "3");
        assert_eq!(f.kind(), FieldKind::Complex);
    }

    #[test]
    fn test_field_markers_in_one_run() {
        let content = inlines(
            r#"<w:r><w:fldChar w:fldCharType="begin"/><w:instrText>DATE</w:instrText><w:fldChar w:fldCharType="separate"/><w:t>today</w:t><w:fldChar w:fldCharType="end"/><w:t> after</w:t></w:r>"#,
        );
        assert_eq!(content.len(), 2);
        assert_eq!(field(&content[0]).text(), "today");
        assert_eq!(content[1].text(), " after");
    }

    #[test]
    fn test_nested_field() {
        let content = inlines(
            r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText>IF </w:instrText></w:r>
<w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText>PAGE</w:instrText></w:r>
<w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>1</w:t></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r>
<w:r><w:instrText> = 1 "one"</w:instrText></w:r>
<w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>one</w:t></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r>"#,
        );
        assert_eq!(content.len(), 1);
        let f = field(&content[0]);
        assert_eq!(f.field_type(), "IF");
        assert_eq!(f.instruction(), "IF 1 = 1 \"one\"");
        assert_eq!(f.text(), "one");
    }

    #[test]
    fn test_unterminated_field_is_flushed() {
        let content = inlines(
            r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText>REF x</w:instrText></w:r>
<w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>shown</w:t></w:r>"#,
        );
        assert_eq!(content.len(), 1);
        assert!(matches!(content[0], Inline::Run(_)));
        assert_eq!(content[0].text(), "shown");
    }

    #[test]
    fn test_simple_field_and_hyperlink() {
        let content = inlines(
            r#"<w:fldSimple w:instr=" NUMPAGES "><w:r><w:t>9</w:t></w:r></w:fldSimple>
<w:hyperlink w:anchor="top"><w:r><w:t>Back</w:t></w:r></w:hyperlink>"#,
        );
        assert_eq!(content.len(), 2);
        let f = field(&content[0]);
        assert_eq!(f.field_type(), "NUMPAGES");
        assert_eq!(f.kind(), FieldKind::Simple);
        match &content[1] {
            Inline::Hyperlink(link) => {
                assert_eq!(link.href().as_deref(), Some("#top"));
                assert_eq!(link.text(), "Back");
            },
            other => panic!("expected hyperlink, got {other:?}"),
        }
    }

    #[test]
    fn test_run_content() {
        let content = inlines(
            r#"<w:r><w:t>a</w:t><w:tab/><w:br/><w:br w:type="page"/><w:cr/><w:sym w:font="Symbol" w:char="F0B7"/><w:noBreakHyphen/>
<w:footnoteReference w:id="2"/><w:endnoteReference w:id="1"/><w:commentReference w:id="0"/><w:delText>gone</w:delText></w:r>"#,
        );
        let Inline::Run(run) = &content[0] else {
            panic!("expected run");
        };
        assert_eq!(
            run.content,
            vec![
                RunContent::Text("a".into()),
                RunContent::Tab,
                RunContent::Break(BreakType::Line),
                RunContent::Break(BreakType::Page),
                RunContent::Break(BreakType::Line),
                RunContent::Symbol {
                    font: Some("Symbol".into()),
                    ch: '\u{00B7}'
                },
                RunContent::Text("\u{2011}".into()),
                RunContent::NoteReference {
                    kind: NoteKind::Footnote,
                    id: "2".into()
                },
                RunContent::NoteReference {
                    kind: NoteKind::Endnote,
                    id: "1".into()
                },
                RunContent::CommentReference("0".into()),
            ]
        );
    }

    #[test]
    fn test_flattening_and_bookmarks() {
        let content = inlines(
            r#"<w:bookmarkStart w:id="0" w:name="here"/><w:ins><w:r><w:t>new</w:t></w:r></w:ins><w:del><w:r><w:delText>old</w:delText></w:r></w:del>
<w:sdt><w:sdtPr/><w:sdtContent><w:r><w:t>!</w:t></w:r></w:sdtContent></w:sdt><w:bookmarkEnd w:id="0"/>"#,
        );
        assert!(matches!(&content[0], Inline::Bookmark(b) if b.name() == "here"));
        // equal formatting merges the two runs
        assert_eq!(content.len(), 2);
        assert_eq!(content[1].text(), "new!");
    }
}
