//! Paragraph and run formatting shared by styles, numbering levels and
//! direct formatting.
//!
//! Every property is optional. `None` means "not specified here", which is
//! what lets style inheritance fill a property from an ancestor with
//! [`ParagraphProperties::inherit_from`] and [`RunProperties::inherit_from`].
use crate::common::xml::XmlElement;
use crate::common::xml::tree::is_on;
use crate::ooxml::docx::enums::{Justification, LineRule, VerticalAlign};
use bitflags::bitflags;
use serde::Serialize;

#[inline]
fn inherit<T: Clone>(slot: &mut Option<T>, parent: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(parent);
    }
}

bitflags! {
    /// On/off run properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct RunToggles: u16 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const STRIKE = 1 << 2;
        const DOUBLE_STRIKE = 1 << 3;
        const CAPS = 1 << 4;
        const SMALL_CAPS = 1 << 5;
        const HIDDEN = 1 << 6;
    }
}

const TOGGLE_ELEMENTS: [(&str, RunToggles); 7] = [
    ("b", RunToggles::BOLD),
    ("i", RunToggles::ITALIC),
    ("strike", RunToggles::STRIKE),
    ("dstrike", RunToggles::DOUBLE_STRIKE),
    ("caps", RunToggles::CAPS),
    ("smallCaps", RunToggles::SMALL_CAPS),
    ("vanish", RunToggles::HIDDEN),
];

/// Character formatting (`w:rPr`).
///
/// Toggles are tri-state: `specified` records which toggles were written
/// explicitly, `enabled` holds their values. An explicit `<w:b w:val="0"/>`
/// therefore overrides a bold inherited from a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunProperties {
    pub style_id: Option<String>,
    pub specified: RunToggles,
    pub enabled: RunToggles,
    /// Underline style token; `none` is an explicit "no underline"
    pub underline: Option<String>,
    pub vertical_align: Option<VerticalAlign>,
    /// Hex color without `#`, or `auto`
    pub color: Option<String>,
    /// Named highlight color (`yellow`, `darkBlue`, ...)
    pub highlight: Option<String>,
    /// Run shading fill as hex
    pub shading: Option<String>,
    /// Font size in half-points
    pub size: Option<u32>,
    /// ASCII font name
    pub font: Option<String>,
}

impl RunProperties {
    pub fn from_xml(rpr: &XmlElement) -> Self {
        let mut props = Self {
            style_id: rpr.child_val("rStyle").map(str::to_string),
            ..Default::default()
        };

        for (name, flag) in TOGGLE_ELEMENTS {
            if let Some(on) = rpr.child_toggle(name) {
                props.set_toggle(flag, on);
            }
        }

        props.underline = rpr.child_val("u").map(str::to_string).or_else(|| {
            // <w:u/> without a value is a single underline
            rpr.child("u").map(|_| "single".to_string())
        });
        props.vertical_align = rpr.child_val("vertAlign").and_then(VerticalAlign::from_xml);
        props.color = rpr.child_val("color").map(str::to_string);
        props.highlight = rpr.child_val("highlight").map(str::to_string);
        props.shading = rpr
            .child("shd")
            .and_then(|shd| shd.attr("fill"))
            .filter(|fill| *fill != "auto")
            .map(str::to_string);
        props.size = rpr
            .child_val_i64("sz")
            .and_then(|v| u32::try_from(v).ok());
        props.font = rpr.child("rFonts").and_then(|fonts| {
            fonts
                .attr("ascii")
                .or_else(|| fonts.attr("hAnsi"))
                .or_else(|| fonts.attr("cs"))
                .map(str::to_string)
        });
        props
    }

    pub fn set_toggle(&mut self, flag: RunToggles, on: bool) {
        self.specified.insert(flag);
        self.enabled.set(flag, on);
    }

    /// Explicit value of a toggle, `None` if unspecified.
    pub fn toggle(&self, flag: RunToggles) -> Option<bool> {
        self.specified
            .contains(flag)
            .then(|| self.enabled.contains(flag))
    }

    /// Effective value of a toggle (unspecified is off).
    #[inline]
    pub fn is(&self, flag: RunToggles) -> bool {
        self.enabled.contains(flag)
    }

    #[inline]
    pub fn bold(&self) -> bool {
        self.is(RunToggles::BOLD)
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.is(RunToggles::ITALIC)
    }

    /// Whether an underline is drawn.
    pub fn underlined(&self) -> bool {
        matches!(self.underline.as_deref(), Some(u) if u != "none")
    }

    /// Fill every unspecified property from `parent`.
    pub fn inherit_from(&mut self, parent: &RunProperties) {
        inherit(&mut self.style_id, &parent.style_id);
        let missing = parent.specified.difference(self.specified);
        self.enabled |= parent.enabled & missing;
        self.specified |= missing;
        inherit(&mut self.underline, &parent.underline);
        inherit(&mut self.vertical_align, &parent.vertical_align);
        inherit(&mut self.color, &parent.color);
        inherit(&mut self.highlight, &parent.highlight);
        inherit(&mut self.shading, &parent.shading);
        inherit(&mut self.size, &parent.size);
        inherit(&mut self.font, &parent.font);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Numbering reference of a paragraph (`w:numPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NumberingReference {
    pub num_id: Option<String>,
    pub level: Option<u8>,
}

impl NumberingReference {
    pub fn from_xml(num_pr: &XmlElement) -> Self {
        Self {
            num_id: num_pr.child_val("numId").map(str::to_string),
            level: num_pr
                .child_val_i64("ilvl")
                .and_then(|v| u8::try_from(v).ok()),
        }
    }

    /// Instance id and level when the reference turns numbering on.
    ///
    /// `numId` 0 is the explicit "no numbering" value.
    pub fn effective(&self) -> Option<(&str, u8)> {
        match self.num_id.as_deref() {
            Some(id) if id != "0" && !id.is_empty() => Some((id, self.level.unwrap_or(0))),
            _ => None,
        }
    }

    fn inherit_from(&mut self, parent: &NumberingReference) {
        inherit(&mut self.num_id, &parent.num_id);
        inherit(&mut self.level, &parent.level);
    }
}

/// Paragraph indentation in twips (`w:ind`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Indentation {
    pub left: Option<i64>,
    pub right: Option<i64>,
    pub first_line: Option<i64>,
    pub hanging: Option<i64>,
}

impl Indentation {
    pub fn from_xml(ind: &XmlElement) -> Self {
        Self {
            left: ind.attr_i64("left").or_else(|| ind.attr_i64("start")),
            right: ind.attr_i64("right").or_else(|| ind.attr_i64("end")),
            first_line: ind.attr_i64("firstLine"),
            hanging: ind.attr_i64("hanging"),
        }
    }

    fn inherit_from(&mut self, parent: &Indentation) {
        inherit(&mut self.left, &parent.left);
        inherit(&mut self.right, &parent.right);
        // first-line and hanging describe the same edge
        if self.first_line.is_none() && self.hanging.is_none() {
            self.first_line = parent.first_line;
            self.hanging = parent.hanging;
        }
    }
}

/// Paragraph spacing (`w:spacing`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Spacing {
    /// Space before in twips
    pub before: Option<i64>,
    /// Space after in twips
    pub after: Option<i64>,
    /// Line spacing, unit depends on `line_rule`
    pub line: Option<i64>,
    pub line_rule: Option<LineRule>,
}

impl Spacing {
    pub fn from_xml(spacing: &XmlElement) -> Self {
        Self {
            before: spacing.attr_i64("before"),
            after: spacing.attr_i64("after"),
            line: spacing.attr_i64("line"),
            line_rule: spacing.attr("lineRule").and_then(LineRule::from_xml),
        }
    }

    fn inherit_from(&mut self, parent: &Spacing) {
        inherit(&mut self.before, &parent.before);
        inherit(&mut self.after, &parent.after);
        inherit(&mut self.line, &parent.line);
        inherit(&mut self.line_rule, &parent.line_rule);
    }
}

/// One border edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Border {
    /// Line style token (`single`, `double`, `nil`, ...)
    pub style: String,
    /// Width in eighths of a point
    pub size: Option<i64>,
    /// Hex color without `#`, or `auto`
    pub color: Option<String>,
    /// Spacing to the content in points
    pub space: Option<i64>,
}

impl Border {
    pub fn from_xml(el: &XmlElement) -> Self {
        Self {
            style: el.attr("val").unwrap_or("single").to_string(),
            size: el.attr_i64("sz"),
            color: el.attr("color").map(str::to_string),
            space: el.attr_i64("space"),
        }
    }

    /// Whether the border is explicitly absent.
    pub fn is_none(&self) -> bool {
        matches!(self.style.as_str(), "nil" | "none")
    }
}

/// The four edges of a box plus the inner edges used by tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Borders {
    pub top: Option<Border>,
    pub right: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

impl Borders {
    /// Parse a border container (`w:pBdr`, `w:tblBorders`, `w:tcBorders`).
    pub fn from_xml(el: &XmlElement) -> Self {
        let edge = |a: &str, b: &str| el.child(a).or_else(|| el.child(b)).map(Border::from_xml);
        Self {
            top: edge("top", "top"),
            right: edge("right", "end"),
            bottom: edge("bottom", "bottom"),
            left: edge("left", "start"),
            inside_h: edge("insideH", "insideH"),
            inside_v: edge("insideV", "insideV"),
        }
    }

    /// Outer edges in CSS order with their side names.
    pub fn sides(&self) -> [(&'static str, Option<&Border>); 4] {
        [
            ("top", self.top.as_ref()),
            ("right", self.right.as_ref()),
            ("bottom", self.bottom.as_ref()),
            ("left", self.left.as_ref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn inherit_from(&mut self, parent: &Borders) {
        inherit(&mut self.top, &parent.top);
        inherit(&mut self.right, &parent.right);
        inherit(&mut self.bottom, &parent.bottom);
        inherit(&mut self.left, &parent.left);
        inherit(&mut self.inside_h, &parent.inside_h);
        inherit(&mut self.inside_v, &parent.inside_v);
    }
}

/// Background shading (`w:shd`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Shading {
    pub pattern: Option<String>,
    pub color: Option<String>,
    pub fill: Option<String>,
}

impl Shading {
    pub fn from_xml(shd: &XmlElement) -> Self {
        Self {
            pattern: shd.attr("val").map(str::to_string),
            color: shd.attr("color").map(str::to_string),
            fill: shd.attr("fill").map(str::to_string),
        }
    }

    /// Fill color usable as a background, skipping `auto`.
    pub fn background(&self) -> Option<&str> {
        self.fill.as_deref().filter(|f| *f != "auto" && !f.is_empty())
    }
}

/// Paragraph formatting (`w:pPr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParagraphProperties {
    pub style_id: Option<String>,
    pub numbering: Option<NumberingReference>,
    pub justification: Option<Justification>,
    pub indentation: Indentation,
    pub spacing: Spacing,
    pub borders: Borders,
    pub shading: Option<Shading>,
    pub outline_level: Option<u8>,
    pub page_break_before: Option<bool>,
    pub keep_next: Option<bool>,
}

impl ParagraphProperties {
    pub fn from_xml(ppr: &XmlElement) -> Self {
        Self {
            style_id: ppr.child_val("pStyle").map(str::to_string),
            numbering: ppr.child("numPr").map(NumberingReference::from_xml),
            justification: ppr.child_val("jc").and_then(Justification::from_xml),
            indentation: ppr.child("ind").map(Indentation::from_xml).unwrap_or_default(),
            spacing: ppr.child("spacing").map(Spacing::from_xml).unwrap_or_default(),
            borders: ppr.child("pBdr").map(Borders::from_xml).unwrap_or_default(),
            shading: ppr.child("shd").map(Shading::from_xml),
            outline_level: ppr
                .child_val_i64("outlineLvl")
                .and_then(|v| u8::try_from(v).ok()),
            page_break_before: ppr.child("pageBreakBefore").map(|e| is_on(e.attr("val"))),
            keep_next: ppr.child("keepNext").map(|e| is_on(e.attr("val"))),
        }
    }

    /// Fill every unspecified property from `parent`.
    pub fn inherit_from(&mut self, parent: &ParagraphProperties) {
        inherit(&mut self.style_id, &parent.style_id);
        if let Some(own) = self.numbering.as_mut() {
            if let Some(theirs) = &parent.numbering {
                own.inherit_from(theirs);
            }
        } else {
            self.numbering.clone_from(&parent.numbering);
        }
        inherit(&mut self.justification, &parent.justification);
        self.indentation.inherit_from(&parent.indentation);
        self.spacing.inherit_from(&parent.spacing);
        self.borders.inherit_from(&parent.borders);
        inherit(&mut self.shading, &parent.shading);
        inherit(&mut self.outline_level, &parent.outline_level);
        inherit(&mut self.page_break_before, &parent.page_break_before);
        inherit(&mut self.keep_next, &parent.keep_next);
    }

    /// Instance id and level when this paragraph is numbered.
    pub fn numbering_target(&self) -> Option<(&str, u8)> {
        self.numbering.as_ref().and_then(NumberingReference::effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> XmlElement {
        XmlElement::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_run_properties_from_xml() {
        let rpr = parse(
            r#"<w:rPr xmlns:w="w"><w:rStyle w:val="Emphasis"/><w:b/><w:i w:val="false"/><w:u w:val="double"/>
               <w:color w:val="FF0000"/><w:highlight w:val="yellow"/><w:sz w:val="28"/>
               <w:rFonts w:ascii="Calibri"/><w:vertAlign w:val="superscript"/><w:caps/></w:rPr>"#,
        );
        let props = RunProperties::from_xml(&rpr);
        assert_eq!(props.style_id.as_deref(), Some("Emphasis"));
        assert!(props.bold());
        assert_eq!(props.toggle(RunToggles::ITALIC), Some(false));
        assert_eq!(props.toggle(RunToggles::STRIKE), None);
        assert!(props.is(RunToggles::CAPS));
        assert!(props.underlined());
        assert_eq!(props.color.as_deref(), Some("FF0000"));
        assert_eq!(props.highlight.as_deref(), Some("yellow"));
        assert_eq!(props.size, Some(28));
        assert_eq!(props.font.as_deref(), Some("Calibri"));
        assert_eq!(props.vertical_align, Some(VerticalAlign::Superscript));
    }

    #[test]
    fn test_run_explicit_off_beats_inherited_on() {
        let mut child = RunProperties::default();
        child.set_toggle(RunToggles::BOLD, false);
        let mut parent = RunProperties::default();
        parent.set_toggle(RunToggles::BOLD, true);
        parent.set_toggle(RunToggles::ITALIC, true);
        parent.size = Some(24);

        child.inherit_from(&parent);
        assert!(!child.bold());
        assert!(child.italic());
        assert_eq!(child.size, Some(24));
    }

    #[test]
    fn test_underline_none() {
        let props = RunProperties::from_xml(&parse(r#"<w:rPr xmlns:w="w"><w:u w:val="none"/></w:rPr>"#));
        assert!(!props.underlined());
        let props = RunProperties::from_xml(&parse(r#"<w:rPr xmlns:w="w"><w:u/></w:rPr>"#));
        assert!(props.underlined());
    }

    #[test]
    fn test_paragraph_properties_from_xml() {
        let ppr = parse(
            r#"<w:pPr xmlns:w="w"><w:pStyle w:val="Heading1"/><w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr>
               <w:jc w:val="center"/><w:ind w:start="720" w:hanging="360"/><w:spacing w:before="120" w:line="360" w:lineRule="auto"/>
               <w:pBdr><w:top w:val="single" w:sz="4" w:color="auto"/></w:pBdr><w:shd w:val="clear" w:fill="EEEEEE"/>
               <w:outlineLvl w:val="0"/><w:pageBreakBefore/></w:pPr>"#,
        );
        let props = ParagraphProperties::from_xml(&ppr);
        assert_eq!(props.style_id.as_deref(), Some("Heading1"));
        assert_eq!(props.numbering_target(), Some(("3", 1)));
        assert_eq!(props.justification, Some(Justification::Center));
        assert_eq!(props.indentation.left, Some(720));
        assert_eq!(props.indentation.hanging, Some(360));
        assert_eq!(props.spacing.line, Some(360));
        assert_eq!(props.spacing.line_rule, Some(LineRule::Auto));
        assert_eq!(props.borders.top.as_ref().and_then(|b| b.size), Some(4));
        assert_eq!(props.shading.as_ref().and_then(Shading::background), Some("EEEEEE"));
        assert_eq!(props.outline_level, Some(0));
        assert_eq!(props.page_break_before, Some(true));
    }

    #[test]
    fn test_numbering_zero_disables() {
        let reference = NumberingReference {
            num_id: Some("0".to_string()),
            level: Some(0),
        };
        assert_eq!(reference.effective(), None);
    }

    #[test]
    fn test_paragraph_inheritance() {
        let mut child = ParagraphProperties {
            indentation: Indentation {
                first_line: Some(200),
                ..Default::default()
            },
            numbering: Some(NumberingReference {
                num_id: None,
                level: Some(2),
            }),
            ..Default::default()
        };
        let parent = ParagraphProperties {
            justification: Some(Justification::Right),
            indentation: Indentation {
                left: Some(720),
                hanging: Some(360),
                ..Default::default()
            },
            numbering: Some(NumberingReference {
                num_id: Some("7".to_string()),
                level: Some(0),
            }),
            ..Default::default()
        };
        child.inherit_from(&parent);
        assert_eq!(child.justification, Some(Justification::Right));
        assert_eq!(child.indentation.left, Some(720));
        assert_eq!(child.indentation.first_line, Some(200));
        assert_eq!(child.indentation.hanging, None);
        assert_eq!(child.numbering_target(), Some(("7", 2)));
    }
}
