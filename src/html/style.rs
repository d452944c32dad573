//! Inline CSS for paragraph, run and table formatting.
//!
//! Lengths are converted with fixed rules: twips divide by 20, `auto` line
//! spacing divides by 240 into a unitless `line-height`, font sizes are
//! half-points and border widths eighths of a point.
use crate::common::unit::{AUTO_LINE_UNITS, css_pt, eighths_to_pt_f64, format_number, half_points_to_pt_f64, twips_to_pt_f64};
use crate::ooxml::docx::enums::{Justification, LineRule, VerticalAlign};
use crate::ooxml::docx::font::FontTable;
use crate::ooxml::docx::format::{Border, Borders, ParagraphProperties, RunProperties, RunToggles};
use crate::ooxml::docx::table::{CellProperties, TableProperties, TableWidth};
use phf::{Map, phf_map};

/// Word highlight names to CSS colors.
static HIGHLIGHT_COLORS: Map<&'static str, &'static str> = phf_map! {
    "black" => "#000000",
    "blue" => "#0000FF",
    "cyan" => "#00FFFF",
    "green" => "#00FF00",
    "magenta" => "#FF00FF",
    "red" => "#FF0000",
    "yellow" => "#FFFF00",
    "white" => "#FFFFFF",
    "darkBlue" => "#000080",
    "darkCyan" => "#008080",
    "darkGreen" => "#008000",
    "darkMagenta" => "#800080",
    "darkRed" => "#800000",
    "darkYellow" => "#808000",
    "darkGray" => "#808080",
    "lightGray" => "#C0C0C0",
};

/// A `style` attribute value under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Declarations {
    buf: String,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &str, value: &str) {
        if !self.buf.is_empty() {
            self.buf.push(';');
        }
        self.buf.push_str(property);
        self.buf.push(':');
        self.buf.push_str(value);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

/// CSS color for a Word hex color. `auto` has no color of its own.
pub(crate) fn hex_color(value: &str) -> Option<String> {
    let value = value.trim_start_matches('#');
    if value.eq_ignore_ascii_case("auto") || value.is_empty() {
        return None;
    }
    Some(format!("#{}", value.to_ascii_uppercase()))
}

pub(crate) fn highlight_color(name: &str) -> Option<&'static str> {
    HIGHLIGHT_COLORS.get(name).copied()
}

fn border_style(style: &str) -> &'static str {
    match style {
        "double" | "triple" => "double",
        "dotted" => "dotted",
        "dashed" | "dashSmallGap" | "dotDash" | "dotDotDash" => "dashed",
        "inset" => "inset",
        "outset" => "outset",
        "threeDEmboss" => "ridge",
        "threeDEngrave" => "groove",
        _ => "solid",
    }
}

/// Shorthand `border` value, `None` for an explicitly absent border.
pub(crate) fn border_value(border: &Border) -> Option<String> {
    if border.is_none() {
        return None;
    }
    // sz 4 (half a point) is Word's default hairline
    let width = eighths_to_pt_f64(border.size.unwrap_or(4));
    let color = border
        .color
        .as_deref()
        .and_then(hex_color)
        .unwrap_or_else(|| "#000000".to_string());
    Some(format!("{} {} {}", css_pt(width), border_style(&border.style), color))
}

fn push_borders(decls: &mut Declarations, borders: &Borders) {
    for (side, border) in borders.sides() {
        if let Some(value) = border.and_then(border_value) {
            decls.push(&format!("border-{side}"), &value);
        }
    }
}

/// `text-align-*` class for a justification other than left.
pub(crate) fn align_class(justification: Option<Justification>) -> Option<&'static str> {
    match justification? {
        Justification::Left => None,
        Justification::Center => Some("align-center"),
        Justification::Right => Some("align-right"),
        Justification::Both | Justification::Distribute => Some("align-justify"),
    }
}

/// Indent class for a left indent in twips.
pub(crate) fn indent_class(left: Option<i64>) -> Option<&'static str> {
    match left? {
        left if left <= 0 => None,
        left if left <= 720 => Some("indent-1"),
        left if left <= 1440 => Some("indent-2"),
        _ => Some("indent-3"),
    }
}

pub(crate) fn paragraph_declarations(props: &ParagraphProperties) -> Declarations {
    let mut decls = Declarations::new();
    if let Some(jc) = props.justification {
        decls.push("text-align", jc.css());
    }

    let ind = &props.indentation;
    if let Some(left) = ind.left {
        decls.push("margin-left", &css_pt(twips_to_pt_f64(left)));
    }
    if let Some(right) = ind.right {
        decls.push("margin-right", &css_pt(twips_to_pt_f64(right)));
    }
    if let Some(hanging) = ind.hanging {
        decls.push("text-indent", &css_pt(-twips_to_pt_f64(hanging)));
    } else if let Some(first_line) = ind.first_line {
        decls.push("text-indent", &css_pt(twips_to_pt_f64(first_line)));
    }

    let spacing = &props.spacing;
    if let Some(before) = spacing.before {
        decls.push("margin-top", &css_pt(twips_to_pt_f64(before)));
    }
    if let Some(after) = spacing.after {
        decls.push("margin-bottom", &css_pt(twips_to_pt_f64(after)));
    }
    if let Some(line) = spacing.line {
        match spacing.line_rule.unwrap_or_default() {
            LineRule::Auto => {
                decls.push("line-height", &format_number(line as f64 / AUTO_LINE_UNITS as f64));
            },
            LineRule::Exact => decls.push("line-height", &css_pt(twips_to_pt_f64(line))),
            LineRule::AtLeast => decls.push("min-height", &css_pt(twips_to_pt_f64(line))),
        }
    }

    push_borders(&mut decls, &props.borders);
    if let Some(fill) = props.shading.as_ref().and_then(|s| s.background()).and_then(hex_color) {
        decls.push("background-color", &fill);
    }
    decls
}

pub(crate) fn run_declarations(props: &RunProperties, fonts: &FontTable) -> Declarations {
    let mut decls = Declarations::new();
    if props.bold() {
        decls.push("font-weight", "bold");
    }
    if props.italic() {
        decls.push("font-style", "italic");
    }

    let mut decoration = Vec::with_capacity(2);
    if props.underlined() {
        decoration.push("underline");
    }
    if props.is(RunToggles::STRIKE) || props.is(RunToggles::DOUBLE_STRIKE) {
        decoration.push("line-through");
    }
    if !decoration.is_empty() {
        decls.push("text-decoration", &decoration.join(" "));
    }
    if props.underline.as_deref() == Some("double") || props.is(RunToggles::DOUBLE_STRIKE) {
        decls.push("text-decoration-style", "double");
    }

    if props.is(RunToggles::CAPS) {
        decls.push("text-transform", "uppercase");
    } else if props.is(RunToggles::SMALL_CAPS) {
        decls.push("font-variant", "small-caps");
    }
    if props.is(RunToggles::HIDDEN) {
        decls.push("display", "none");
    }

    match props.vertical_align {
        Some(VerticalAlign::Superscript) => decls.push("vertical-align", "super"),
        Some(VerticalAlign::Subscript) => decls.push("vertical-align", "sub"),
        _ => {},
    }

    if let Some(color) = props.color.as_deref().and_then(hex_color) {
        decls.push("color", &color);
    }
    let background = props
        .highlight
        .as_deref()
        .and_then(highlight_color)
        .map(str::to_string)
        .or_else(|| props.shading.as_deref().and_then(hex_color));
    if let Some(background) = background {
        decls.push("background-color", &background);
    }
    if let Some(size) = props.size {
        decls.push("font-size", &css_pt(half_points_to_pt_f64(i64::from(size))));
    }
    if let Some(font) = props.font.as_deref() {
        decls.push("font-family", &fonts.css_family(font));
    }
    decls
}

/// CSS width for a table or cell measurement.
pub(crate) fn width_value(width: TableWidth) -> Option<String> {
    match width {
        TableWidth::Dxa(twips) if twips > 0 => Some(css_pt(twips_to_pt_f64(twips))),
        TableWidth::Pct(fiftieths) if fiftieths > 0 => {
            let mut value = format_number(fiftieths as f64 / 50.0);
            value.push('%');
            Some(value)
        },
        _ => None,
    }
}

pub(crate) fn table_declarations(props: &TableProperties) -> Declarations {
    let mut decls = Declarations::new();
    decls.push("border-collapse", "collapse");
    if let Some(width) = props.width.and_then(width_value) {
        decls.push("width", &width);
    }
    match props.justification {
        Some(Justification::Center) => {
            decls.push("margin-left", "auto");
            decls.push("margin-right", "auto");
        },
        Some(Justification::Right) => decls.push("margin-left", "auto"),
        _ => {},
    }
    push_borders(&mut decls, &props.borders);
    if let Some(fill) = props.shading.as_ref().and_then(|s| s.background()).and_then(hex_color) {
        decls.push("background-color", &fill);
    }
    decls
}

/// Cell styles. Edges the cell leaves unset fall back to the table's
/// inner borders.
pub(crate) fn cell_declarations(props: &CellProperties, table_borders: &Borders) -> Declarations {
    let mut decls = Declarations::new();
    if let Some(width) = props.width.and_then(width_value) {
        decls.push("width", &width);
    }

    let mut borders = props.borders.clone();
    let inner = Borders {
        top: table_borders.inside_h.clone(),
        bottom: table_borders.inside_h.clone(),
        left: table_borders.inside_v.clone(),
        right: table_borders.inside_v.clone(),
        ..Default::default()
    };
    borders.inherit_from(&inner);
    push_borders(&mut decls, &borders);

    if let Some(fill) = props.shading.as_ref().and_then(|s| s.background()).and_then(hex_color) {
        decls.push("background-color", &fill);
    }
    match props.vertical_align.as_deref() {
        Some("center") => decls.push("vertical-align", "middle"),
        Some("bottom") => decls.push("vertical-align", "bottom"),
        Some("top") => decls.push("vertical-align", "top"),
        _ => {},
    }
    decls
}
