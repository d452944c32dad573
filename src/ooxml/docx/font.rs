/// Font table (`word/fontTable.xml`).
use crate::common::xml::XmlElement;
use phf::{Map, phf_map};
use serde::Serialize;
use std::collections::HashMap;

/// Word font family keywords to CSS generic families.
static GENERIC_FAMILIES: Map<&'static str, &'static str> = phf_map! {
    "roman" => "serif",
    "swiss" => "sans-serif",
    "modern" => "monospace",
    "script" => "cursive",
    "decorative" => "fantasy",
};

/// CSS generic family for a `w:family` value. `auto` and unknown values
/// have none.
pub fn generic_family(family: &str) -> Option<&'static str> {
    GENERIC_FAMILIES.get(family).copied()
}

/// One `w:font` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Font {
    name: String,
    alt_name: Option<String>,
    family: Option<&'static str>,
    charset: Option<String>,
    pitch: Option<String>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alt_name: None,
            family: None,
            charset: None,
            pitch: None,
        }
    }

    /// Parse a `w:font`. `None` without a name.
    pub fn from_xml(el: &XmlElement) -> Option<Self> {
        let name = el.attr("name").filter(|n| !n.is_empty())?;
        Some(Self {
            name: name.to_string(),
            alt_name: el.child_val("altName").map(str::to_string),
            family: el.child_val("family").and_then(generic_family),
            charset: el.child_val("charset").map(str::to_string),
            pitch: el.child_val("pitch").map(str::to_string),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn alt_name(&self) -> Option<&str> {
        self.alt_name.as_deref()
    }

    /// CSS generic family (`serif`, `sans-serif`, ...).
    #[inline]
    pub fn generic_family(&self) -> Option<&'static str> {
        self.family
    }

    #[inline]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    #[inline]
    pub fn pitch(&self) -> Option<&str> {
        self.pitch.as_deref()
    }

    /// CSS `font-family` value: the quoted name followed by the generic
    /// family when known.
    pub fn css_family(&self) -> String {
        css_font_family(&self.name, self.family)
    }
}

/// Quote a family name for CSS and append a generic fallback.
pub fn css_font_family(name: &str, generic: Option<&str>) -> String {
    let quoted = format!("'{}'", name.replace(['\'', '\\'], ""));
    match generic {
        Some(generic) => format!("{quoted}, {generic}"),
        None => quoted,
    }
}

/// Fonts keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontTable {
    fonts: HashMap<String, Font>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `w:fonts` root.
    pub fn from_xml(root: &XmlElement) -> Self {
        let mut table = Self::new();
        for el in root.children_named("font") {
            if let Some(font) = Font::from_xml(el) {
                table.insert(font);
            }
        }
        table
    }

    pub fn insert(&mut self, font: Font) {
        self.fonts.insert(font.name.clone(), font);
    }

    pub fn get(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    /// CSS `font-family` for a font name, with the generic family from the
    /// table when the font is listed.
    pub fn css_family(&self, name: &str) -> String {
        css_font_family(name, self.get(name).and_then(Font::generic_family))
    }

    /// Fonts sorted by name.
    pub fn sorted(&self) -> Vec<&Font> {
        let mut fonts: Vec<&Font> = self.fonts.values().collect();
        fonts.sort_by(|a, b| a.name.cmp(&b.name));
        fonts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::wrap_part;

    #[test]
    fn test_font_table() {
        let root = XmlElement::parse(
            wrap_part(
                "fonts",
                r#"<w:font w:name="Times New Roman"><w:panose1 w:val="02020603050405020304"/><w:charset w:val="00"/><w:family w:val="roman"/><w:pitch w:val="variable"/></w:font>
<w:font w:name="Courier New"><w:family w:val="modern"/></w:font>
<w:font w:name="Symbol"><w:family w:val="auto"/></w:font><w:font/>"#,
            )
            .as_bytes(),
        )
        .unwrap();
        let table = FontTable::from_xml(&root);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Times New Roman").and_then(Font::generic_family), Some("serif"));
        assert_eq!(table.get("Times New Roman").and_then(Font::pitch), Some("variable"));
        assert_eq!(table.css_family("Courier New"), "'Courier New', monospace");
        assert_eq!(table.css_family("Symbol"), "'Symbol'");
        assert_eq!(table.css_family("Unlisted"), "'Unlisted'");
        assert_eq!(table.sorted()[0].name(), "Courier New");
    }

    #[test]
    fn test_generic_families() {
        let all: Vec<_> = ["roman", "swiss", "modern", "script", "decorative"]
            .into_iter()
            .filter_map(generic_family)
            .collect();
        assert_eq!(all, ["serif", "sans-serif", "monospace", "cursive", "fantasy"]);
        assert_eq!(generic_family("auto"), None);
    }
}
