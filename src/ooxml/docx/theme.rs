/// Theme support for Word documents.
///
/// Themes define the color scheme and the major/minor fonts used in a
/// document.
use crate::common::xml::XmlElement;
use serde::Serialize;
use smallvec::SmallVec;

/// Color slots of a theme color scheme, in scheme order.
pub const COLOR_SLOTS: [&str; 12] = [
    "dk1", "lt1", "dk2", "lt2", "accent1", "accent2", "accent3", "accent4", "accent5", "accent6",
    "hlink", "folHlink",
];

/// Document theme.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("document.docx")?.parse()?;
/// if let Some(theme) = parsed.theme() {
///     println!("Theme: {:?}, accent1 = {:?}", theme.name(), theme.color("accent1"));
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Theme {
    name: Option<String>,
    /// Major font (for headings)
    major_font: Option<String>,
    /// Minor font (for body text)
    minor_font: Option<String>,
    color_scheme: Option<String>,
    /// `(slot, RRGGBB)` pairs in scheme order
    colors: SmallVec<[(String, String); 12]>,
}

/// RGB value of a color slot: `a:srgbClr/@val` or `a:sysClr/@lastClr`.
fn slot_color(slot: &XmlElement) -> Option<String> {
    if let Some(rgb) = slot.child("srgbClr").and_then(|c| c.attr("val")) {
        return Some(rgb.to_ascii_uppercase());
    }
    slot.child("sysClr")
        .and_then(|c| c.attr("lastClr"))
        .map(str::to_ascii_uppercase)
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `a:theme` root.
    pub fn from_xml(root: &XmlElement) -> Self {
        let mut theme = Self {
            name: root.attr("name").map(str::to_string),
            ..Self::default()
        };
        let Some(elements) = root.child("themeElements") else {
            return theme;
        };

        if let Some(scheme) = elements.child("clrScheme") {
            theme.color_scheme = scheme.attr("name").map(str::to_string);
            for slot in COLOR_SLOTS {
                if let Some(color) = scheme.child(slot).and_then(slot_color) {
                    theme.colors.push((slot.to_string(), color));
                }
            }
        }

        let latin = |which: &str| {
            elements
                .child("fontScheme")
                .and_then(|fs| fs.child(which))
                .and_then(|f| f.child("latin"))
                .and_then(|l| l.attr("typeface"))
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        };
        theme.major_font = latin("majorFont");
        theme.minor_font = latin("minorFont");
        theme
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn major_font(&self) -> Option<&str> {
        self.major_font.as_deref()
    }

    #[inline]
    pub fn minor_font(&self) -> Option<&str> {
        self.minor_font.as_deref()
    }

    #[inline]
    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    /// RGB hex (no `#`) of a color slot such as `accent1`.
    pub fn color(&self, slot: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, value)| value.as_str())
    }

    /// `(slot, RRGGBB)` pairs in scheme order.
    pub fn colors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>
<a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="ffffff"/></a:lt1><a:accent1><a:srgbClr val="4472C4"/></a:accent1></a:clrScheme>
<a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/></a:minorFont></a:fontScheme>
</a:themeElements></a:theme>"#;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::new();
        assert!(theme.name().is_none());
        assert!(theme.major_font().is_none());
        assert_eq!(theme.colors().count(), 0);
    }

    #[test]
    fn test_parse_theme() {
        let theme = Theme::from_xml(&XmlElement::parse(THEME.as_bytes()).unwrap());
        assert_eq!(theme.name(), Some("Office Theme"));
        assert_eq!(theme.color_scheme(), Some("Office"));
        assert_eq!(theme.major_font(), Some("Calibri Light"));
        assert_eq!(theme.minor_font(), Some("Calibri"));
        assert_eq!(theme.color("lt1"), Some("FFFFFF"));
        assert_eq!(theme.color("accent1"), Some("4472C4"));
        assert_eq!(theme.color("accent2"), None);
        assert_eq!(
            theme.colors().map(|(n, _)| n).collect::<Vec<_>>(),
            ["dk1", "lt1", "accent1"]
        );
    }
}
