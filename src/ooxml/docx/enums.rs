/// Enumerations for WordprocessingML attribute values.
///
/// Each enum maps an attribute's XML token with `from_xml`/`to_xml`.
/// Unknown tokens parse to `None` and the caller falls back to the default.
use serde::Serialize;
use std::fmt;

/// Page layout orientation.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::enums::WdOrientation;
///
/// assert_eq!(WdOrientation::Landscape.to_xml(), "landscape");
/// assert_eq!(WdOrientation::from_xml("portrait"), Some(WdOrientation::Portrait));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum WdOrientation {
    #[default]
    Portrait = 0,
    Landscape = 1,
}

impl WdOrientation {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

impl fmt::Display for WdOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// How a section starts relative to the previous one (`w:type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WdSectionStart {
    Continuous,
    NextColumn,
    #[default]
    NewPage,
    EvenPage,
    OddPage,
}

impl WdSectionStart {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::NextColumn => "nextColumn",
            Self::NewPage => "nextPage",
            Self::EvenPage => "evenPage",
            Self::OddPage => "oddPage",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "continuous" => Some(Self::Continuous),
            "nextColumn" => Some(Self::NextColumn),
            "nextPage" => Some(Self::NewPage),
            "evenPage" => Some(Self::EvenPage),
            "oddPage" => Some(Self::OddPage),
            _ => None,
        }
    }

    /// Whether a section of this kind begins on a fresh page.
    #[inline]
    pub const fn starts_new_page(self) -> bool {
        matches!(self, Self::NewPage | Self::EvenPage | Self::OddPage)
    }
}

/// Which pages a header or footer applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WdHeaderFooter {
    #[default]
    Primary,
    FirstPage,
    EvenPages,
}

impl WdHeaderFooter {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Primary => "default",
            Self::FirstPage => "first",
            Self::EvenPages => "even",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Primary),
            "first" => Some(Self::FirstPage),
            "even" => Some(Self::EvenPages),
            _ => None,
        }
    }
}

/// Target kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WdStyleType {
    #[default]
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl WdStyleType {
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
        }
    }

    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            _ => None,
        }
    }
}

/// Paragraph or table justification (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Justification {
    Left,
    Center,
    Right,
    Both,
    Distribute,
}

impl Justification {
    /// Parse a `w:jc` value. `start`/`end` are the bidi-neutral spellings of
    /// left/right.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "justify" => Some(Self::Both),
            "distribute" => Some(Self::Distribute),
            _ => None,
        }
    }

    /// CSS `text-align` keyword.
    #[inline]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Both | Self::Distribute => "justify",
        }
    }
}

/// Interpretation of `w:spacing/@w:line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LineRule {
    /// 240ths of a line
    #[default]
    Auto,
    /// Exact height in twips
    Exact,
    /// Minimum height in twips
    AtLeast,
}

impl LineRule {
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "exact" => Some(Self::Exact),
            "atLeast" => Some(Self::AtLeast),
            _ => None,
        }
    }
}

/// Run vertical alignment (`w:vertAlign`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerticalAlign {
    Baseline,
    Superscript,
    Subscript,
}

impl VerticalAlign {
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "baseline" => Some(Self::Baseline),
            "superscript" => Some(Self::Superscript),
            "subscript" => Some(Self::Subscript),
            _ => None,
        }
    }
}

/// Kind of a `w:br` break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BreakType {
    #[default]
    Line,
    Page,
    Column,
}

impl BreakType {
    /// Parse `w:br/@w:type`; `textWrapping` and absence are line breaks.
    #[inline]
    pub fn from_xml(s: Option<&str>) -> Self {
        match s {
            Some("page") => Self::Page,
            Some("column") => Self::Column,
            _ => Self::Line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_start() {
        assert_eq!(WdSectionStart::from_xml("oddPage"), Some(WdSectionStart::OddPage));
        assert_eq!(WdSectionStart::default(), WdSectionStart::NewPage);
        assert!(!WdSectionStart::Continuous.starts_new_page());
        assert!(WdSectionStart::EvenPage.starts_new_page());
        assert_eq!(WdSectionStart::NewPage.to_xml(), "nextPage");
    }

    #[test]
    fn test_justification() {
        assert_eq!(Justification::from_xml("start"), Some(Justification::Left));
        assert_eq!(Justification::from_xml("both").map(Justification::css), Some("justify"));
        assert_eq!(Justification::from_xml("bogus"), None);
    }

    #[test]
    fn test_break_type() {
        assert_eq!(BreakType::from_xml(Some("page")), BreakType::Page);
        assert_eq!(BreakType::from_xml(Some("textWrapping")), BreakType::Line);
        assert_eq!(BreakType::from_xml(None), BreakType::Line);
    }

    #[test]
    fn test_style_type_round_trip() {
        for kind in [
            WdStyleType::Paragraph,
            WdStyleType::Character,
            WdStyleType::Table,
            WdStyleType::Numbering,
        ] {
            assert_eq!(WdStyleType::from_xml(kind.to_xml()), Some(kind));
        }
    }
}
