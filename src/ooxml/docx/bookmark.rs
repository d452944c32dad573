/// Bookmark markers.
///
/// A bookmark spans the content between `w:bookmarkStart` and
/// `w:bookmarkEnd` with the same `w:id`. The tree keeps only a zero-width
/// marker at the start position so that anchors can target it by name.
use crate::common::xml::XmlElement;
use serde::Serialize;

/// A bookmark in a Word document.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::bookmark::Bookmark;
///
/// let bookmark = Bookmark::new("0", "_Toc1");
/// assert!(bookmark.is_hidden());
/// assert_eq!(bookmark.name(), "_Toc1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    /// Bookmark ID, pairs start and end markers
    id: String,
    /// Bookmark name, the anchor target
    name: String,
}

impl Bookmark {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Parse a `w:bookmarkStart`. Returns `None` when the id is missing.
    pub fn from_start(el: &XmlElement) -> Option<Self> {
        let id = el.attr("id")?;
        Some(Self::new(id, el.attr("name").unwrap_or_default()))
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Word's own bookmarks (`_GoBack`, `_Toc...`) start with an underscore.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Id carried by a `w:bookmarkEnd`.
#[inline]
pub fn end_id(el: &XmlElement) -> Option<&str> {
    el.attr("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_start() {
        let el = XmlElement::parse(br#"<w:bookmarkStart xmlns:w="w" w:id="3" w:name="intro"/>"#).unwrap();
        let bookmark = Bookmark::from_start(&el).unwrap();
        assert_eq!(bookmark.id(), "3");
        assert_eq!(bookmark.name(), "intro");
        assert!(!bookmark.is_hidden());

        let el = XmlElement::parse(br#"<w:bookmarkStart xmlns:w="w" w:name="x"/>"#).unwrap();
        assert!(Bookmark::from_start(&el).is_none());
    }
}
