/// Hyperlinks (`w:hyperlink`).
///
/// External links carry a relationship id whose target is the URL; internal
/// links carry a `w:anchor` naming a bookmark.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::paragraph::{Inline, inlines_text};
use crate::ooxml::opc::{Relationship, Relationships};
use serde::Serialize;

/// A hyperlink in a Word document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperlink {
    /// Relationship ID for external links
    r_id: Option<String>,
    /// Resolved relationship target
    target: Option<String>,
    /// Whether the relationship is marked `TargetMode="External"`
    external: bool,
    /// Bookmark name for internal links
    anchor: Option<String>,
    tooltip: Option<String>,
    content: Vec<Inline>,
}

impl Hyperlink {
    /// A link built in memory; a `target` is taken as an external URL.
    pub fn new(target: Option<String>, anchor: Option<String>, content: Vec<Inline>) -> Self {
        Self {
            r_id: None,
            external: target.is_some(),
            target,
            anchor,
            tooltip: None,
            content,
        }
    }

    /// Read the attributes of a `w:hyperlink` and resolve its relationship.
    /// `content` is the already built inner content.
    pub fn from_xml(el: &XmlElement, rels: &Relationships, content: Vec<Inline>) -> Self {
        let r_id = el.attr("id").map(str::to_string);
        let rel = r_id.as_deref().and_then(|id| rels.get(id));
        if r_id.is_some() && rel.is_none() {
            tracing::debug!(r_id = ?r_id, "hyperlink relationship not found");
        }
        Self {
            r_id,
            target: rel.map(Relationship::target),
            external: rel.is_some_and(Relationship::is_external),
            anchor: el.attr("anchor").map(str::to_string),
            tooltip: el.attr("tooltip").map(str::to_string),
            content,
        }
    }

    #[inline]
    pub fn r_id(&self) -> Option<&str> {
        self.r_id.as_deref()
    }

    #[inline]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    #[inline]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    #[inline]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    #[inline]
    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    /// Link destination: the resolved target (with the anchor as fragment
    /// when both are present), or `#anchor` for internal links.
    pub fn href(&self) -> Option<String> {
        match (self.target.as_deref(), self.anchor.as_deref()) {
            (Some(target), Some(anchor)) => Some(format!("{target}#{anchor}")),
            (Some(target), None) => Some(target.to_string()),
            (None, Some(anchor)) => Some(format!("#{anchor}")),
            (None, None) => None,
        }
    }

    /// Whether the link leaves the package.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn text(&self) -> String {
        inlines_text(&self.content)
    }
}
