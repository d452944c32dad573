/// Drawing objects (`w:drawing`) - pictures and charts placed in runs.
///
/// A drawing is either inline (`wp:inline`, flows with the text) or floating
/// (`wp:anchor`). Its size is the `wp:extent` in EMUs; the referenced media
/// or chart part is found through the owning part's relationships.
use crate::common::unit::emu_to_pt_f64;
use crate::common::xml::XmlElement;
use crate::ooxml::opc::Relationships;
use serde::Serialize;

/// How the drawing is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawingPlacement {
    Inline,
    Floating,
}

/// What the drawing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawingKind {
    /// A picture (`pic:pic` with an `a:blip`)
    Picture,
    /// A chart (`c:chart`)
    Chart,
    /// Shapes, text boxes and diagrams
    Other,
}

/// A drawing object.
///
/// # Examples
///
/// ```rust
/// use longan::common::xml::XmlElement;
/// use longan::ooxml::docx::drawing::{Drawing, DrawingKind};
/// use longan::ooxml::opc::Relationships;
///
/// let xml = br#"<w:drawing xmlns:w="w" xmlns:wp="wp">
///   <wp:inline><wp:extent cx="914400" cy="457200"/><wp:docPr id="1" name="Logo"/></wp:inline>
/// </w:drawing>"#;
/// let el = XmlElement::parse(xml).unwrap();
/// let drawing = Drawing::from_xml(&el, &Relationships::new("/word")).unwrap();
/// assert_eq!(drawing.width_pt(), 72.0);
/// assert_eq!(drawing.kind(), DrawingKind::Other);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    placement: DrawingPlacement,
    kind: DrawingKind,
    /// Width in EMUs
    cx: i64,
    /// Height in EMUs
    cy: i64,
    name: Option<String>,
    description: Option<String>,
    /// Relationship id of the embedded or linked part
    r_id: Option<String>,
    /// Resolved target (absolute part name, or a URL for linked images)
    target: Option<String>,
    external: bool,
}

impl Drawing {
    /// Parse a `w:drawing`. Returns `None` when it holds neither
    /// `wp:inline` nor `wp:anchor`.
    pub fn from_xml(el: &XmlElement, rels: &Relationships) -> Option<Self> {
        let (placement, frame) = match el.child("inline") {
            Some(inline) => (DrawingPlacement::Inline, inline),
            None => (DrawingPlacement::Floating, el.child("anchor")?),
        };

        let extent = frame.child("extent");
        let dimension = |name: &str| extent.and_then(|e| e.attr_i64(name)).unwrap_or(0).max(0);
        let doc_pr = frame.child("docPr");
        let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        let (kind, r_id) = if let Some(blip) = frame.descendant("blip") {
            let r_id = blip.attr("embed").or_else(|| blip.attr("link"));
            (DrawingKind::Picture, r_id)
        } else if let Some(chart) = frame.descendant("chart") {
            (DrawingKind::Chart, chart.attr("id"))
        } else {
            (DrawingKind::Other, None)
        };

        let rel = r_id.and_then(|id| rels.get(id));
        if r_id.is_some() && rel.is_none() {
            tracing::debug!(r_id, "drawing relationship not found");
        }

        Some(Self {
            placement,
            kind,
            cx: dimension("cx"),
            cy: dimension("cy"),
            name: non_empty(doc_pr.and_then(|d| d.attr("name"))),
            description: non_empty(
                doc_pr.and_then(|d| d.attr("descr").or_else(|| d.attr("title"))),
            ),
            r_id: r_id.map(str::to_string),
            target: rel.map(|r| r.target()),
            external: rel.is_some_and(|r| r.is_external()),
        })
    }

    #[inline]
    pub fn placement(&self) -> DrawingPlacement {
        self.placement
    }

    #[inline]
    pub fn kind(&self) -> DrawingKind {
        self.kind
    }

    #[inline]
    pub fn width_emu(&self) -> i64 {
        self.cx
    }

    #[inline]
    pub fn height_emu(&self) -> i64 {
        self.cy
    }

    pub fn width_pt(&self) -> f64 {
        emu_to_pt_f64(self.cx)
    }

    pub fn height_pt(&self) -> f64 {
        emu_to_pt_f64(self.cy)
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Alternative text.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
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
    pub fn is_external(&self) -> bool {
        self.external
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as RT;

    fn rels() -> Relationships {
        let mut rels = Relationships::new("/word");
        rels.add_relationship(RT::IMAGE.to_string(), "media/image1.png".to_string(), "rId5".to_string(), false);
        rels.add_relationship(RT::CHART.to_string(), "charts/chart1.xml".to_string(), "rId6".to_string(), false);
        rels.add_relationship(RT::IMAGE.to_string(), "http://example.com/x.png".to_string(), "rId7".to_string(), true);
        rels
    }

    #[test]
    fn test_inline_picture() {
        let el = XmlElement::parse(
            br#"<w:drawing xmlns:w="w" xmlns:wp="wp" xmlns:a="a" xmlns:pic="pic" xmlns:r="r">
  <wp:inline><wp:extent cx="1270000" cy="635000"/><wp:docPr id="2" name="Picture 2" descr="A cat"/>
    <a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="rId5"/></pic:blipFill></pic:pic></a:graphicData></a:graphic>
  </wp:inline></w:drawing>"#,
        )
        .unwrap();
        let drawing = Drawing::from_xml(&el, &rels()).unwrap();
        assert_eq!(drawing.placement(), DrawingPlacement::Inline);
        assert_eq!(drawing.kind(), DrawingKind::Picture);
        assert_eq!(drawing.width_pt(), 100.0);
        assert_eq!(drawing.height_pt(), 50.0);
        assert_eq!(drawing.description(), Some("A cat"));
        assert_eq!(drawing.target(), Some("/word/media/image1.png"));
        assert!(!drawing.is_external());
    }

    #[test]
    fn test_floating_chart() {
        let el = XmlElement::parse(
            br#"<w:drawing xmlns:w="w" xmlns:wp="wp" xmlns:a="a" xmlns:c="c" xmlns:r="r">
  <wp:anchor><wp:extent cx="12700" cy="25400"/><wp:docPr id="3" name="Chart 1"/>
    <a:graphic><a:graphicData><c:chart r:id="rId6"/></a:graphicData></a:graphic></wp:anchor></w:drawing>"#,
        )
        .unwrap();
        let drawing = Drawing::from_xml(&el, &rels()).unwrap();
        assert_eq!(drawing.placement(), DrawingPlacement::Floating);
        assert_eq!(drawing.kind(), DrawingKind::Chart);
        assert_eq!(drawing.width_pt(), 1.0);
        assert_eq!(drawing.target(), Some("/word/charts/chart1.xml"));
    }

    #[test]
    fn test_linked_picture_and_empty() {
        let el = XmlElement::parse(
            br#"<w:drawing xmlns:w="w" xmlns:wp="wp" xmlns:a="a" xmlns:r="r"><wp:inline><a:blip r:link="rId7"/></wp:inline></w:drawing>"#,
        )
        .unwrap();
        let drawing = Drawing::from_xml(&el, &rels()).unwrap();
        assert!(drawing.is_external());
        assert_eq!(drawing.target(), Some("http://example.com/x.png"));
        assert_eq!(drawing.width_emu(), 0);

        let el = XmlElement::parse(br#"<w:drawing xmlns:w="w"/>"#).unwrap();
        assert!(Drawing::from_xml(&el, &rels()).is_none());
    }
}
