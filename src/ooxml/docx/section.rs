/// Section - page setup carried by a `w:sectPr`.
///
/// A section marker closes a section: either inside the `w:pPr` of the last
/// paragraph of the section, or as the last child of `w:body` for the final
/// section. All lengths are twips.
use crate::common::unit::{A4_HEIGHT_TWIPS, A4_WIDTH_TWIPS, TWIPS_PER_INCH};
use crate::common::xml::XmlElement;
use crate::ooxml::docx::enums::{WdHeaderFooter, WdOrientation, WdSectionStart};
use crate::ooxml::opc::Relationships;
use serde::Serialize;

/// Page dimensions in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSize {
    pub width: i64,
    pub height: i64,
    pub orientation: WdOrientation,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: A4_WIDTH_TWIPS,
            height: A4_HEIGHT_TWIPS,
            orientation: WdOrientation::Portrait,
        }
    }
}

impl PageSize {
    /// Parse a `w:pgSz`. Missing dimensions keep the A4 value; a page wider
    /// than it is tall counts as landscape even without `w:orient`.
    pub fn from_xml(pg_sz: &XmlElement) -> Self {
        let default = Self::default();
        let width = pg_sz.attr_i64("w").unwrap_or(default.width);
        let height = pg_sz.attr_i64("h").unwrap_or(default.height);
        let orientation = match pg_sz.attr("orient").and_then(WdOrientation::from_xml) {
            Some(WdOrientation::Landscape) => WdOrientation::Landscape,
            _ if width > height => WdOrientation::Landscape,
            _ => WdOrientation::Portrait,
        };
        Self {
            width,
            height,
            orientation,
        }
    }
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub left: i64,
    pub header: i64,
    pub footer: i64,
    pub gutter: i64,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: TWIPS_PER_INCH,
            right: TWIPS_PER_INCH,
            bottom: TWIPS_PER_INCH,
            left: TWIPS_PER_INCH,
            header: TWIPS_PER_INCH / 2,
            footer: TWIPS_PER_INCH / 2,
            gutter: 0,
        }
    }
}

impl PageMargins {
    pub fn from_xml(pg_mar: &XmlElement) -> Self {
        let default = Self::default();
        let get = |name: &str, fallback: i64| pg_mar.attr_i64(name).unwrap_or(fallback);
        Self {
            top: get("top", default.top),
            right: get("right", default.right),
            bottom: get("bottom", default.bottom),
            left: get("left", default.left),
            header: get("header", default.header),
            footer: get("footer", default.footer),
            gutter: get("gutter", default.gutter),
        }
    }
}

/// A `w:headerReference` or `w:footerReference`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFooterRef {
    pub kind: WdHeaderFooter,
    pub r_id: String,
    /// Numeric suffix of the target part name (`header2.xml` is 2)
    pub index: Option<u32>,
}

impl HeaderFooterRef {
    fn from_xml(el: &XmlElement, rels: &Relationships) -> Option<Self> {
        let r_id = el.attr("id")?;
        let index = rels
            .get(r_id)
            .and_then(|rel| rel.target_partname().ok())
            .and_then(|uri| uri.idx());
        Some(Self {
            kind: el
                .attr("type")
                .and_then(WdHeaderFooter::from_xml)
                .unwrap_or_default(),
            r_id: r_id.to_string(),
            index,
        })
    }
}

/// Properties of one document section.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::section::SectionProperties;
///
/// let section = SectionProperties::default();
/// assert!(!section.is_landscape());
/// assert_eq!(section.page_size.width, 11906);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionProperties {
    pub page_size: PageSize,
    pub margins: PageMargins,
    pub start: WdSectionStart,
    pub headers: Vec<HeaderFooterRef>,
    pub footers: Vec<HeaderFooterRef>,
    /// Distinct first-page header/footer (`w:titlePg`)
    pub title_page: bool,
    /// Number of text columns
    pub columns: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: PageMargins::default(),
            start: WdSectionStart::default(),
            headers: Vec::new(),
            footers: Vec::new(),
            title_page: false,
            columns: 1,
        }
    }
}

impl SectionProperties {
    pub fn from_xml(sect_pr: &XmlElement, rels: &Relationships) -> Self {
        let refs = |name: &str| {
            sect_pr
                .children_named(name)
                .filter_map(|el| HeaderFooterRef::from_xml(el, rels))
                .collect::<Vec<_>>()
        };
        Self {
            page_size: sect_pr.child("pgSz").map(PageSize::from_xml).unwrap_or_default(),
            margins: sect_pr.child("pgMar").map(PageMargins::from_xml).unwrap_or_default(),
            start: sect_pr
                .child_val("type")
                .and_then(WdSectionStart::from_xml)
                .unwrap_or_default(),
            headers: refs("headerReference"),
            footers: refs("footerReference"),
            title_page: sect_pr.child_toggle("titlePg").unwrap_or(false),
            columns: sect_pr
                .child("cols")
                .and_then(|c| c.attr_i64("num"))
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(1),
        }
    }

    #[inline]
    pub fn orientation(&self) -> WdOrientation {
        self.page_size.orientation
    }

    #[inline]
    pub fn is_landscape(&self) -> bool {
        self.page_size.orientation == WdOrientation::Landscape
    }

    /// Header part index for `kind`, if this section references one.
    pub fn header(&self, kind: WdHeaderFooter) -> Option<u32> {
        self.headers.iter().find(|r| r.kind == kind).and_then(|r| r.index)
    }

    /// Footer part index for `kind`, if this section references one.
    pub fn footer(&self, kind: WdHeaderFooter) -> Option<u32> {
        self.footers.iter().find(|r| r.kind == kind).and_then(|r| r.index)
    }
}
