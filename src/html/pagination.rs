//! Page assembly.
//!
//! Rendered blocks are accumulated in document order. A block may ask for
//! a page break before or after itself; pages left empty by consecutive
//! breaks are dropped before the pages are wrapped.
use super::config::HtmlOptions;
use super::writer::RenderedBlock;
use crate::common::xml::escape_html;
use crate::ooxml::docx::enums::WdOrientation;
use crate::ooxml::docx::section::SectionProperties;

#[derive(Debug, Default)]
pub(crate) struct Paginator {
    pages: Vec<String>,
    current: String,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: RenderedBlock) {
        if block.break_before {
            self.break_page();
        }
        self.current.push_str(&block.html);
        if block.break_after {
            self.break_page();
        }
    }

    pub fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
    }

    /// Non-empty pages in order.
    pub fn finish(mut self) -> Vec<String> {
        self.break_page();
        self.pages.retain(|page| !page.trim().is_empty());
        self.pages
    }
}

/// Orientation of the page at `index`. Pages beyond the last section use
/// the last section.
pub(crate) fn page_orientation(sections: &[SectionProperties], index: usize) -> WdOrientation {
    sections
        .get(index)
        .or_else(|| sections.last())
        .map(SectionProperties::orientation)
        .unwrap_or_default()
}

/// Wrap each page in a page container.
pub(crate) fn write_pages(out: &mut String, pages: &[String], sections: &[SectionProperties], options: &HtmlOptions) {
    let class = escape_html(&options.page_class);
    for (index, page) in pages.iter().enumerate() {
        let orientation = page_orientation(sections, index);
        out.push_str("<div class=\"");
        out.push_str(&class);
        out.push(' ');
        out.push_str(orientation.to_xml());
        out.push_str("\">");
        out.push_str(page);
        out.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(html: &str, break_before: bool, break_after: bool) -> RenderedBlock {
        RenderedBlock {
            html: html.to_string(),
            break_before,
            break_after,
        }
    }

    #[test]
    fn test_breaks_and_empty_pages() {
        let mut paginator = Paginator::new();
        paginator.push(block("<p>a</p>", false, true));
        paginator.push(block("<p>b</p>", true, false));
        paginator.push(block("<table></table>", false, true));
        assert_eq!(paginator.finish(), ["<p>a</p>", "<p>b</p><table></table>"]);
    }

    #[test]
    fn test_no_content_no_pages() {
        assert!(Paginator::new().finish().is_empty());
    }

    #[test]
    fn test_orientation_clamps_to_last_section() {
        let mut landscape = SectionProperties::default();
        landscape.page_size.orientation = WdOrientation::Landscape;
        let sections = [SectionProperties::default(), landscape];

        assert_eq!(page_orientation(&sections, 0), WdOrientation::Portrait);
        assert_eq!(page_orientation(&sections, 1), WdOrientation::Landscape);
        assert_eq!(page_orientation(&sections, 7), WdOrientation::Landscape);
        assert_eq!(page_orientation(&[], 0), WdOrientation::Portrait);

        let mut out = String::new();
        write_pages(&mut out, &["x".to_string(), "y".to_string(), "z".to_string()], &sections, &HtmlOptions::default());
        assert_eq!(
            out,
            r#"<div class="docx-page portrait">x</div><div class="docx-page landscape">y</div><div class="docx-page landscape">z</div>"#
        );
    }
}
