/// Headers and footers of a Word document.
///
/// Each header or footer lives in its own part (`/word/header2.xml`) and is
/// keyed by the numeric suffix of that part name. Section properties refer
/// to them by relationship id, resolved to the same index.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::document::{Block, blocks_text};
use crate::ooxml::docx::parts::DocumentBuilder;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HeaderFooterKind {
    Header,
    Footer,
}

impl HeaderFooterKind {
    /// Local name of the part's root element (`hdr`/`ftr`).
    #[inline]
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::Header => "hdr",
            Self::Footer => "ftr",
        }
    }
}

/// One header or footer part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderFooter {
    kind: HeaderFooterKind,
    index: u32,
    part_name: String,
    content: Vec<Block>,
}

impl HeaderFooter {
    pub fn new(kind: HeaderFooterKind, index: u32, part_name: impl Into<String>, content: Vec<Block>) -> Self {
        Self {
            kind,
            index,
            part_name: part_name.into(),
            content,
        }
    }

    /// Build from a `w:hdr`/`w:ftr` root. The builder must carry the part's
    /// own relationships.
    pub fn from_xml(root: &XmlElement, kind: HeaderFooterKind, index: u32, builder: &mut DocumentBuilder<'_>) -> Self {
        if !root.is(kind.root_element()) {
            tracing::debug!(
                part = builder.part,
                root = root.name(),
                "unexpected header/footer root element"
            );
        }
        Self::new(kind, index, builder.part, builder.build_blocks(root))
    }

    #[inline]
    pub fn kind(&self) -> HeaderFooterKind {
        self.kind
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    #[inline]
    pub fn content(&self) -> &[Block] {
        &self.content
    }

    pub fn text(&self) -> String {
        blocks_text(&self.content)
    }
}

/// Headers or footers keyed by part index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderFooters {
    items: BTreeMap<u32, HeaderFooter>,
}

impl HeaderFooters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: HeaderFooter) {
        self.items.insert(item.index, item);
    }

    pub fn get(&self, index: u32) -> Option<&HeaderFooter> {
        self.items.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderFooter> {
        self.items.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<HeaderFooter> for HeaderFooters {
    fn from_iter<I: IntoIterator<Item = HeaderFooter>>(iter: I) -> Self {
        let mut items = Self::new();
        for item in iter {
            items.insert(item);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Diagnostics;
    use crate::ooxml::docx::paragraph::{Inline, RunContent};
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::opc::constants::relationship_type;
    use crate::testing::wrap_part;

    #[test]
    fn test_header_with_own_relationships() {
        let root = XmlElement::parse(
            wrap_part(
                "hdr",
                r#"<w:p><w:r><w:t>Page header</w:t></w:r><w:r><w:drawing><wp:inline><wp:extent cx="12700" cy="25400"/><wp:docPr id="1" name="Logo"/><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="rId1"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            )
            .as_bytes(),
        )
        .unwrap();
        let mut rels = Relationships::new("/word");
        rels.add_relationship(
            relationship_type::IMAGE.to_string(),
            "media/logo.png".to_string(),
            "rId1".to_string(),
            false,
        );
        let diagnostics = Diagnostics::new();
        let mut builder = DocumentBuilder::new("/word/header3.xml", &rels, &diagnostics);

        let header = HeaderFooter::from_xml(&root, HeaderFooterKind::Header, 3, &mut builder);
        assert_eq!(header.text(), "Page header");
        assert_eq!(header.part_name(), "/word/header3.xml");

        let Some(Block::Paragraph(p)) = header.content().first() else {
            panic!("expected paragraph");
        };
        let drawing = p
            .content
            .iter()
            .filter_map(|i| match i {
                Inline::Run(r) => Some(r),
                _ => None,
            })
            .flat_map(|r| r.content.iter())
            .find_map(|c| match c {
                RunContent::Drawing(d) => Some(d),
                _ => None,
            })
            .unwrap();
        assert_eq!(drawing.target(), Some("/word/media/logo.png"));

        let all: HeaderFooters = [header].into_iter().collect();
        assert_eq!(all.get(3).map(HeaderFooter::index), Some(3));
        assert!(all.get(1).is_none());
    }
}
