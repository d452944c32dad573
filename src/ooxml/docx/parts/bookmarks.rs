//! Bookmark span scanning over block-level siblings.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::bookmark::{self, Bookmark};

/// One buffered item of an open span.
#[derive(Debug)]
pub(crate) enum Captured<'x> {
    Element(&'x XmlElement),
    /// A bookmark opened inside the span; it marks the next paragraph
    Marker(Bookmark),
}

/// What the caller should do after feeding one sibling.
#[derive(Debug)]
pub(crate) enum Step<'x> {
    /// Handle this element as ordinary content
    Emit(&'x XmlElement),
    /// A span closed: mark its start with `bookmark`, then handle `buffer`
    /// in order
    Splice {
        bookmark: Bookmark,
        buffer: Vec<Captured<'x>>,
    },
}

/// Two-state scanner: `Idle` passes elements through, `Capturing` buffers
/// everything until the matching `w:bookmarkEnd`.
///
/// A bookmark opened inside a capture is buffered as a marker and never
/// starts a capture of its own, so the buffer is handled in one pass.
/// Unmatched ends inside a capture are dropped.
#[derive(Debug, Default)]
pub(crate) enum BookmarkScan<'x> {
    #[default]
    Idle,
    Capturing {
        bookmark: Bookmark,
        buffer: Vec<Captured<'x>>,
    },
}

impl<'x> BookmarkScan<'x> {
    pub(crate) fn feed(&mut self, el: &'x XmlElement) -> Option<Step<'x>> {
        match self {
            Self::Idle => {
                if el.is("bookmarkStart") {
                    match Bookmark::from_start(el) {
                        Some(bookmark) => {
                            *self = Self::Capturing {
                                bookmark,
                                buffer: Vec::new(),
                            };
                        },
                        None => tracing::debug!("bookmarkStart without id"),
                    }
                    None
                } else if el.is("bookmarkEnd") {
                    None
                } else {
                    Some(Step::Emit(el))
                }
            },
            Self::Capturing { bookmark, buffer } => {
                if el.is("bookmarkEnd") {
                    if bookmark::end_id(el) == Some(bookmark.id()) {
                        return self.close();
                    }
                } else if el.is("bookmarkStart") {
                    match Bookmark::from_start(el) {
                        Some(inner) => buffer.push(Captured::Marker(inner)),
                        None => tracing::debug!("bookmarkStart without id"),
                    }
                } else {
                    buffer.push(Captured::Element(el));
                }
                None
            },
        }
    }

    /// Close an open span at the end of the sibling list.
    pub(crate) fn finish(mut self) -> Option<Step<'x>> {
        self.close()
    }

    fn close(&mut self) -> Option<Step<'x>> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Capturing { bookmark, buffer } => Some(Step::Splice { bookmark, buffer }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn siblings(xml: &str) -> XmlElement {
        XmlElement::parse(xml.as_bytes()).unwrap()
    }

    fn names(steps: &[Step<'_>]) -> Vec<String> {
        steps
            .iter()
            .map(|s| match s {
                Step::Emit(el) => el.local_name().to_string(),
                Step::Splice { bookmark, buffer } => format!(
                    "[{}:{}]",
                    bookmark.name(),
                    buffer
                        .iter()
                        .map(|item| match item {
                            Captured::Element(el) => el.local_name().to_string(),
                            Captured::Marker(inner) => format!("#{}", inner.name()),
                        })
                        .collect::<Vec<_>>()
                        .join(",")
                ),
            })
            .collect()
    }

    fn scan(root: &XmlElement) -> Vec<Step<'_>> {
        let mut scanner = BookmarkScan::default();
        let mut steps: Vec<Step<'_>> = root.elements().filter_map(|el| scanner.feed(el)).collect();
        steps.extend(scanner.finish());
        steps
    }

    #[test]
    fn test_span_is_spliced_in_place() {
        let root = siblings(
            r#"<w:body xmlns:w="w"><w:p/><w:bookmarkStart w:id="1" w:name="a"/><w:p/><w:tbl/><w:bookmarkEnd w:id="1"/><w:p/></w:body>"#,
        );
        assert_eq!(names(&scan(&root)), ["p", "[a:p,tbl]", "p"]);
    }

    #[test]
    fn test_nested_and_unterminated() {
        let root = siblings(
            r#"<w:body xmlns:w="w"><w:bookmarkStart w:id="1" w:name="outer"/><w:bookmarkStart w:id="2" w:name="inner"/><w:p/><w:bookmarkEnd w:id="2"/><w:p/></w:body>"#,
        );
        assert_eq!(
            names(&scan(&root)),
            ["[outer:#inner,p,p]"]
        );
    }

    #[test]
    fn test_many_open_spans_stay_flat() {
        let mut xml = String::from(r#"<w:body xmlns:w="w">"#);
        for i in 0..3000 {
            xml.push_str(&format!(r#"<w:bookmarkStart w:id="{i}" w:name="b{i}"/>"#));
        }
        xml.push_str("<w:p/></w:body>");
        let root = siblings(&xml);
        let steps = scan(&root);
        assert_eq!(steps.len(), 1);
        let Step::Splice { bookmark, buffer } = &steps[0] else {
            panic!("expected a splice");
        };
        assert_eq!(bookmark.name(), "b0");
        assert_eq!(buffer.len(), 3000);
        assert!(matches!(buffer.last(), Some(Captured::Element(el)) if el.is("p")));
    }

    #[test]
    fn test_stray_end_is_ignored() {
        let root = siblings(r#"<w:body xmlns:w="w"><w:bookmarkEnd w:id="9"/><w:p/></w:body>"#);
        assert_eq!(names(&scan(&root)), ["p"]);
    }
}
