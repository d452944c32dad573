//! In-memory `.docx` fixtures for unit tests.
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart""#,
);

const PACKAGE_RELS: &str = r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#;

/// Wrap body content in a `w:document`.
pub(crate) fn wrap_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {}><w:body>{}</w:body></w:document>"#,
        NAMESPACES, body
    )
}

/// Wrap content in a WordprocessingML root element with the usual namespaces.
pub(crate) fn wrap_part(root: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:{root} {}>{}</w:{root}>"#,
        NAMESPACES, inner
    )
}

/// Wrap `Relationship` entries in a relationship part.
pub(crate) fn wrap_rels(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        inner
    )
}

/// Builder for a minimal container.
pub(crate) struct DocxFixture {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxFixture {
    /// A package whose main document body is `body`.
    pub(crate) fn new(body: &str) -> Self {
        Self::without_document()
            .part("_rels/.rels", wrap_rels(PACKAGE_RELS))
            .part("word/document.xml", wrap_document(body))
    }

    /// A package with only the content-types part.
    pub(crate) fn without_document() -> Self {
        Self { parts: Vec::new() }.part(
            "[Content_Types].xml",
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#,
        )
    }

    /// Add or replace a member.
    pub(crate) fn part(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self.parts.push((name.to_string(), data.as_ref().to_vec()));
        self
    }

    /// Set the main document's relationship entries.
    pub(crate) fn document_rels(self, entries: &str) -> Self {
        self.part("word/_rels/document.xml.rels", wrap_rels(entries))
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in &self.parts {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}
