//! Longan - a WordprocessingML (.docx) reader producing a typed document
//! tree and paginated HTML.
//!
//! # Features
//!
//! - **Single-pass tree building**: paragraphs, runs, tables, hyperlinks,
//!   fields, bookmarks and drawings from the main document, headers,
//!   footers, notes and comments
//! - **Style and numbering resolution**: `basedOn` chains with document
//!   defaults, and per-render list counters
//! - **Degraded, not failed**: only a missing or malformed main document is
//!   an error; every other problem becomes a [`Diagnostic`]
//! - **Paginated HTML**: page containers split on page breaks and section
//!   boundaries, with out-of-flow footnotes and endnotes
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("report.docx")?;
//! let conversion = longan::convert(&bytes)?;
//!
//! println!("{}", conversion.html);
//! for diagnostic in &conversion.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Working with the tree
//!
//! ```no_run
//! use longan::html::{HtmlOptions, ToHtml};
//! use longan::ooxml::docx::{Package, ParseOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = Package::open("report.docx")?;
//! let parsed = package.parse_with_options(&ParseOptions::new().with_media(false))?;
//!
//! println!("{}", parsed.document().text());
//! let html = parsed.to_html_with_options(&HtmlOptions::new().with_merge_cells(true));
//! # Ok(())
//! # }
//! ```

/// Errors, diagnostics, units and XML helpers shared by every layer.
pub mod common;

/// Paginated HTML rendering.
pub mod html;

/// OOXML package reading and the WordprocessingML model.
pub mod ooxml;

#[cfg(test)]
mod testing;

pub use common::{Diagnostic, DiagnosticKind, Error, Result};
pub use html::{HtmlOptions, ToHtml};
pub use ooxml::docx::{Package, ParseOptions, ParsedDocument};

use common::Diagnostics;

/// A parsed document together with its rendered markup.
#[derive(Debug)]
pub struct Conversion {
    pub document: ParsedDocument,
    pub html: String,
    /// Parse and render degradations, in the order they were recorded
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a `.docx` container and render it with default options.
///
/// Fails only when the bytes are not a package or the main document part
/// is missing or malformed.
pub fn convert(bytes: &[u8]) -> Result<Conversion> {
    convert_with_options(bytes, &ParseOptions::default(), &HtmlOptions::default())
}

/// Parse and render with explicit options.
pub fn convert_with_options(bytes: &[u8], parse: &ParseOptions, render: &HtmlOptions) -> Result<Conversion> {
    let document = Package::from_bytes(bytes)?.parse_with_options(parse)?;
    let rendered = Diagnostics::new();
    let html = document.render_html(render, &rendered);

    let mut diagnostics = document.diagnostics().to_vec();
    diagnostics.extend(rendered.into_vec());
    Ok(Conversion {
        document,
        html,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DocxFixture, wrap_part};
    use std::io::Write;

    #[test]
    fn test_convert() {
        let data = DocxFixture::new("<w:p><w:r><w:t>Hello</w:t></w:r></w:p>").build();
        let conversion = convert(&data).unwrap();
        assert_eq!(conversion.document.document().text(), "Hello");
        assert!(conversion.html.contains(r#"<p class="paragraph">Hello</p>"#));
        assert!(
            conversion
                .diagnostics
                .iter()
                .any(|d| d.kind() == DiagnosticKind::MissingPart && d.part() == "/word/styles.xml")
        );
    }

    #[test]
    fn test_convert_with_options() {
        let data = DocxFixture::new(r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#)
            .part("word/comments.xml", wrap_part("comments", r#"<w:comment w:id="0" w:author="A"/>"#))
            .build();
        let conversion = convert_with_options(
            &data,
            &ParseOptions::new().with_comments(false),
            &HtmlOptions::new().with_container_class("pages"),
        )
        .unwrap();
        assert!(conversion.document.comments().is_empty());
        assert!(conversion.html.starts_with(r#"<div class="pages">"#));
    }

    #[test]
    fn test_convert_errors() {
        assert!(matches!(convert(b"not a zip"), Err(Error::Opc(_))));
        let empty = DocxFixture::without_document().build();
        assert!(matches!(convert(&empty), Err(Error::MissingMainDocument(_))));
    }

    #[test]
    fn test_open_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&DocxFixture::new("<w:p><w:r><w:t>On disk</w:t></w:r></w:p>").build())
            .unwrap();
        let parsed = Package::open(file.path()).unwrap().parse().unwrap();
        assert_eq!(parsed.document().text(), "On disk");
        assert!(parsed.to_html().contains("On disk"));
    }
}
