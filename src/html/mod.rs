/// Paginated HTML rendering for parsed Word documents.
///
/// The output is a root container of page containers. Each page holds the
/// rendered paragraphs and tables assigned to it and carries an orientation
/// class taken from its section. Footnotes and endnotes follow the pages
/// once, linked from their reference marks.
///
/// # Quick Start
///
/// ```rust,no_run
/// use longan::html::{HtmlOptions, ToHtml};
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("report.docx")?.parse()?;
/// let html = parsed.to_html_with_options(&HtmlOptions::new().with_theme_variables(true));
/// println!("{html}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Architecture
///
/// - [`ToHtml`]: conversion entry point
/// - [`HtmlOptions`]: markup configuration
/// - `writer`: paragraph, run and table markup with the list counters of
///   one pass
/// - `style`: formatting to inline CSS
/// - `pagination`: page assembly
/// - `notes`: footnote and endnote blocks
mod config;
mod document;
mod error;
mod notes;
mod pagination;
mod style;
mod traits;
mod writer;

pub use config::HtmlOptions;
pub use error::{RenderError, RenderResult};
pub use traits::ToHtml;

use crate::common::error::{DiagnosticKind, Diagnostics};
use crate::common::xml::escape_html;
use crate::ooxml::docx::font::css_font_family;
use crate::ooxml::docx::package::ParsedDocument;
use crate::ooxml::opc::constants::part_name;
use notes::write_notes;
use pagination::{Paginator, write_pages};
use style::{Declarations, hex_color};
use writer::HtmlWriter;

/// Render `doc` to paginated HTML.
///
/// Each top-level block is rendered on its own; a block that fails is left
/// out and recorded in `diagnostics` as a render failure.
pub fn render_document(doc: &ParsedDocument, options: &HtmlOptions, diagnostics: &Diagnostics) -> String {
    let mut writer = HtmlWriter::new(doc, options);
    render_pass(&mut writer, doc, diagnostics)
}

fn render_pass(writer: &mut HtmlWriter<'_>, doc: &ParsedDocument, diagnostics: &Diagnostics) -> String {
    let options = writer.options();
    let mut paginator = Paginator::new();
    for (index, block) in doc.document().blocks().iter().enumerate() {
        match writer.render_block(block) {
            Ok(rendered) => paginator.push(rendered),
            Err(e) => diagnostics.record(
                doc.part_name(),
                DiagnosticKind::RenderFailure,
                format!("block {index}: {e}"),
            ),
        }
    }
    let pages = paginator.finish();

    let mut out = String::with_capacity(pages.iter().map(String::len).sum::<usize>() + 256);
    out.push_str("<div class=\"");
    out.push_str(&escape_html(&options.container_class));
    out.push('"');
    if options.theme_variables {
        let decls = theme_variables(doc);
        if !decls.is_empty() {
            out.push_str(" style=\"");
            out.push_str(&escape_html(decls.as_str()));
            out.push('"');
        }
    }
    out.push('>');

    write_pages(&mut out, &pages, doc.document().sections(), options);
    if options.include_footnotes {
        write_notes(&mut out, writer, doc.footnotes(), part_name::FOOTNOTES, diagnostics);
    }
    if options.include_endnotes {
        write_notes(&mut out, writer, doc.endnotes(), part_name::ENDNOTES, diagnostics);
    }
    out.push_str("</div>");

    tracing::debug!(pages = pages.len(), bytes = out.len(), "rendered document");
    out
}

/// Theme colors and fonts as CSS custom properties.
fn theme_variables(doc: &ParsedDocument) -> Declarations {
    let mut decls = Declarations::new();
    let Some(theme) = doc.theme() else {
        return decls;
    };
    for (slot, color) in theme.colors() {
        if let Some(color) = hex_color(color) {
            decls.push(&format!("--docx-{slot}"), &color);
        }
    }
    if let Some(font) = theme.major_font() {
        decls.push("--docx-major-font", &css_font_family(font, None));
    }
    if let Some(font) = theme.minor_font() {
        decls.push("--docx-minor-font", &css_font_family(font, None));
    }
    decls
}
