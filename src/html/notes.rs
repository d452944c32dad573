//! Out-of-flow footnote and endnote blocks.
use super::writer::{HtmlWriter, note_prefix};
use crate::common::error::{DiagnosticKind, Diagnostics};
use crate::ooxml::docx::footnote::{Note, Notes};

impl HtmlWriter<'_> {
    fn render_note(&mut self, note: &Note) -> super::error::RenderResult<String> {
        self.reset_output();
        let prefix = note_prefix(note.kind());
        let id = note.id();
        self.push_str(&format!(
            "<div class=\"{prefix}\" id=\"{prefix}-{id}\"><span class=\"{prefix}-number\">{id}</span>"
        ));
        self.write_blocks(note.content())?;
        self.push_str("</div>");
        Ok(self.take())
    }
}

/// Append the block for `notes`, ordered by id. Nothing is written for an
/// empty collection. A note that fails to render is left out.
pub(crate) fn write_notes(
    out: &mut String,
    writer: &mut HtmlWriter<'_>,
    notes: &Notes,
    part: &str,
    diagnostics: &Diagnostics,
) {
    if notes.is_empty() {
        return;
    }
    let prefix = note_prefix(notes.kind());
    out.push_str(&format!("<div class=\"{prefix}s\"><hr class=\"{prefix}s-separator\">"));
    for note in notes.iter() {
        match writer.render_note(note) {
            Ok(html) => out.push_str(&html),
            Err(e) => diagnostics.record(part, DiagnosticKind::RenderFailure, format!("{prefix} {}: {e}", note.id())),
        }
    }
    out.push_str("</div>");
}
