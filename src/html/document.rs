/// HTML conversion for parsed Word documents.
use super::config::HtmlOptions;
use super::traits::ToHtml;
use crate::common::error::Diagnostics;
use crate::ooxml::docx::package::ParsedDocument;

impl ToHtml for ParsedDocument {
    /// Render with a throwaway diagnostics sink; failures are still logged.
    /// Use [`ParsedDocument::render_html`] to collect them.
    fn to_html_with_options(&self, options: &HtmlOptions) -> String {
        super::render_document(self, options, &Diagnostics::new())
    }
}
