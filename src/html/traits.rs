/// Core trait for HTML conversion.
use super::config::HtmlOptions;

/// Types that render to paginated HTML.
///
/// Rendering is best effort: failures of individual blocks are skipped, so
/// the result is always a string.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::html::{HtmlOptions, ToHtml};
/// use longan::ooxml::docx::Package;
///
/// let parsed = Package::open("report.docx")?.parse()?;
/// let html = parsed.to_html();
/// let merged = parsed.to_html_with_options(&HtmlOptions::new().with_merge_cells(true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ToHtml {
    /// Convert with default options.
    fn to_html(&self) -> String {
        self.to_html_with_options(&HtmlOptions::default())
    }

    /// Convert with custom options.
    fn to_html_with_options(&self, options: &HtmlOptions) -> String;
}
