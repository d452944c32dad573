/// Configuration for HTML rendering.
///
/// The defaults produce the page markup expected by the bundled stylesheet:
/// a `docx-pages` root holding `docx-page` containers.
///
/// # Examples
///
/// ```rust
/// use longan::html::HtmlOptions;
///
/// let options = HtmlOptions::new()
///     .with_merge_cells(true)
///     .with_embed_images(false)
///     .with_page_class("page");
/// assert_eq!(options.container_class, "docx-pages");
/// assert!(options.merge_cells);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Class of the root container
    pub container_class: String,
    /// Class of every page container
    pub page_class: String,
    /// Inline images as `data:` URLs instead of linking the part name
    pub embed_images: bool,
    pub include_footnotes: bool,
    pub include_endnotes: bool,
    /// Emit `colspan`/`rowspan` and drop continuation cells. When off,
    /// merge information is kept as `data-*` attributes.
    pub merge_cells: bool,
    /// Expose theme colors as CSS custom properties on the root container
    pub theme_variables: bool,
    /// Render bookmarks as empty anchors
    pub preserve_bookmarks: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            container_class: "docx-pages".to_string(),
            page_class: "docx-page".to_string(),
            embed_images: true,
            include_footnotes: true,
            include_endnotes: true,
            merge_cells: false,
            theme_variables: false,
            preserve_bookmarks: true,
        }
    }
}

impl HtmlOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    #[inline]
    pub fn with_page_class(mut self, class: impl Into<String>) -> Self {
        self.page_class = class.into();
        self
    }

    /// Set whether images are embedded as `data:` URLs.
    ///
    /// When disabled, `<img>` points at the media part name so a caller can
    /// serve [`Media`](crate::ooxml::docx::media::Media) itself.
    #[inline]
    pub fn with_embed_images(mut self, embed: bool) -> Self {
        self.embed_images = embed;
        self
    }

    #[inline]
    pub fn with_footnotes(mut self, include: bool) -> Self {
        self.include_footnotes = include;
        self
    }

    #[inline]
    pub fn with_endnotes(mut self, include: bool) -> Self {
        self.include_endnotes = include;
        self
    }

    #[inline]
    pub fn with_merge_cells(mut self, merge: bool) -> Self {
        self.merge_cells = merge;
        self
    }

    #[inline]
    pub fn with_theme_variables(mut self, enable: bool) -> Self {
        self.theme_variables = enable;
        self
    }

    #[inline]
    pub fn with_bookmarks(mut self, preserve: bool) -> Self {
        self.preserve_bookmarks = preserve;
        self
    }
}
