/// Options controlling which parts of a package are loaded.
///
/// The main document, styles and numbering are always loaded. Everything
/// else can be switched off when a caller only needs the body.
///
/// # Examples
///
/// ```rust
/// use longan::ooxml::docx::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_media(false)
///     .with_comments(false)
///     .with_parallel(false);
/// assert!(options.load_notes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decode image parts referenced by the document
    pub load_media: bool,
    /// Build header and footer parts
    pub load_headers_footers: bool,
    pub load_comments: bool,
    /// Build footnote and endnote parts
    pub load_notes: bool,
    /// Run the resource parsers concurrently
    pub parallel: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            load_media: true,
            load_headers_footers: true,
            load_comments: true,
            load_notes: true,
            parallel: true,
        }
    }
}

impl ParseOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_media(mut self, load: bool) -> Self {
        self.load_media = load;
        self
    }

    #[inline]
    pub fn with_headers_footers(mut self, load: bool) -> Self {
        self.load_headers_footers = load;
        self
    }

    #[inline]
    pub fn with_comments(mut self, load: bool) -> Self {
        self.load_comments = load;
        self
    }

    #[inline]
    pub fn with_notes(mut self, load: bool) -> Self {
        self.load_notes = load;
        self
    }

    /// When `false` the resource parsers run one after another on the
    /// calling thread.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
